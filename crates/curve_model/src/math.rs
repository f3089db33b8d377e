//! StableSwap invariant solvers and swap simulation
//!
//! The two-token fast path (`calc_d`/`calc_y`) reproduces the on-chain
//! iteration exactly, including the order of the truncating divisions.
//! `calc_d_n`/`calc_y_n` generalize to 2..=8 tokens with `ann = amp * n^n`.

use crate::{CurveError, BPS_DENOM, MAX_ITERATIONS, MAX_TOKENS};

/// `a * b / den` with overflow and zero-divisor checks, truncating.
fn mul_div(a: u128, b: u128, den: u128) -> Result<u128, CurveError> {
    if den == 0 {
        return Err(CurveError::Domain);
    }
    Ok(a.checked_mul(b).ok_or(CurveError::Overflow)? / den)
}

/// StableSwap invariant D for a two-token pool.
///
/// Solves `ann*(x+y) + D = ann*D + D^3/(4xy)` with `ann = amp*4` by Newton
/// iteration. Returns `Ok(0)` for an empty pool. The cubic term is split
/// into two sequential divisions so every intermediate stays inside u128.
pub fn calc_d(x: u64, y: u64, amp: u64) -> Result<u128, CurveError> {
    let x = x as u128;
    let y = y as u128;
    let s = x + y;
    if s == 0 {
        return Ok(0);
    }
    let ann = amp as u128 * 4;
    let mut d = s;
    for _ in 0..MAX_ITERATIONS {
        // D_P = D^3 / (4xy)
        let d_p = mul_div(d, d, x * 2)?;
        let d_p = mul_div(d_p, d, y * 2)?;
        let prev = d;
        // D = D * (ann*S + 2*D_P) / ((ann-1)*D + 3*D_P)
        let num = ann
            .checked_mul(s)
            .and_then(|v| v.checked_add(d_p.checked_mul(2)?))
            .ok_or(CurveError::Overflow)?;
        let den = (ann - 1)
            .checked_mul(d)
            .and_then(|v| v.checked_add(d_p.checked_mul(3)?))
            .ok_or(CurveError::Overflow)?;
        d = mul_div(d, num, den)?;
        if d.abs_diff(prev) <= 1 {
            return Ok(d);
        }
    }
    Err(CurveError::Convergence)
}

/// New counterparty balance y' for a two-token pool, given the updated
/// input-side balance `new_x` and a previously computed invariant `d`.
///
/// Iterates `y = (y^2 + c) / (2y + b - D)` with `c = D^3/(4*x'*ann)` and
/// `b = x' + D/ann`. A non-positive denominator is a domain violation, not
/// a value to clamp.
pub fn calc_y(new_x: u128, d: u128, amp: u64) -> Result<u128, CurveError> {
    if new_x == 0 {
        return Err(CurveError::Domain);
    }
    let ann = amp as u128 * 4;
    let c = mul_div(d, d, new_x.checked_mul(2).ok_or(CurveError::Overflow)?)?;
    let c = mul_div(c, d, ann * 2)?;
    let b = new_x.checked_add(d / ann).ok_or(CurveError::Overflow)?;
    let mut y = d;
    for _ in 0..MAX_ITERATIONS {
        let prev = y;
        let num = y
            .checked_mul(y)
            .and_then(|v| v.checked_add(c))
            .ok_or(CurveError::Overflow)?;
        let den = y
            .checked_mul(2)
            .and_then(|v| v.checked_add(b))
            .ok_or(CurveError::Overflow)?
            .checked_sub(d)
            .ok_or(CurveError::Domain)?;
        if den == 0 {
            return Err(CurveError::Domain);
        }
        y = num / den;
        if y.abs_diff(prev) <= 1 {
            return Ok(y);
        }
    }
    Err(CurveError::Convergence)
}

/// Invariant D for an N-token pool (2..=8 tokens), `ann = amp * n^n`.
pub fn calc_d_n(balances: &[u64], amp: u64) -> Result<u128, CurveError> {
    let n = balances.len();
    if !(2..=MAX_TOKENS).contains(&n) {
        return Err(CurveError::Domain);
    }
    let n_u = n as u128;
    let s: u128 = balances.iter().map(|&b| b as u128).sum();
    if s == 0 {
        return Ok(0);
    }
    let ann = (amp as u128)
        .checked_mul(n_u.pow(n as u32))
        .ok_or(CurveError::Overflow)?;
    let mut d = s;
    for _ in 0..MAX_ITERATIONS {
        // D_P = D^(n+1) / (n^n * prod(x))
        let mut d_p = d;
        for &b in balances {
            d_p = mul_div(d_p, d, (b as u128) * n_u)?;
        }
        let prev = d;
        let num = ann
            .checked_mul(s)
            .and_then(|v| v.checked_add(d_p.checked_mul(n_u)?))
            .ok_or(CurveError::Overflow)?;
        let den = (ann - 1)
            .checked_mul(d)
            .and_then(|v| v.checked_add(d_p.checked_mul(n_u + 1)?))
            .ok_or(CurveError::Overflow)?;
        d = mul_div(d, num, den)?;
        if d.abs_diff(prev) <= 1 {
            return Ok(d);
        }
    }
    Err(CurveError::Convergence)
}

/// New balance of token `out_index` for an N-token pool whose other
/// balances are as given in `balances` (the entry at `out_index` is
/// ignored), holding the invariant `d` fixed.
///
/// The scaling term is built factor by factor from the whitepaper formula,
/// `c = D^(n+1) / (n^n * P * ann)` with `P` the product of the other
/// balances.
pub fn calc_y_n(
    out_index: usize,
    balances: &[u64],
    d: u128,
    amp: u64,
) -> Result<u128, CurveError> {
    let n = balances.len();
    if !(2..=MAX_TOKENS).contains(&n) || out_index >= n {
        return Err(CurveError::Domain);
    }
    let n_u = n as u128;
    let ann = (amp as u128)
        .checked_mul(n_u.pow(n as u32))
        .ok_or(CurveError::Overflow)?;
    let mut c = d;
    let mut s: u128 = 0;
    for (k, &b) in balances.iter().enumerate() {
        if k == out_index {
            continue;
        }
        let b = b as u128;
        s += b;
        c = mul_div(c, d, b * n_u)?;
    }
    let c = mul_div(c, d, ann.checked_mul(n_u).ok_or(CurveError::Overflow)?)?;
    let b = s.checked_add(d / ann).ok_or(CurveError::Overflow)?;
    let mut y = d;
    for _ in 0..MAX_ITERATIONS {
        let prev = y;
        let num = y
            .checked_mul(y)
            .and_then(|v| v.checked_add(c))
            .ok_or(CurveError::Overflow)?;
        let den = y
            .checked_mul(2)
            .and_then(|v| v.checked_add(b))
            .ok_or(CurveError::Overflow)?
            .checked_sub(d)
            .ok_or(CurveError::Domain)?;
        if den == 0 {
            return Err(CurveError::Domain);
        }
        y = num / den;
        if y.abs_diff(prev) <= 1 {
            return Ok(y);
        }
    }
    Err(CurveError::Convergence)
}

/// Effective amplification under a live ramp: piecewise-linear
/// interpolation from `amp` at `ramp_start` to `target_amp` at
/// `ramp_stop`, truncating toward zero.
pub fn current_amp(amp: u64, target_amp: u64, ramp_start: i64, ramp_stop: i64, now: i64) -> u64 {
    if now >= ramp_stop || ramp_stop == ramp_start {
        return target_amp;
    }
    if now <= ramp_start {
        return amp;
    }
    let elapsed = (now - ramp_start) as u128;
    let window = (ramp_stop - ramp_start) as u128;
    if target_amp >= amp {
        amp + ((target_amp - amp) as u128 * elapsed / window) as u64
    } else {
        amp - ((amp - target_amp) as u128 * elapsed / window) as u64
    }
}

/// Full swap quote. `price_impact` is display-only floating point and
/// never feeds back into a token-moving amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapQuote {
    /// Net output after fee
    pub amount_out: u64,
    /// Fee withheld from the gross output
    pub fee: u64,
    /// Input-side balance after the trade
    pub new_bal_in: u64,
    /// Output-side balance after the trade
    pub new_bal_out: u64,
    /// 1 - (net_out/amount_in) / (bal_out/bal_in)
    pub price_impact: f64,
}

/// Simulate a swap of `amount_in` against a two-token pool, returning the
/// net output amount. Fee is charged on the gross output, floor division.
pub fn simulate_swap(
    bal_in: u64,
    bal_out: u64,
    amount_in: u64,
    amp: u64,
    fee_bps: u64,
) -> Result<u64, CurveError> {
    Ok(simulate_swap_detailed(bal_in, bal_out, amount_in, amp, fee_bps)?.amount_out)
}

/// As [`simulate_swap`], additionally reporting the fee, post-trade
/// balances, and a display-only price impact.
pub fn simulate_swap_detailed(
    bal_in: u64,
    bal_out: u64,
    amount_in: u64,
    amp: u64,
    fee_bps: u64,
) -> Result<SwapQuote, CurveError> {
    if bal_in == 0 || bal_out == 0 || amount_in == 0 || fee_bps as u128 > BPS_DENOM {
        return Err(CurveError::Domain);
    }
    let d = calc_d(bal_in, bal_out, amp)?;
    let new_in = bal_in as u128 + amount_in as u128;
    let new_out = calc_y(new_in, d, amp)?;
    // An output exceeding the pool balance signals a broken invariant
    // upstream; fail rather than clamp.
    let gross = (bal_out as u128)
        .checked_sub(new_out)
        .ok_or(CurveError::Domain)?;
    let fee = gross * fee_bps as u128 / BPS_DENOM;
    let net = gross - fee;
    let new_bal_in = u64::try_from(new_in).map_err(|_| CurveError::Overflow)?;
    let price_impact =
        1.0 - (net as f64 / amount_in as f64) / (bal_out as f64 / bal_in as f64);
    Ok(SwapQuote {
        amount_out: net as u64,
        fee: fee as u64,
        new_bal_in,
        new_bal_out: new_out as u64,
        price_impact,
    })
}

/// Deviation of the smaller balance from the two-balance mean, in bps.
pub fn imbalance_bps(bal0: u64, bal1: u64) -> u64 {
    let lo = bal0.min(bal1) as u128;
    let hi = bal0.max(bal1) as u128;
    let mean = (lo + hi) / 2;
    if mean == 0 {
        return 0;
    }
    ((mean - lo) * BPS_DENOM / mean) as u64
}

/// Fee-free effective-price deviation from 1.0 in bps for a swap of
/// `amount_in`. Integer arithmetic, display-oriented.
pub fn slippage_bps(
    bal_in: u64,
    bal_out: u64,
    amount_in: u64,
    amp: u64,
) -> Result<u64, CurveError> {
    let out = simulate_swap(bal_in, bal_out, amount_in, amp, 0)?;
    if out == 0 {
        return Ok(0);
    }
    let shortfall = (amount_in as u128).saturating_sub(out as u128);
    Ok((shortfall * BPS_DENOM / out as u128) as u64)
}
