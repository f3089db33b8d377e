//! Linear-slope bonding curve for the virtual-pool mechanism.
//!
//! `price(t) = base_price + slope * t / SCALE` with `t` the cumulative
//! tokens sold. Buys solve the quadratic that comes from integrating the
//! price over `[t, t + delta]`; sells are the inverse integral.

use crate::liquidity::isqrt;
use crate::{CurveError, CURVE_SCALE};

/// Spot price after `tokens_sold` cumulative sales.
pub fn bonding_spot_price(
    base_price: u64,
    slope: u64,
    tokens_sold: u64,
) -> Result<u128, CurveError> {
    let increment = (slope as u128)
        .checked_mul(tokens_sold as u128)
        .ok_or(CurveError::Overflow)?
        / CURVE_SCALE;
    (base_price as u128)
        .checked_add(increment)
        .ok_or(CurveError::Overflow)
}

/// Tokens received for `sol_in`, via the closed-form quadratic root
/// `delta = (sqrt(p0^2 + 2*slope*sol_in/SCALE) - p0) * SCALE / slope`.
pub fn bonding_buy_tokens(
    sol_in: u64,
    base_price: u64,
    slope: u64,
    tokens_sold: u64,
) -> Result<u64, CurveError> {
    let p0 = bonding_spot_price(base_price, slope, tokens_sold)?;
    if slope == 0 {
        if p0 == 0 {
            return Err(CurveError::Domain);
        }
        let delta = (sol_in as u128)
            .checked_mul(CURVE_SCALE)
            .ok_or(CurveError::Overflow)?
            / p0;
        return u64::try_from(delta).map_err(|_| CurveError::Overflow);
    }
    let paid = (slope as u128)
        .checked_mul(sol_in as u128)
        .and_then(|v| v.checked_mul(2))
        .ok_or(CurveError::Overflow)?
        / CURVE_SCALE;
    let radicand = p0
        .checked_mul(p0)
        .and_then(|v| v.checked_add(paid))
        .ok_or(CurveError::Overflow)?;
    // radicand >= p0^2, so the root cannot fall below p0; a shortfall here
    // is an invariant violation, not a zero-tokens trade.
    let delta = isqrt(radicand)
        .checked_sub(p0)
        .ok_or(CurveError::Domain)?
        .checked_mul(CURVE_SCALE)
        .ok_or(CurveError::Overflow)?
        / slope as u128;
    u64::try_from(delta).map_err(|_| CurveError::Overflow)
}

/// SOL returned for selling `token_amount` back into the curve:
/// `(p1^2 - p0^2) * SCALE / (2 * slope)` over the interval
/// `[tokens_sold - token_amount, tokens_sold]`.
pub fn bonding_sell_sol(
    token_amount: u64,
    base_price: u64,
    slope: u64,
    tokens_sold: u64,
) -> Result<u64, CurveError> {
    // Cannot sell supply the curve never sold.
    let remaining = tokens_sold
        .checked_sub(token_amount)
        .ok_or(CurveError::Domain)?;
    let p0 = bonding_spot_price(base_price, slope, remaining)?;
    if slope == 0 {
        let sol = (token_amount as u128)
            .checked_mul(p0)
            .ok_or(CurveError::Overflow)?
            / CURVE_SCALE;
        return u64::try_from(sol).map_err(|_| CurveError::Overflow);
    }
    let p1 = bonding_spot_price(base_price, slope, tokens_sold)?;
    let diff = p1
        .checked_mul(p1)
        .ok_or(CurveError::Overflow)?
        .checked_sub(p0.checked_mul(p0).ok_or(CurveError::Overflow)?)
        .ok_or(CurveError::Domain)?;
    let sol = diff
        .checked_mul(CURVE_SCALE)
        .ok_or(CurveError::Overflow)?
        / (2 * slope as u128);
    u64::try_from(sol).map_err(|_| CurveError::Overflow)
}

/// Lifecycle of a virtual-pool slot. Transitions are one-directional; a
/// slot never returns to an earlier state. `Active -> Flushed` covers
/// abandonment without graduation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SlotStatus {
    Free = 0,
    Active = 1,
    Graduated = 2,
    Flushed = 3,
}

impl SlotStatus {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(SlotStatus::Free),
            1 => Some(SlotStatus::Active),
            2 => Some(SlotStatus::Graduated),
            3 => Some(SlotStatus::Flushed),
            _ => None,
        }
    }

    pub fn can_transition(self, next: SlotStatus) -> bool {
        matches!(
            (self, next),
            (SlotStatus::Free, SlotStatus::Active)
                | (SlotStatus::Active, SlotStatus::Graduated)
                | (SlotStatus::Active, SlotStatus::Flushed)
                | (SlotStatus::Graduated, SlotStatus::Flushed)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: u64 = 1_000_000;
    const SLOPE: u64 = 1_000_000_000;

    #[test]
    fn spot_price_moves_with_supply() {
        assert_eq!(bonding_spot_price(BASE, SLOPE, 0), Ok(BASE as u128));
        // slope * sold / SCALE = 1e9 * 500 / 1e9 = 500
        assert_eq!(bonding_spot_price(BASE, SLOPE, 500), Ok(BASE as u128 + 500));
    }

    #[test]
    fn flat_curve_buy_is_linear() {
        // 1e9 lamports at price 1e6 -> 1e9 * 1e9 / 1e6 tokens
        assert_eq!(
            bonding_buy_tokens(1_000_000_000, BASE, 0, 0),
            Ok(1_000_000_000_000)
        );
        assert_eq!(bonding_buy_tokens(1, 0, 0, 0), Err(CurveError::Domain));
    }

    #[test]
    fn sloped_buy_matches_closed_form() {
        // p0 = 1e6; radicand = 1e12 + 2e12 = 3e12; isqrt = 1_732_050
        let tokens = bonding_buy_tokens(1_000_000_000_000, BASE, SLOPE, 0).unwrap();
        assert_eq!(tokens, 732_050);
    }

    #[test]
    fn sell_inverts_buy_within_truncation() {
        let sol_in = 1_000_000_000_000u64;
        let tokens = bonding_buy_tokens(sol_in, BASE, SLOPE, 0).unwrap();
        let sol_out = bonding_sell_sol(tokens, BASE, SLOPE, tokens).unwrap();
        assert!(sol_out <= sol_in);
        // isqrt flooring loses at most a few parts per million here
        assert!(sol_in - sol_out < sol_in / 100_000);
    }

    #[test]
    fn flat_curve_sell_is_linear() {
        assert_eq!(
            bonding_sell_sol(1_000_000_000_000, BASE, 0, 1_000_000_000_000),
            Ok(1_000_000_000)
        );
    }

    #[test]
    fn cannot_sell_unsold_supply() {
        assert_eq!(
            bonding_sell_sol(101, BASE, SLOPE, 100),
            Err(CurveError::Domain)
        );
        assert!(bonding_sell_sol(100, BASE, SLOPE, 100).is_ok());
    }

    #[test]
    fn buys_get_more_expensive_as_supply_sells() {
        let early = bonding_buy_tokens(1_000_000_000, BASE, SLOPE, 0).unwrap();
        let late = bonding_buy_tokens(1_000_000_000, BASE, SLOPE, 10_000_000).unwrap();
        assert!(late < early);
    }

    #[test]
    fn status_machine_is_one_way() {
        use SlotStatus::*;
        let allowed = [
            (Free, Active),
            (Active, Graduated),
            (Active, Flushed),
            (Graduated, Flushed),
        ];
        for from in [Free, Active, Graduated, Flushed] {
            for to in [Free, Active, Graduated, Flushed] {
                let expect = allowed.contains(&(from, to));
                assert_eq!(from.can_transition(to), expect, "{from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn status_round_trips_through_u8() {
        for s in [
            SlotStatus::Free,
            SlotStatus::Active,
            SlotStatus::Graduated,
            SlotStatus::Flushed,
        ] {
            assert_eq!(SlotStatus::from_u8(s as u8), Some(s));
        }
        assert_eq!(SlotStatus::from_u8(4), None);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn sell_never_exceeds_buy(
                sol_in in 1_000u64..1_000_000_000_000,
                base in 1_000u64..1_000_000_000,
                slope in 0u64..1_000_000_000,
                sold in 0u64..1_000_000_000,
            ) {
                let tokens = bonding_buy_tokens(sol_in, base, slope, sold).unwrap();
                let total = sold.saturating_add(tokens);
                if let Ok(out) = bonding_sell_sol(tokens, base, slope, total) {
                    prop_assert!(out <= sol_in);
                }
            }
        }
    }
}
