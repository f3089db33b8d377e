//! Poolswap curve model - pure fixed-point StableSwap math
//!
//! Deterministic integer math mirroring the on-chain program: Newton
//! solvers for the invariant D and the counterparty balance Y, swap and
//! liquidity simulation, the amplification ramp, and the virtual-pool
//! bonding curve.
//!
//! Every function here is referentially transparent and allocates nothing
//! beyond local temporaries, so calls are safe from any number of threads
//! without synchronization. All divisions truncate exactly as the on-chain
//! program truncates; results must match it bit for bit, not merely be
//! close in real-number terms.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

pub mod bonding;
pub mod liquidity;
pub mod math;

pub use bonding::{
    bonding_buy_tokens, bonding_sell_sol, bonding_spot_price, SlotStatus,
};
pub use liquidity::{calc_lp_tokens, calc_virtual_price, calc_withdraw, isqrt};
pub use math::{
    calc_d, calc_d_n, calc_y, calc_y_n, current_amp, imbalance_bps, simulate_swap,
    simulate_swap_detailed, slippage_bps, SwapQuote,
};

/// Basis points denominator (10,000 bps = 100%)
pub const BPS_DENOM: u128 = 10_000;

/// Virtual price scale (1e18)
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Bonding curve scale (1e9)
pub const CURVE_SCALE: u128 = 1_000_000_000;

/// Amplification bounds enforced by the on-chain program
pub const MIN_AMP: u64 = 1;
pub const MAX_AMP: u64 = 1_000_000;

/// Maximum token count for the N-pool generalization
pub const MAX_TOKENS: usize = 8;

/// Newton iteration cap shared by every solver
pub const MAX_ITERATIONS: usize = 255;

/// Error kinds for curve computations.
///
/// All three are recoverable conditions returned to the immediate caller;
/// nothing here retries internally and nothing panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveError {
    /// A Newton solver exhausted its iteration budget without converging
    Convergence,
    /// Structurally invalid input: underflowing subtraction, zero supply,
    /// bad token index, selling unsold bonding-curve supply
    Domain,
    /// An intermediate product exceeded 128 bits
    Overflow,
}
