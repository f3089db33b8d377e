//! SDK error type and the on-chain error-code catalog.

use curve_model::CurveError;
use thiserror::Error;

/// Errors surfaced by SDK-level helpers. Codec type mismatches are not
/// errors; decoders return `Option` so probing unknown accounts stays on
/// the normal path.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SdkError {
    #[error("newton solver failed to converge within the iteration budget")]
    Convergence,
    #[error("domain violation in curve computation")]
    Domain,
    #[error("arithmetic overflow in curve computation")]
    Overflow,
    #[error("pool is paused")]
    PoolPaused,
    #[error("token index out of range for this pool")]
    InvalidTokenIndex,
}

impl From<CurveError> for SdkError {
    fn from(err: CurveError) -> Self {
        match err {
            CurveError::Convergence => SdkError::Convergence,
            CurveError::Domain => SdkError::Domain,
            CurveError::Overflow => SdkError::Overflow,
        }
    }
}

/// One row of the on-chain error-code catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorInfo {
    pub code: u32,
    pub name: &'static str,
    pub message: &'static str,
}

macro_rules! catalog {
    ($(($code:expr, $name:expr, $msg:expr),)*) => {
        &[$(ErrorInfo { code: $code, name: $name, message: $msg },)*]
    };
}

/// Program error codes, anchor-style 6000 series. Fixed external contract;
/// built once, never mutated.
pub static ERROR_CATALOG: &[ErrorInfo] = catalog![
    (6000, "SlippageExceeded", "output amount is below the caller's minimum"),
    (6001, "PoolPaused", "pool is paused for swaps and liquidity changes"),
    (6002, "InvalidFee", "fee exceeds the 10000 bps maximum"),
    (6003, "InvalidAmp", "amplification outside the permitted range"),
    (6004, "ConvergenceFailure", "invariant solver did not converge"),
    (6005, "ZeroLiquidity", "operation requires a non-empty pool"),
    (6006, "ZeroLpSupply", "lp supply is zero"),
    (6007, "InsufficientBalance", "pool balance cannot cover the output"),
    (6008, "RampTooFast", "amp ramp window is below the minimum duration"),
    (6009, "RampActive", "a previous amp ramp is still running"),
    (6010, "Unauthorized", "signer is not the pool authority"),
    (6011, "PendingAuthorityMismatch", "signer is not the pending authority"),
    (6012, "FarmEnded", "farm reward window has closed"),
    (6013, "StakeLocked", "stake is still inside its lock window"),
    (6014, "LotteryClosed", "lottery entry window has closed"),
    (6015, "LotteryNotDrawn", "winning ticket has not been drawn"),
    (6016, "NotWinningTicket", "entry does not cover the winning ticket"),
    (6017, "PrizeClaimed", "prize was already claimed"),
    (6018, "SlotNotActive", "virtual pool slot is not active"),
    (6019, "AlreadyGraduated", "virtual pool already graduated"),
    (6020, "SellExceedsSold", "cannot sell more than the curve has sold"),
    (6021, "GraduationTargetNotMet", "raise target not reached"),
];

/// Look up a program error code. `None` for codes outside the catalog.
pub fn lookup_error(code: u32) -> Option<&'static ErrorInfo> {
    ERROR_CATALOG.iter().find(|info| info.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lookup_hits_and_misses() {
        let info = lookup_error(6004).unwrap();
        assert_eq!(info.name, "ConvergenceFailure");
        assert!(lookup_error(5999).is_none());
        assert!(lookup_error(7000).is_none());
    }

    #[test]
    fn catalog_codes_are_unique_and_sorted() {
        for pair in ERROR_CATALOG.windows(2) {
            assert!(pair[0].code < pair[1].code);
        }
    }

    #[test]
    fn curve_errors_map_one_to_one() {
        assert_eq!(SdkError::from(CurveError::Convergence), SdkError::Convergence);
        assert_eq!(SdkError::from(CurveError::Domain), SdkError::Domain);
        assert_eq!(SdkError::from(CurveError::Overflow), SdkError::Overflow);
    }
}
