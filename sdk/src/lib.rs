//! Poolswap client SDK
//!
//! Client-side support for the Poolswap StableSwap protocol: typed decoding
//! of on-chain account layouts, instruction payload construction, and the
//! fixed-point curve math (re-exported from [`curve_model`]) that mirrors
//! the on-chain program exactly.
//!
//! The SDK holds no connection state and performs no I/O; fetch raw account
//! bytes through whatever transport you use, then hand them to
//! [`state::decode_any`] or the per-record `decode` entry points.

pub mod constants;
pub mod error;
pub mod instruction;
pub mod state;

mod layout;

pub use curve_model;
pub use error::{lookup_error, ErrorInfo, SdkError};
pub use state::{decode_any, AccountData};
