//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `TpError` as one variant
//! where they need to surface configuration problems from this crate.

use thiserror::Error;

/// The top-level error type for `tp-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum TpError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `tp-*` crates.
pub type TpResult<T> = Result<T, TpError>;
