//! Error types for color parsing and conversion.

use thiserror::Error;

/// Errors produced while parsing or converting colors.
///
/// None of these reach the user: the picker recovers by keeping the last
/// committed color or falling back to the default accent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Wrong length or non-hex characters.
    #[error("invalid hex color: {0:?}")]
    InvalidHexFormat(String),

    /// A channel could not be parsed into a number after validation.
    #[error("unparseable color channel: {0:?}")]
    UnparseableChannel(String),
}
