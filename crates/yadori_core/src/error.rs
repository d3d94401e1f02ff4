//! Error taxonomy for the pure engine core.
//!
//! Per the design, value-bound breaches (out-of-range numbers reaching a
//! clamp) are never surfaced as `Err` — they are corrected in place and a
//! `tracing::warn!` is emitted so the clamp is still observable. `CoreError`
//! only covers the handful of operations that can genuinely fail on
//! malformed input: parsing a markdown block back into a value, or looking
//! up a diary entry by an invalid date.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("unknown enum variant `{1}` for {0}")]
    UnknownEnumVariant(&'static str, String),

    #[error("malformed markdown block: {0}")]
    MalformedMarkdown(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
