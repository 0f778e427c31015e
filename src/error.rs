//! Error taxonomy for key generation and validation

use thiserror::Error;

/// Errors surfaced by the key core.
///
/// Signature or key-id mismatches during validation are not errors; the
/// validate routines return `Ok(false)` for those so callers can batch-check
/// keys without control flow overhead.
#[derive(Debug, Error)]
pub enum KeygenError {
    /// The product identifier does not have the expected dash-delimited
    /// digit-group layout.
    #[error("invalid product identifier: {0}")]
    InvalidProductIdentifier(String),

    /// The encoded key contains a character outside the base-24 alphabet or
    /// decodes to a value that cannot fit the key container.
    #[error("invalid encoded key: {0}")]
    InvalidEncodedKey(String),

    /// No nonce produced a bounded signature within the attempt limit.
    #[error("no valid signature found after {0} attempts")]
    RetryExhausted(usize),

    /// Validation was requested with curve parameters belonging to the other
    /// key kind.
    #[error("curve parameters do not match the requested key kind")]
    CurveParameterMismatch,

    /// A key-pack field does not fit its bit width in the payload.
    #[error("key-pack field out of range: {0}")]
    FieldOverflow(&'static str),
}
