use thiserror::Error;

/// Error type for token operations.
///
/// Decoding failures are deliberately undifferentiated: a forged signature,
/// a malformed token, and an expired token all surface as `InvalidToken`, so
/// callers cannot leak which check rejected the credential.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Invalid token")]
    InvalidToken,
}
