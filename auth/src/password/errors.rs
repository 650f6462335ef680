use thiserror::Error;

/// Error type for password operations.
///
/// Only hashing can fail; verification collapses every failure to a
/// non-match by contract.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
