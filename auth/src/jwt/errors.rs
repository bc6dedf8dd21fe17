use thiserror::Error;

/// Error type for JWT operations.
///
/// Decode failures stay distinguishable here even though the HTTP boundary
/// collapses them into a single 401.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}
