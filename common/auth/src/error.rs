use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

/// Fatal failures while preparing signing material or issuing tokens.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("failed to generate RSA key pair: {0}")]
    KeyGeneration(String),
    #[error("failed to encode key material as PEM: {0}")]
    KeyEncoding(String),
    #[error("failed to parse key material: {0}")]
    KeyParse(String),
    #[error("failed to sign token: {0}")]
    Signing(String),
    #[error("failed to encode token segment: {0}")]
    Codec(#[from] CodecError),
}

/// Why a presented token was rejected.
///
/// Every rejection maps onto exactly one of these kinds; callers decide how to
/// respond (401 upstream) and never need to inspect the message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("malformed token: {0}")]
    MalformedToken(String),
    #[error("token signature does not match")]
    InvalidSignature,
    #[error("token expired at {expired_at}")]
    ExpiredToken { expired_at: i64 },
}

impl VerifyError {
    /// Stable label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            VerifyError::MalformedToken(_) => "malformed",
            VerifyError::InvalidSignature => "invalid_signature",
            VerifyError::ExpiredToken { .. } => "expired",
        }
    }
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("segment is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("segment is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Non-fatal key lifecycle failures. `KeyManager` logs these and carries on
/// with whatever key material it has in memory.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("failed to load key material from {path}: {reason}")]
    Load { path: String, reason: String },
    #[error("failed to persist key material to {path}: {reason}")]
    Persist { path: String, reason: String },
}
