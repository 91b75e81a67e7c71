use common_auth::VerifyError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecurityError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid authorization token: {0}")]
    InvalidToken(#[from] VerifyError),
    #[error("role '{role}' may not {action} {resource}")]
    Forbidden {
        role: String,
        resource: String,
        action: String,
    },
    #[error("role '{role}' may not access route {route}")]
    RouteForbidden { role: String, route: String },
}

impl SecurityError {
    /// True when the caller could not be identified at all (401 upstream);
    /// false when it was identified but lacks permission (403 upstream).
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, SecurityError::MissingToken | SecurityError::InvalidToken(_))
    }
}
