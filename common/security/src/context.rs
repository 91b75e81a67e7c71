use common_auth::{parse_bearer, Role, TokenPayload, TokenService};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SecurityError;

/// Identity attached to a request once its bearer token has verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityContext {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

impl SecurityContext {
    /// Verify the token in an `Authorization` header value and build the context.
    pub fn from_bearer(tokens: &TokenService, header_value: Option<&str>) -> Result<Self, SecurityError> {
        let token = header_value
            .and_then(parse_bearer)
            .ok_or(SecurityError::MissingToken)?;
        let payload = tokens.verify(token)?;
        debug!(user_id = %payload.user_id, role = %payload.role, "security context established");
        Ok(Self::from(payload))
    }
}

impl From<TokenPayload> for SecurityContext {
    fn from(payload: TokenPayload) -> Self {
        Self {
            user_id: payload.user_id,
            email: payload.email,
            role: payload.role,
        }
    }
}
