use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::roles::Role;

pub const ALGORITHM: &str = "RS256";
pub const TOKEN_TYPE: &str = "JWT";

/// Fixed token header. Field order matters for byte-stable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
    pub typ: String,
}

impl Default for TokenHeader {
    fn default() -> Self {
        Self {
            alg: ALGORITHM.to_string(),
            typ: TOKEN_TYPE.to_string(),
        }
    }
}

/// Identity asserted by a caller that has already authenticated elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

impl TokenSubject {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            role,
        }
    }
}

/// Claims carried in the payload segment of an issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayload {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl TokenPayload {
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// A token stops being valid at the second named by `exp`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }

    pub fn subject(&self) -> TokenSubject {
        TokenSubject::new(self.user_id.clone(), self.email.clone(), self.role)
    }
}

/// Wire shape of the payload. Unknown claims are ignored; missing ones fail.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayloadRepr {
    user_id: String,
    email: String,
    role: Role,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid claim '{0}': {1}")]
pub struct InvalidClaim(pub &'static str, pub String);

impl PayloadRepr {
    fn into_payload(self) -> Result<TokenPayload, InvalidClaim> {
        if self.user_id.trim().is_empty() {
            return Err(InvalidClaim("userId", "must not be empty".into()));
        }
        if !self.role.can_hold_token() {
            return Err(InvalidClaim(
                "role",
                format!("'{}' cannot be asserted by a token", self.role),
            ));
        }
        Ok(TokenPayload {
            user_id: self.user_id,
            email: self.email,
            role: self.role,
            iat: self.iat,
            exp: self.exp,
        })
    }
}

impl TryFrom<serde_json::Value> for TokenPayload {
    type Error = InvalidClaim;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let repr: PayloadRepr = serde_json::from_value(value)
            .map_err(|err| InvalidClaim("payload", err.to_string()))?;
        repr.into_payload()
    }
}
