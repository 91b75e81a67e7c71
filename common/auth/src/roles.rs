use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_HOMEOWNER: &str = "homeowner";
pub const ROLE_WORKER: &str = "worker";
pub const ROLE_GUEST: &str = "guest";

/// Roles a token may assert. `guest` is deliberately absent: anonymous callers
/// never hold a token.
pub const TOKEN_ROLES: &[Role] = &[Role::Admin, Role::Homeowner, Role::Worker];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Homeowner,
    Worker,
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Homeowner => ROLE_HOMEOWNER,
            Role::Worker => ROLE_WORKER,
            Role::Guest => ROLE_GUEST,
        }
    }

    /// Exact, case-sensitive match on the wire name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            ROLE_ADMIN => Some(Role::Admin),
            ROLE_HOMEOWNER => Some(Role::Homeowner),
            ROLE_WORKER => Some(Role::Worker),
            ROLE_GUEST => Some(Role::Guest),
            _ => None,
        }
    }

    pub fn can_hold_token(&self) -> bool {
        TOKEN_ROLES.contains(self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| UnknownRole(s.to_string()))
    }
}
