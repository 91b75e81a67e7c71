pub mod bearer;
pub mod claims;
pub mod codec;
pub mod config;
pub mod error;
pub mod keys;
pub mod metrics;
pub mod roles;
pub mod tokens;

pub use bearer::parse_bearer;
pub use claims::{InvalidClaim, TokenHeader, TokenPayload, TokenSubject};
pub use config::{KeyConfig, TokenConfig};
pub use error::{AuthError, AuthResult, CodecError, KeyError, VerifyError};
pub use keys::{KeyManager, KeyPair, KeySource};
pub use metrics::TokenMetrics;
pub use roles::{Role, UnknownRole, ROLE_ADMIN, ROLE_GUEST, ROLE_HOMEOWNER, ROLE_WORKER, TOKEN_ROLES};
pub use tokens::{decode_unverified, TokenService};
