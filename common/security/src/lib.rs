pub mod context;
pub mod error;
pub mod policy;
pub mod registry;
pub mod roles;
pub mod routes;

pub use context::SecurityContext;
pub use error::SecurityError;
pub use policy::{
    ensure_all_permissions, ensure_any_permission, ensure_permission, ensure_route,
    has_all_permissions, has_any_permission, has_permission, Requirement,
};
pub use registry::{permissions_of, role_permissions, role_resources, Permission};
pub use roles::{has_higher_or_equal_role, rank};
pub use routes::{can_access_route, role_routes};
