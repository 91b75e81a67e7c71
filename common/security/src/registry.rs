//! Static role -> (resource, actions) table.
//!
//! The table is compiled in and never changes at runtime. Roles are looked up
//! by their wire name; anything unrecognised resolves to an empty list.

use common_auth::Role;
use serde::Serialize;

/// Actions a role may perform on one resource. Action order carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Permission {
    pub resource: &'static str,
    pub actions: &'static [&'static str],
}

impl Permission {
    pub const fn new(resource: &'static str, actions: &'static [&'static str]) -> Self {
        Self { resource, actions }
    }

    pub fn allows(&self, action: &str) -> bool {
        self.actions.iter().any(|candidate| *candidate == action)
    }
}

const CRUD: &[&str] = &["create", "read", "update", "delete"];

const ADMIN: &[Permission] = &[
    Permission::new("users", CRUD),
    Permission::new("workers", &["create", "read", "update", "delete", "verify"]),
    Permission::new("homeowners", CRUD),
    Permission::new("bookings", CRUD),
    Permission::new("services", CRUD),
    Permission::new("categories", CRUD),
    Permission::new("payments", &["read", "update", "refund"]),
    Permission::new("reviews", &["read", "delete"]),
    Permission::new("disputes", &["read", "update", "resolve"]),
    Permission::new("reports", &["read", "export"]),
    Permission::new("settings", &["read", "update"]),
];

// Homeowner and worker grants never overlap on a (resource, action) pair.
const HOMEOWNER: &[Permission] = &[
    Permission::new("bookings", &["create", "cancel"]),
    Permission::new("services", &["read"]),
    Permission::new("workers", &["read"]),
    Permission::new("payments", &["create"]),
    Permission::new("reviews", &["create", "update"]),
    Permission::new("favorites", &["create", "read", "delete"]),
    Permission::new("homeowner_profile", &["read", "update"]),
];

const WORKER: &[Permission] = &[
    Permission::new("bookings", &["read", "update"]),
    Permission::new("jobs", &["read", "accept", "decline"]),
    Permission::new("availability", &["read", "update"]),
    Permission::new("earnings", &["read"]),
    Permission::new("worker_profile", &["read", "update"]),
];

const GUEST: &[Permission] = &[
    Permission::new("services", &["read"]),
    Permission::new("categories", &["read"]),
];

pub fn permissions_of(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => ADMIN,
        Role::Homeowner => HOMEOWNER,
        Role::Worker => WORKER,
        Role::Guest => GUEST,
    }
}

/// Every grant held by `role`, in table order. Unknown roles get nothing.
pub fn role_permissions(role: &str) -> &'static [Permission] {
    Role::parse(role).map(permissions_of).unwrap_or(&[])
}

/// Resources `role` holds at least one action on, in table order.
pub fn role_resources(role: &str) -> Vec<&'static str> {
    role_permissions(role)
        .iter()
        .map(|permission| permission.resource)
        .collect()
}

pub(crate) fn lookup(role: &str, resource: &str) -> Option<&'static Permission> {
    role_permissions(role)
        .iter()
        .find(|permission| permission.resource == resource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn grants(role: Role) -> HashSet<(&'static str, &'static str)> {
        permissions_of(role)
            .iter()
            .flat_map(|p| p.actions.iter().map(move |a| (p.resource, *a)))
            .collect()
    }

    #[test]
    fn resources_are_listed_once_per_role() {
        for role in [Role::Admin, Role::Homeowner, Role::Worker, Role::Guest] {
            let resources = role_resources(role.as_str());
            let unique: HashSet<_> = resources.iter().collect();
            assert_eq!(unique.len(), resources.len(), "{role} repeats a resource");
        }
    }

    #[test]
    fn homeowner_and_worker_grants_are_disjoint() {
        let overlap: Vec<_> = grants(Role::Homeowner)
            .intersection(&grants(Role::Worker))
            .copied()
            .collect();
        assert!(overlap.is_empty(), "shared grants: {overlap:?}");
    }

    #[test]
    fn unknown_role_has_no_permissions() {
        assert!(role_permissions("superuser").is_empty());
        assert!(role_resources("").is_empty());
        assert!(role_permissions("Admin").is_empty());
    }

    #[test]
    fn worker_resources_in_table_order() {
        assert_eq!(
            role_resources("worker"),
            vec!["bookings", "jobs", "availability", "earnings", "worker_profile"]
        );
    }

    #[test]
    fn table_serializes_for_admin_tooling() {
        let json = serde_json::to_value(role_permissions("guest")).expect("serialize");
        assert_eq!(json[0]["resource"], "services");
        assert_eq!(json[0]["actions"][0], "read");
    }
}
