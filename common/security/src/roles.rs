use common_auth::Role;

/// Coarse ordering of roles. Homeowner and worker share a rank but hold
/// disjoint grants, so rank says nothing about what a role may do.
pub fn rank(role: Role) -> u8 {
    match role {
        Role::Admin => 3,
        Role::Homeowner | Role::Worker => 2,
        Role::Guest => 1,
    }
}

/// `user_role` ranks at or above `required_role`. Unknown names on either side
/// compare as false.
///
/// Informational only (menus, display ordering). Gate actions with
/// `policy::has_permission`, never with this.
pub fn has_higher_or_equal_role(user_role: &str, required_role: &str) -> bool {
    match (Role::parse(user_role), Role::parse(required_role)) {
        (Some(user), Some(required)) => rank(user) >= rank(required),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_outranks_everyone() {
        for required in ["admin", "homeowner", "worker", "guest"] {
            assert!(has_higher_or_equal_role("admin", required), "{required}");
        }
    }

    #[test]
    fn homeowner_and_worker_tie() {
        assert!(has_higher_or_equal_role("homeowner", "worker"));
        assert!(has_higher_or_equal_role("worker", "homeowner"));
        assert!(!has_higher_or_equal_role("worker", "admin"));
    }

    #[test]
    fn guest_ranks_lowest() {
        assert!(has_higher_or_equal_role("guest", "guest"));
        assert!(!has_higher_or_equal_role("guest", "worker"));
    }

    #[test]
    fn unknown_roles_compare_false() {
        assert!(!has_higher_or_equal_role("root", "guest"));
        assert!(!has_higher_or_equal_role("admin", "root"));
    }
}
