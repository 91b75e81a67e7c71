use common_auth::Role;

const ADMIN_ROUTES: &[&str] = &[
    "/admin",
    "/dashboard",
    "/users",
    "/workers",
    "/homeowners",
    "/bookings",
    "/payments",
    "/reports",
    "/settings",
    "/profile",
];
const HOMEOWNER_ROUTES: &[&str] = &[
    "/homeowner",
    "/bookings",
    "/services",
    "/workers",
    "/payments",
    "/favorites",
    "/profile",
];
const WORKER_ROUTES: &[&str] = &[
    "/worker",
    "/jobs",
    "/bookings",
    "/availability",
    "/earnings",
    "/profile",
];
const GUEST_ROUTES: &[&str] = &["/login", "/register", "/services", "/about", "/contact"];

/// Path prefixes `role` may open. Unknown roles get nothing.
pub fn role_routes(role: &str) -> &'static [&'static str] {
    match Role::parse(role) {
        Some(Role::Admin) => ADMIN_ROUTES,
        Some(Role::Homeowner) => HOMEOWNER_ROUTES,
        Some(Role::Worker) => WORKER_ROUTES,
        Some(Role::Guest) => GUEST_ROUTES,
        None => &[],
    }
}

/// Plain string-prefix match: `/admin` also admits `/administration`.
pub fn can_access_route(role: &str, route: &str) -> bool {
    role_routes(role)
        .iter()
        .any(|prefix| route.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_admit_nested_paths() {
        assert!(can_access_route("worker", "/jobs/123/accept"));
        assert!(can_access_route("admin", "/admin/users"));
        assert!(can_access_route("guest", "/services?category=plumbing"));
    }

    #[test]
    fn other_roles_sections_are_denied() {
        assert!(!can_access_route("worker", "/admin"));
        assert!(!can_access_route("homeowner", "/jobs"));
        assert!(!can_access_route("guest", "/bookings"));
    }

    #[test]
    fn no_role_can_open_everything() {
        for role in ["admin", "homeowner", "worker", "guest"] {
            assert!(!role_routes(role).contains(&"/"), "{role}");
            assert!(!can_access_route(role, "/internal/metrics"), "{role}");
        }
    }

    #[test]
    fn unknown_role_is_denied() {
        assert!(role_routes("root").is_empty());
        assert!(!can_access_route("root", "/admin"));
        assert!(!can_access_route("", "/login"));
    }
}
