use std::sync::Arc;

use common_auth::{KeyManager, KeyPair, Role, TokenService, TokenSubject, VerifyError};
use common_security::{
    ensure_permission, ensure_route, has_higher_or_equal_role, has_permission, permissions_of,
    SecurityContext, SecurityError,
};

fn token_service() -> TokenService {
    let pair = KeyPair::generate(2048).expect("key generation");
    TokenService::new(Arc::new(KeyManager::from_pair(pair).expect("key manager")))
}

#[test]
fn bearer_token_gates_protected_actions() {
    let tokens = token_service();

    let worker = tokens
        .issue(&TokenSubject::new("w-1", "w@example.com", Role::Worker))
        .expect("issue");
    let header = format!("Bearer {worker}");
    let ctx = SecurityContext::from_bearer(&tokens, Some(&header)).expect("context");
    assert_eq!(ctx.user_id, "w-1");
    assert_eq!(ctx.role, Role::Worker);

    ensure_permission(&ctx, "bookings", "update").expect("workers update bookings");
    assert!(ensure_permission(&ctx, "bookings", "delete").is_err());
    ensure_route(&ctx, "/jobs/17").expect("worker area");

    let missing = SecurityContext::from_bearer(&tokens, None).expect_err("no header");
    assert_eq!(missing, SecurityError::MissingToken);
    assert!(missing.is_unauthenticated());

    let basic = SecurityContext::from_bearer(&tokens, Some("Basic dXNlcjpwdw==")).expect_err("basic");
    assert_eq!(basic, SecurityError::MissingToken);

    let expired = tokens
        .issue_with_ttl(&TokenSubject::new("h-1", "h@example.com", Role::Homeowner), -1)
        .expect("issue");
    let err = SecurityContext::from_bearer(&tokens, Some(&format!("Bearer {expired}")))
        .expect_err("expired");
    assert!(matches!(
        err,
        SecurityError::InvalidToken(VerifyError::ExpiredToken { .. })
    ));
}

#[test]
fn equal_rank_does_not_imply_equal_permissions() {
    assert!(has_higher_or_equal_role("worker", "homeowner"));
    assert!(has_higher_or_equal_role("homeowner", "worker"));

    for permission in permissions_of(Role::Homeowner) {
        for action in permission.actions {
            assert!(
                !has_permission("worker", permission.resource, action),
                "worker unexpectedly holds {}:{action}",
                permission.resource
            );
        }
    }
    for permission in permissions_of(Role::Worker) {
        for action in permission.actions {
            assert!(
                !has_permission("homeowner", permission.resource, action),
                "homeowner unexpectedly holds {}:{action}",
                permission.resource
            );
        }
    }
}

#[test]
fn admin_holds_a_superset_of_guest_grants() {
    for permission in permissions_of(Role::Guest) {
        for action in permission.actions {
            assert!(has_permission("admin", permission.resource, action));
        }
    }
}
