use tracing::warn;

use crate::context::SecurityContext;
use crate::error::SecurityError;
use crate::registry;
use crate::routes;

/// A `(resource, action)` pair a caller must hold.
pub type Requirement<'a> = (&'a str, &'a str);

/// Fail closed: unknown role, unknown resource or unlisted action all deny.
pub fn has_permission(role: &str, resource: &str, action: &str) -> bool {
    registry::lookup(role, resource).is_some_and(|permission| permission.allows(action))
}

/// False for an empty requirement list.
pub fn has_any_permission(role: &str, requirements: &[Requirement<'_>]) -> bool {
    requirements
        .iter()
        .any(|(resource, action)| has_permission(role, resource, action))
}

/// True for an empty requirement list.
pub fn has_all_permissions(role: &str, requirements: &[Requirement<'_>]) -> bool {
    requirements
        .iter()
        .all(|(resource, action)| has_permission(role, resource, action))
}

pub fn ensure_permission(
    ctx: &SecurityContext,
    resource: &str,
    action: &str,
) -> Result<(), SecurityError> {
    if has_permission(ctx.role.as_str(), resource, action) {
        return Ok(());
    }
    warn!(user_id = %ctx.user_id, role = %ctx.role, resource, action, "permission_check_failed");
    Err(forbidden(ctx, resource, action))
}

pub fn ensure_any_permission(
    ctx: &SecurityContext,
    requirements: &[Requirement<'_>],
) -> Result<(), SecurityError> {
    if has_any_permission(ctx.role.as_str(), requirements) {
        return Ok(());
    }
    warn!(user_id = %ctx.user_id, role = %ctx.role, ?requirements, "any_permission_check_failed");
    Err(forbidden_list(ctx, requirements))
}

pub fn ensure_all_permissions(
    ctx: &SecurityContext,
    requirements: &[Requirement<'_>],
) -> Result<(), SecurityError> {
    let missing: Vec<Requirement<'_>> = requirements
        .iter()
        .copied()
        .filter(|(resource, action)| !has_permission(ctx.role.as_str(), resource, action))
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    warn!(user_id = %ctx.user_id, role = %ctx.role, ?missing, "all_permissions_check_failed");
    Err(forbidden_list(ctx, &missing))
}

pub fn ensure_route(ctx: &SecurityContext, route: &str) -> Result<(), SecurityError> {
    if routes::can_access_route(ctx.role.as_str(), route) {
        return Ok(());
    }
    warn!(user_id = %ctx.user_id, role = %ctx.role, route, "route_check_failed");
    Err(SecurityError::RouteForbidden {
        role: ctx.role.to_string(),
        route: route.to_string(),
    })
}

fn forbidden(ctx: &SecurityContext, resource: &str, action: &str) -> SecurityError {
    SecurityError::Forbidden {
        role: ctx.role.to_string(),
        resource: resource.to_string(),
        action: action.to_string(),
    }
}

fn forbidden_list(ctx: &SecurityContext, requirements: &[Requirement<'_>]) -> SecurityError {
    let (resources, actions): (Vec<&str>, Vec<&str>) = requirements.iter().copied().unzip();
    SecurityError::Forbidden {
        role: ctx.role.to_string(),
        resource: resources.join("|"),
        action: actions.join("|"),
    }
}
