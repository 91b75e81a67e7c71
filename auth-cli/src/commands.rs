use anyhow::{anyhow, Result};
use serde_json::{json, Value};

use common_auth::{
    decode_unverified, KeyConfig, KeyManager, KeySource, Role, TokenService, TokenSubject,
};
use common_identity::{format_for_display, IdentityDocumentParser};
use common_security::{
    can_access_route, has_higher_or_equal_role, has_permission, role_permissions, role_resources,
    role_routes,
};

pub fn keys_report(keys: &KeyManager, config: &KeyConfig) -> Value {
    let (source, persisted) = match keys.source() {
        KeySource::Loaded => ("loaded", true),
        KeySource::Generated { persisted } => ("generated", persisted),
    };
    json!({
        "source": source,
        "persisted": persisted,
        "privateKeyPath": config.private_key_path().display().to_string(),
        "publicKeyPath": config.public_key_path().display().to_string(),
        "publicKey": keys.public_key_pem(),
    })
}

pub fn issue(
    tokens: &TokenService,
    subject: &TokenSubject,
    ttl_seconds: Option<i64>,
    refresh: bool,
) -> Result<Value> {
    let token = match (refresh, ttl_seconds) {
        (true, _) => tokens.issue_refresh(subject)?,
        (false, Some(ttl)) => tokens.issue_with_ttl(subject, ttl)?,
        (false, None) => tokens.issue(subject)?,
    };
    let payload = decode_unverified(&token)
        .ok_or_else(|| anyhow!("Issued token could not be decoded"))?;
    Ok(json!({ "token": token, "payload": payload }))
}

pub fn token_subject(user_id: &str, email: &str, role: &str) -> Result<TokenSubject> {
    let role: Role = role.parse()?;
    if !role.can_hold_token() {
        return Err(anyhow!("Role '{role}' cannot be issued a token"));
    }
    Ok(TokenSubject::new(user_id, email, role))
}

/// Returns the report plus whether the token was accepted.
pub fn verify(tokens: &TokenService, token: &str) -> (Value, bool) {
    match tokens.verify(token) {
        Ok(payload) => (json!({ "valid": true, "payload": payload }), true),
        Err(err) => (
            json!({ "valid": false, "error": err.kind(), "message": err.to_string() }),
            false,
        ),
    }
}

pub fn decode(token: &str) -> Value {
    json!({
        "verified": false,
        "payload": decode_unverified(token),
    })
}

pub fn check(role: &str, resource: &str, action: &str) -> Value {
    json!({
        "role": role,
        "resource": resource,
        "action": action,
        "allowed": has_permission(role, resource, action),
    })
}

pub fn route(role: &str, route: &str) -> Value {
    json!({
        "role": role,
        "route": route,
        "allowed": can_access_route(role, route),
    })
}

pub fn permissions(role: &str, compare_to: Option<&str>) -> Value {
    let mut report = json!({
        "role": role,
        "resources": role_resources(role),
        "permissions": role_permissions(role),
        "routes": role_routes(role),
    });
    if let Some(other) = compare_to {
        report["rankAtLeast"] = json!({
            "role": other,
            "result": has_higher_or_equal_role(role, other),
        });
    }
    report
}

pub fn parse_id(parser: &IdentityDocumentParser, id: &str) -> (Value, bool) {
    let parsed = parser.parse(id);
    let valid = parsed.is_valid;
    let mut report = json!(parsed);
    report["shortFormAccepted"] = json!(parser.validate(id));
    (report, valid)
}

pub fn format_id(id: &str) -> Value {
    json!({ "input": id, "display": format_for_display(id) })
}
