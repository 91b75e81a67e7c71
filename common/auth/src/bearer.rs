/// Pull the token out of an `Authorization: Bearer <token>` header value.
///
/// Returns `None` for any other scheme or an empty token; the HTTP layer turns
/// that into a 401 without calling the verifier.
pub fn parse_bearer(header_value: &str) -> Option<&str> {
    let token = header_value.trim().strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
