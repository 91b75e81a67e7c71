use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{crypto, Algorithm};
use serde_json::Value;
use tracing::debug;

use crate::claims::{TokenHeader, TokenPayload, TokenSubject};
use crate::codec;
use crate::config::TokenConfig;
use crate::error::{AuthError, AuthResult, VerifyError};
use crate::keys::KeyManager;
use crate::metrics::TokenMetrics;

/// Issues and verifies compact RS256 tokens
/// (`base64url(header).base64url(payload).base64url(signature)`).
///
/// Holds no mutable state; clone or share behind an `Arc` freely.
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<KeyManager>,
    config: TokenConfig,
    metrics: Option<TokenMetrics>,
}

impl TokenService {
    pub fn new(keys: Arc<KeyManager>) -> Self {
        Self::with_config(keys, TokenConfig::default())
    }

    pub fn with_config(keys: Arc<KeyManager>, config: TokenConfig) -> Self {
        Self {
            keys,
            config,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: TokenMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn keys(&self) -> &KeyManager {
        &self.keys
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Access token with the configured lifetime (one day by default).
    pub fn issue(&self, subject: &TokenSubject) -> AuthResult<String> {
        self.issue_with_ttl(subject, self.config.access_ttl_seconds)
    }

    /// Refresh token with the configured refresh lifetime (thirty days by default).
    pub fn issue_refresh(&self, subject: &TokenSubject) -> AuthResult<String> {
        let token = self.issue_at(subject, self.config.refresh_ttl_seconds, Utc::now().timestamp())?;
        self.record_issued("refresh");
        Ok(token)
    }

    pub fn issue_with_ttl(&self, subject: &TokenSubject, ttl_seconds: i64) -> AuthResult<String> {
        let token = self.issue_at(subject, ttl_seconds, Utc::now().timestamp())?;
        self.record_issued("access");
        Ok(token)
    }

    /// Deterministic issuance against an explicit clock reading (unix seconds).
    pub fn issue_at(&self, subject: &TokenSubject, ttl_seconds: i64, now: i64) -> AuthResult<String> {
        let payload = TokenPayload {
            user_id: subject.user_id.clone(),
            email: subject.email.clone(),
            role: subject.role,
            iat: now,
            exp: now.saturating_add(ttl_seconds),
        };

        let header = codec::encode_segment(&TokenHeader::default())?;
        let claims = codec::encode_segment(&payload)?;
        let signing_input = format!("{header}.{claims}");

        let signature = crypto::sign(
            signing_input.as_bytes(),
            self.keys.encoding_key(),
            Algorithm::RS256,
        )
        .map_err(|err| AuthError::Signing(err.to_string()))?;

        Ok(format!("{signing_input}.{signature}"))
    }

    /// Check signature, claims and expiry. Never panics on untrusted input.
    pub fn verify(&self, token: &str) -> Result<TokenPayload, VerifyError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    pub fn verify_at(&self, token: &str, now: i64) -> Result<TokenPayload, VerifyError> {
        let outcome = self.check(token, now);
        match &outcome {
            Ok(payload) => {
                debug!(user_id = %payload.user_id, role = %payload.role, "verified token");
                self.record_verification("ok");
            }
            Err(err) => {
                debug!(kind = err.kind(), "token rejected");
                self.record_verification(err.kind());
            }
        }
        outcome
    }

    fn check(&self, token: &str, now: i64) -> Result<TokenPayload, VerifyError> {
        let (signing_input, payload_segment, signature) = split_token(token)?;

        let signature_ok = crypto::verify(
            signature,
            signing_input.as_bytes(),
            self.keys.decoding_key(),
            Algorithm::RS256,
        )
        .unwrap_or(false);
        if !signature_ok {
            return Err(VerifyError::InvalidSignature);
        }

        let payload = decode_payload(payload_segment)?;
        if payload.is_expired_at(now) {
            return Err(VerifyError::ExpiredToken {
                expired_at: payload.exp,
            });
        }
        Ok(payload)
    }

    /// Read the claims without checking the signature or expiry.
    ///
    /// For logging and debugging only: anyone can forge a payload that decodes,
    /// so never make an access decision from this.
    pub fn decode(&self, token: &str) -> Option<TokenPayload> {
        decode_unverified(token)
    }

    fn record_issued(&self, kind: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.token_issued(kind);
        }
    }

    fn record_verification(&self, outcome: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.verification(outcome);
        }
    }
}

/// See [`TokenService::decode`]; usable without a key pair.
pub fn decode_unverified(token: &str) -> Option<TokenPayload> {
    let (_, payload_segment, _) = split_token(token).ok()?;
    decode_payload(payload_segment).ok()
}

/// Returns (`header.payload`, payload, signature).
fn split_token(token: &str) -> Result<(&str, &str, &str), VerifyError> {
    let mut parts = token.split('.');
    let (header, payload, signature) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(p), Some(s), None) => (h, p, s),
        _ => {
            return Err(VerifyError::MalformedToken(
                "expected three dot-separated segments".to_string(),
            ))
        }
    };
    if header.is_empty() || payload.is_empty() || signature.is_empty() {
        return Err(VerifyError::MalformedToken("empty segment".to_string()));
    }
    let signing_input = &token[..header.len() + 1 + payload.len()];
    Ok((signing_input, payload, signature))
}

fn decode_payload(segment: &str) -> Result<TokenPayload, VerifyError> {
    let value: Value = codec::decode_segment(segment)
        .map_err(|err| VerifyError::MalformedToken(err.to_string()))?;
    TokenPayload::try_from(value).map_err(|err| VerifyError::MalformedToken(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_requires_exactly_three_segments() {
        assert!(split_token("a.b.c").is_ok());
        for bad in ["", "abc", "a.b", "a.b.c.d", "a..c", ".b.c", "a.b."] {
            let err = split_token(bad).expect_err(bad);
            assert!(matches!(err, VerifyError::MalformedToken(_)), "{bad}");
        }
    }

    #[test]
    fn signing_input_covers_header_and_payload() {
        let (input, payload, signature) = split_token("hdr.body.sig").expect("split");
        assert_eq!(input, "hdr.body");
        assert_eq!(payload, "body");
        assert_eq!(signature, "sig");
    }

    #[test]
    fn decode_unverified_reads_forged_payload() {
        let payload = serde_json::json!({
            "userId": "u-9", "email": "x@example.com", "role": "admin", "iat": 1, "exp": 2
        });
        let forged = format!(
            "{}.{}.{}",
            codec::encode_segment(&TokenHeader::default()).expect("header"),
            codec::encode_segment(&payload).expect("payload"),
            "bm90LWEtc2lnbmF0dXJl"
        );
        let decoded = decode_unverified(&forged).expect("decodes without a key");
        assert_eq!(decoded.user_id, "u-9");
    }

    #[test]
    fn decode_unverified_returns_none_for_garbage() {
        assert!(decode_unverified("not-a-token").is_none());
        assert!(decode_unverified("a.!!!.c").is_none());
    }
}
