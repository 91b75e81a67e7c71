use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Counters for token issuance and verification outcomes.
#[derive(Clone)]
pub struct TokenMetrics {
    registry: Registry,
    issued: IntCounterVec,
    verifications: IntCounterVec,
}

impl TokenMetrics {
    pub fn new() -> prometheus::Result<Self> {
        Self::with_registry(Registry::new())
    }

    /// Register the counters in a caller-owned registry.
    pub fn with_registry(registry: Registry) -> prometheus::Result<Self> {
        let issued = IntCounterVec::new(
            Opts::new("auth_tokens_issued_total", "Count of tokens issued by kind"),
            &["kind"],
        )?;
        registry.register(Box::new(issued.clone()))?;

        let verifications = IntCounterVec::new(
            Opts::new(
                "auth_token_verifications_total",
                "Count of token verifications grouped by outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(verifications.clone()))?;

        Ok(Self {
            registry,
            issued,
            verifications,
        })
    }

    pub fn token_issued(&self, kind: &str) {
        self.issued.with_label_values(&[kind]).inc();
    }

    pub fn verification(&self, outcome: &str) {
        self.verifications.with_label_values(&[outcome]).inc();
    }

    pub fn verification_count(&self, outcome: &str) -> u64 {
        self.verifications.with_label_values(&[outcome]).get()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Prometheus text exposition of every counter in the registry.
    pub fn render(&self) -> prometheus::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_render_in_text_format() {
        let metrics = TokenMetrics::new().expect("metrics");
        metrics.token_issued("access");
        metrics.verification("ok");
        metrics.verification("ok");
        metrics.verification("expired");

        assert_eq!(metrics.verification_count("ok"), 2);
        let text = metrics.render().expect("render");
        assert!(text.contains("auth_tokens_issued_total{kind=\"access\"} 1"));
        assert!(text.contains("auth_token_verifications_total{outcome=\"expired\"} 1"));
    }
}
