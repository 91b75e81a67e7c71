use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::PathBuf;

use common_auth::{KeyConfig, TokenConfig};

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub keys: KeyConfig,
    pub tokens: TokenConfig,
}

pub fn load_config() -> Result<CliConfig> {
    let mut keys = match env::var("AUTH_KEY_DIR").ok().and_then(|v| normalize_optional(&v)) {
        Some(dir) => KeyConfig::new(PathBuf::from(dir)),
        None => KeyConfig::default(),
    };
    if let Some(persist) = bool_from_env("AUTH_PERSIST_KEYS") {
        keys.persist = persist;
    }

    let mut tokens = TokenConfig::default();
    if let Some(ttl) = seconds_from_env("AUTH_ACCESS_TTL_SECONDS")
        .context("Failed to parse AUTH_ACCESS_TTL_SECONDS")?
    {
        tokens = tokens.with_access_ttl(ttl);
    }
    if let Some(ttl) = seconds_from_env("AUTH_REFRESH_TTL_SECONDS")
        .context("Failed to parse AUTH_REFRESH_TTL_SECONDS")?
    {
        tokens = tokens.with_refresh_ttl(ttl);
    }

    Ok(CliConfig { keys, tokens })
}

fn bool_from_env(key: &str) -> Option<bool> {
    env::var(key).ok().map(|value| {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn seconds_from_env(key: &str) -> Result<Option<i64>> {
    match env::var(key).ok().and_then(|v| normalize_optional(&v)) {
        Some(value) => parse_seconds(&value).map(Some),
        None => Ok(None),
    }
}

fn parse_seconds(value: &str) -> Result<i64> {
    let seconds: i64 = value
        .parse()
        .map_err(|err| anyhow!("Invalid number of seconds '{value}': {err}"))?;
    if seconds <= 0 {
        return Err(anyhow!("Token lifetime must be positive, got {seconds}"));
    }
    Ok(seconds)
}

fn normalize_optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_from_env_parses() {
        std::env::set_var("AUTH_CLI_TEST_BOOL_TRUE", "true");
        std::env::set_var("AUTH_CLI_TEST_BOOL_ONE", "1");
        std::env::set_var("AUTH_CLI_TEST_BOOL_FALSE", "no");
        assert_eq!(bool_from_env("AUTH_CLI_TEST_BOOL_TRUE"), Some(true));
        assert_eq!(bool_from_env("AUTH_CLI_TEST_BOOL_ONE"), Some(true));
        assert_eq!(bool_from_env("AUTH_CLI_TEST_BOOL_FALSE"), Some(false));
        assert_eq!(bool_from_env("AUTH_CLI_TEST_BOOL_UNSET"), None);
    }

    #[test]
    fn parse_seconds_rejects_garbage_and_non_positive() {
        assert_eq!(parse_seconds("3600").expect("valid"), 3600);
        assert!(parse_seconds("soon").is_err());
        assert!(parse_seconds("0").is_err());
        assert!(parse_seconds("-5").is_err());
    }

    #[test]
    fn normalize_optional_drops_blank_values() {
        assert_eq!(normalize_optional("  "), None);
        assert_eq!(normalize_optional(" /tmp/keys "), Some("/tmp/keys".to_string()));
    }
}
