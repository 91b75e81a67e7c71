use std::path::PathBuf;

pub const DEFAULT_KEY_DIR: &str = ".keys";
pub const PRIVATE_KEY_FILE: &str = "private.pem";
pub const PUBLIC_KEY_FILE: &str = "public.pem";
pub const DEFAULT_MODULUS_BITS: usize = 2048;

pub const ACCESS_TTL_SECONDS: i64 = 24 * 60 * 60;
pub const REFRESH_TTL_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Where the signing key pair lives on disk and how new pairs are generated.
#[derive(Debug, Clone)]
pub struct KeyConfig {
    /// Directory holding both PEM files, relative to the working directory by default.
    pub key_dir: PathBuf,
    pub private_key_file: String,
    pub public_key_file: String,
    /// RSA modulus size for freshly generated pairs.
    pub modulus_bits: usize,
    /// Write freshly generated pairs to `key_dir`.
    pub persist: bool,
}

impl KeyConfig {
    pub fn new(key_dir: impl Into<PathBuf>) -> Self {
        Self {
            key_dir: key_dir.into(),
            ..Self::default()
        }
    }

    /// Keep generated keys in memory only.
    pub fn ephemeral(mut self) -> Self {
        self.persist = false;
        self
    }

    pub fn private_key_path(&self) -> PathBuf {
        self.key_dir.join(&self.private_key_file)
    }

    pub fn public_key_path(&self) -> PathBuf {
        self.key_dir.join(&self.public_key_file)
    }
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            key_dir: PathBuf::from(DEFAULT_KEY_DIR),
            private_key_file: PRIVATE_KEY_FILE.to_string(),
            public_key_file: PUBLIC_KEY_FILE.to_string(),
            modulus_bits: DEFAULT_MODULUS_BITS,
            persist: true,
        }
    }
}

/// Lifetimes applied by `TokenService::issue` and `TokenService::issue_refresh`.
#[derive(Debug, Clone, Copy)]
pub struct TokenConfig {
    pub access_ttl_seconds: i64,
    pub refresh_ttl_seconds: i64,
}

impl TokenConfig {
    pub fn with_access_ttl(mut self, seconds: i64) -> Self {
        self.access_ttl_seconds = seconds;
        self
    }

    pub fn with_refresh_ttl(mut self, seconds: i64) -> Self {
        self.refresh_ttl_seconds = seconds;
        self
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            access_ttl_seconds: ACCESS_TTL_SECONDS,
            refresh_ttl_seconds: REFRESH_TTL_SECONDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_live_under_hidden_dir() {
        let config = KeyConfig::default();
        assert_eq!(config.private_key_path(), PathBuf::from(".keys/private.pem"));
        assert_eq!(config.public_key_path(), PathBuf::from(".keys/public.pem"));
        assert!(config.persist);
    }

    #[test]
    fn refresh_ttl_is_thirty_days() {
        let config = TokenConfig::default();
        assert_eq!(config.access_ttl_seconds, 86_400);
        assert_eq!(config.refresh_ttl_seconds, 2_592_000);
    }
}
