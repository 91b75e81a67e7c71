//! Signing key lifecycle.
//!
//! A single RSA key pair signs every token for the life of the process. On
//! start-up the pair is loaded from `KeyConfig::key_dir`; when that fails a new
//! pair is generated and written back so tokens survive a restart. Failing to
//! write is logged and otherwise ignored: the in-memory pair stays usable.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use jsonwebtoken::{DecodingKey, EncodingKey};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::rand_core::OsRng;
use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::{info, warn};

use crate::config::KeyConfig;
use crate::error::{AuthError, AuthResult, KeyError};

#[cfg(unix)]
const PRIVATE_KEY_MODE: u32 = 0o600;
#[cfg(unix)]
const PUBLIC_KEY_MODE: u32 = 0o644;

/// PEM-encoded RSA key pair: PKCS#8 private key, SPKI public key.
#[derive(Clone)]
pub struct KeyPair {
    private_pem: String,
    public_pem: String,
}

impl KeyPair {
    pub fn generate(bits: usize) -> AuthResult<Self> {
        let private_key = RsaPrivateKey::new(&mut OsRng, bits)
            .map_err(|err| AuthError::KeyGeneration(err.to_string()))?;
        let public_key = private_key.to_public_key();

        let private_pem = private_key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|err| AuthError::KeyEncoding(err.to_string()))?
            .to_string();
        let public_pem = public_key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|err| AuthError::KeyEncoding(err.to_string()))?;

        Ok(Self {
            private_pem,
            public_pem,
        })
    }

    /// Accepts PKCS#8 or PKCS#1 private keys and SPKI or PKCS#1 public keys,
    /// and rejects halves that do not belong together.
    pub fn from_pem(private_pem: impl Into<String>, public_pem: impl Into<String>) -> AuthResult<Self> {
        let pair = Self {
            private_pem: private_pem.into(),
            public_pem: public_pem.into(),
        };
        let private_key = parse_private_key(&pair.private_pem)?;
        let public_key = parse_public_key(&pair.public_pem)?;
        if private_key.to_public_key() != public_key {
            return Err(AuthError::KeyParse(
                "public key does not match private key".to_string(),
            ));
        }
        Ok(pair)
    }

    pub fn private_pem(&self) -> &str {
        &self.private_pem
    }

    pub fn public_pem(&self) -> &str {
        &self.public_pem
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_pem", &"<redacted>")
            .field("public_pem", &"<PEM>")
            .finish()
    }
}

fn parse_private_key(pem: &str) -> AuthResult<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|err| AuthError::KeyParse(format!("private key: {err}")))
}

fn parse_public_key(pem: &str) -> AuthResult<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|err| AuthError::KeyParse(format!("public key: {err}")))
}

/// How the active key pair came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Loaded,
    Generated { persisted: bool },
}

/// Owns the process-wide signing key pair. Construct once at start-up and
/// share by reference (or `Arc`); the keys never change afterwards.
pub struct KeyManager {
    pair: KeyPair,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    source: KeySource,
}

impl KeyManager {
    /// Load the pair from disk, or generate (and try to persist) a new one.
    ///
    /// Only key generation itself can fail; load and persist problems are
    /// logged and absorbed.
    pub fn initialize(config: &KeyConfig) -> AuthResult<Self> {
        match load_pair(config) {
            Ok(pair) => {
                info!(dir = %config.key_dir.display(), "loaded signing key pair");
                return Self::with_source(pair, KeySource::Loaded);
            }
            Err(err) if is_first_run(config) => {
                info!(reason = %err, "no signing key pair on disk, generating one");
            }
            Err(err) => {
                warn!(error = %err, "stored signing key pair unusable, generating a new one");
            }
        }

        let pair = KeyPair::generate(config.modulus_bits)?;
        let persisted = if config.persist {
            match persist_pair(config, &pair) {
                Ok(()) => {
                    info!(dir = %config.key_dir.display(), "persisted signing key pair");
                    true
                }
                Err(err) => {
                    warn!(error = %err, "keeping signing key pair in memory only");
                    false
                }
            }
        } else {
            false
        };

        Self::with_source(pair, KeySource::Generated { persisted })
    }

    /// Wrap an externally supplied pair (never touches the filesystem).
    pub fn from_pair(pair: KeyPair) -> AuthResult<Self> {
        Self::with_source(pair, KeySource::Loaded)
    }

    fn with_source(pair: KeyPair, source: KeySource) -> AuthResult<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(pair.private_pem.as_bytes())
            .map_err(|err| AuthError::KeyParse(format!("private key: {err}")))?;
        let decoding_key = DecodingKey::from_rsa_pem(pair.public_pem.as_bytes())
            .map_err(|err| AuthError::KeyParse(format!("public key: {err}")))?;
        Ok(Self {
            pair,
            encoding_key,
            decoding_key,
            source,
        })
    }

    pub fn private_key_pem(&self) -> &str {
        self.pair.private_pem()
    }

    pub fn public_key_pem(&self) -> &str {
        self.pair.public_pem()
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    pub fn source(&self) -> KeySource {
        self.source
    }
}

impl fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyManager")
            .field("pair", &self.pair)
            .field("source", &self.source)
            .finish()
    }
}

fn is_first_run(config: &KeyConfig) -> bool {
    !config.private_key_path().exists() && !config.public_key_path().exists()
}

fn load_pair(config: &KeyConfig) -> Result<KeyPair, KeyError> {
    let private_path = config.private_key_path();
    let public_path = config.public_key_path();

    let private_pem = read_pem(&private_path)?;
    let public_pem = read_pem(&public_path)?;

    KeyPair::from_pem(private_pem, public_pem).map_err(|err| KeyError::Load {
        path: config.key_dir.display().to_string(),
        reason: err.to_string(),
    })
}

fn read_pem(path: &Path) -> Result<String, KeyError> {
    fs::read_to_string(path).map_err(|err| KeyError::Load {
        path: path.display().to_string(),
        reason: err.to_string(),
    })
}

fn persist_pair(config: &KeyConfig, pair: &KeyPair) -> Result<(), KeyError> {
    let persist_err = |path: &Path, err: io::Error| KeyError::Persist {
        path: path.display().to_string(),
        reason: err.to_string(),
    };

    fs::create_dir_all(&config.key_dir).map_err(|err| persist_err(&config.key_dir, err))?;

    let private_path = config.private_key_path();
    write_key_file(&private_path, pair.private_pem(), true)
        .map_err(|err| persist_err(&private_path, err))?;

    let public_path = config.public_key_path();
    write_key_file(&public_path, pair.public_pem(), false)
        .map_err(|err| persist_err(&public_path, err))?;

    Ok(())
}

fn write_key_file(path: &Path, contents: &str, secret: bool) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(if secret { PRIVATE_KEY_MODE } else { PUBLIC_KEY_MODE });
    }

    let mut file = options.open(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;

    // The mode passed to open() only applies to newly created files.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = if secret { PRIVATE_KEY_MODE } else { PUBLIC_KEY_MODE };
        fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    let _ = secret;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_run_detection_requires_both_files_absent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = KeyConfig::new(dir.path());
        assert!(is_first_run(&config));

        fs::write(config.public_key_path(), "stale").expect("write");
        assert!(!is_first_run(&config));
    }

    #[test]
    fn load_reports_missing_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = KeyConfig::new(dir.path().join("absent"));
        let err = load_pair(&config).expect_err("nothing to load");
        assert!(matches!(err, KeyError::Load { .. }));
    }

    #[test]
    fn garbage_pem_is_rejected() {
        let err = KeyPair::from_pem("not a key", "also not a key").expect_err("garbage");
        assert!(matches!(err, AuthError::KeyParse(_)));
    }

    #[cfg(unix)]
    #[test]
    fn key_files_get_restrictive_modes() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let secret = dir.path().join("private.pem");
        let public = dir.path().join("public.pem");
        fs::write(&secret, "old").expect("seed file");
        fs::set_permissions(&secret, fs::Permissions::from_mode(0o666)).expect("chmod");

        write_key_file(&secret, "secret", true).expect("write secret");
        write_key_file(&public, "public", false).expect("write public");

        let secret_mode = fs::metadata(&secret).expect("meta").permissions().mode() & 0o777;
        let public_mode = fs::metadata(&public).expect("meta").permissions().mode() & 0o777;
        assert_eq!(secret_mode, 0o600);
        assert_eq!(public_mode, 0o644);
        assert_eq!(fs::read_to_string(&secret).expect("read"), "secret");
    }
}
