//! Token verification: key ring management, signing, and claim decoding.

use std::path::Path;
use std::sync::{Arc, RwLock};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::config::SecretSource;

/// Decoded payload of a verified token.
///
/// The gate does not impose a claim schema; whatever object the issuer signed
/// is handed to downstream handlers as-is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(pub Map<String, Value>);

impl Claims {
    /// Subject claim, if the issuer set one.
    pub fn sub(&self) -> Option<&str> {
        self.0.get("sub").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("no signing secrets configured")]
    Empty,

    #[error("signing secret #{0} is blank")]
    BlankSecret(usize),

    #[error("failed to read secrets file {path}: {source}")]
    Source {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Shared-secret key material used to verify bearer tokens.
///
/// The first secret is the primary (used for signing); the rest are older
/// secrets still accepted for verification while a rotation is in progress.
/// Cloning is cheap and every clone observes reloads.
#[derive(Clone)]
pub struct KeyRing {
    keys: Arc<RwLock<Arc<Vec<Secret>>>>,
    source: SecretSource,
    leeway_secs: u64,
}

struct Secret {
    bytes: Vec<u8>,
    fingerprint: String,
}

impl Secret {
    fn new(raw: &str) -> Self {
        let digest = Sha256::digest(raw.as_bytes());
        Self {
            bytes: raw.as_bytes().to_vec(),
            fingerprint: hex::encode(&digest[..4]),
        }
    }
}

impl std::fmt::Debug for KeyRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyRing")
            .field("fingerprints", &self.fingerprints())
            .field("source", &self.source)
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}

impl KeyRing {
    /// Build the ring from its configured source, rejecting empty key material.
    pub fn load(source: SecretSource, leeway_secs: u64) -> Result<Self, KeyError> {
        let secrets = read_secrets(&source)?;
        Ok(Self {
            keys: Arc::new(RwLock::new(Arc::new(secrets))),
            source,
            leeway_secs,
        })
    }

    /// Re-read the source and swap in the new secrets.
    ///
    /// On error the current secrets stay active. Returns the number of
    /// secrets now loaded.
    pub fn reload(&self) -> Result<usize, KeyError> {
        let secrets = read_secrets(&self.source)?;
        let count = secrets.len();
        let mut guard = self.keys.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(secrets);
        Ok(count)
    }

    /// Short SHA-256 prefixes of the loaded secrets, primary first.
    pub fn fingerprints(&self) -> Vec<String> {
        self.snapshot()
            .iter()
            .map(|s| s.fingerprint.clone())
            .collect()
    }

    /// Verify signature, `exp` and `nbf`, returning the decoded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, KeyError> {
        let validation = self.validation();
        let keys = self.snapshot();

        let mut last_err = None;
        for secret in keys.iter() {
            let key = DecodingKey::from_secret(&secret.bytes);
            match jsonwebtoken::decode::<Claims>(token, &key, &validation) {
                Ok(data) => return Ok(data.claims),
                Err(e) if matches!(e.kind(), ErrorKind::InvalidSignature) => {
                    last_err = Some(e);
                }
                // Anything other than a signature mismatch does not depend on
                // which secret was tried.
                Err(e) => return Err(KeyError::InvalidToken(e)),
            }
        }

        Err(last_err.map_or(KeyError::Empty, KeyError::InvalidToken))
    }

    /// Sign `claims` with the primary secret using HS256.
    pub fn sign(&self, claims: &Claims) -> Result<String, KeyError> {
        let keys = self.snapshot();
        let primary = keys.first().ok_or(KeyError::Empty)?;
        let key = EncodingKey::from_secret(&primary.bytes);
        jsonwebtoken::encode(&Header::default(), claims, &key)
            .map_err(|e| KeyError::Signing(e.to_string()))
    }

    fn snapshot(&self) -> Arc<Vec<Secret>> {
        self.keys.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // `exp` is checked when present but not mandatory; issuers may mint
        // non-expiring tokens.
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = self.leeway_secs;
        validation
    }
}

fn read_secrets(source: &SecretSource) -> Result<Vec<Secret>, KeyError> {
    let raw = match source {
        SecretSource::Inline(secrets) => secrets.clone(),
        SecretSource::File(path) => parse_secrets_file(path)?,
    };

    if raw.is_empty() {
        return Err(KeyError::Empty);
    }
    if let Some(idx) = raw.iter().position(|s| s.trim().is_empty()) {
        return Err(KeyError::BlankSecret(idx));
    }

    Ok(raw.iter().map(|s| Secret::new(s)).collect())
}

/// One secret per line; blank lines and `#` comments are skipped.
fn parse_secrets_file(path: &Path) -> Result<Vec<String>, KeyError> {
    let contents = std::fs::read_to_string(path).map_err(|source| KeyError::Source {
        path: path.display().to_string(),
        source,
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
