use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Errors raised while reading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),

    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Where the token signing secrets come from.
///
/// Inline secrets are read from the environment once; a secrets file is
/// re-read on every key ring reload, which is how secrets get rotated
/// without a restart.
#[derive(Clone)]
pub enum SecretSource {
    Inline(Vec<String>),
    File(PathBuf),
}

impl std::fmt::Debug for SecretSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretSource::Inline(secrets) => f
                .debug_tuple("Inline")
                .field(&format_args!("<{} redacted>", secrets.len()))
                .finish(),
            SecretSource::File(path) => f.debug_tuple("File").field(path).finish(),
        }
    }
}

impl SecretSource {
    /// `JWT_SECRETS_FILE` wins over `JWT_SECRET` / `JWT_PREVIOUS_SECRETS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(path) = get("JWT_SECRETS_FILE") {
            if path.trim().is_empty() {
                return Err(ConfigError::Invalid("JWT_SECRETS_FILE"));
            }
            return Ok(SecretSource::File(PathBuf::from(path)));
        }

        let primary = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let mut secrets = vec![primary];
        if let Some(previous) = get("JWT_PREVIOUS_SECRETS") {
            secrets.extend(
                previous
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
            );
        }
        Ok(SecretSource::Inline(secrets))
    }
}

fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Parse `key`, falling back to `default` when unset or malformed.
fn parse_or<T: std::str::FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    get(key)
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt_secrets: SecretSource,
    pub jwt_leeway_secs: u64,
    pub frontend_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            database_max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", 10),
            host: get("BACKEND_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&get, "BACKEND_PORT", 5000),
            jwt_secrets: SecretSource::from_lookup(&get)?,
            jwt_leeway_secs: parse_or(&get, "JWT_LEEWAY_SECS", 0),
            frontend_url: get("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
        })
    }
}

/// Settings for the terminal dashboard client.
#[derive(Clone)]
pub struct DashboardConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for DashboardConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = get("DASHBOARD_API_URL")
            .unwrap_or_else(|| "http://localhost:5000".to_string())
            .trim_end_matches('/')
            .to_string();
        if api_url.is_empty() {
            return Err(ConfigError::Invalid("DASHBOARD_API_URL"));
        }

        let token = get("DASHBOARD_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        // An explicit timeout that doesn't parse is an operator mistake.
        let timeout = match get("DASHBOARD_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("DASHBOARD_TIMEOUT_SECS"))?,
            )),
            None => None,
        };

        Ok(Self {
            api_url,
            token,
            timeout,
        })
    }
}
