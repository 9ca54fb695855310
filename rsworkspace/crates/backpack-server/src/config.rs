//! Server configuration resolved from CLI flags and environment variables.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use backpack_core::{CipherError, CipherKeys};
use clap::Parser;
use thiserror::Error;
use tracing::warn;

use crate::env::ReadEnv;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_UPSTREAM_PATH: &str = "/GetBackpack";
const DEFAULT_RELEASE_VERSION: &str = "OB50";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
const MIN_TIMEOUT_SECS: u64 = 1;

const ENV_PORT: &str = "BACKPACK_PORT";
const ENV_CIPHER_KEY: &str = "BACKPACK_CIPHER_KEY";
const ENV_CIPHER_IV: &str = "BACKPACK_CIPHER_IV";
const ENV_TOKEN_URL: &str = "BACKPACK_TOKEN_URL";
const ENV_REGION_CREDENTIALS: &str = "BACKPACK_REGION_CREDENTIALS";
const ENV_UPSTREAM_PATH: &str = "BACKPACK_UPSTREAM_PATH";
const ENV_RELEASE_VERSION: &str = "BACKPACK_RELEASE_VERSION";
const ENV_UPSTREAM_TIMEOUT_SECS: &str = "BACKPACK_UPSTREAM_TIMEOUT_SECS";

#[derive(Parser, Debug, Default)]
#[command(name = "backpack-server")]
#[command(about = "Serves synthesized player backpacks as JSON and AES-CBC encrypted protobuf", long_about = None)]
pub struct Args {
    /// Listen port (overrides BACKPACK_PORT).
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingVar(&'static str),

    #[error("invalid cipher secret: {0}")]
    Cipher(#[from] CipherError),

    #[error("invalid region credentials entry {entry:?}: expected REGION=uid:password")]
    InvalidCredentials { entry: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub cipher: CipherKeys,
    /// `None` disables `/player-info`.
    pub upstream: Option<UpstreamConfig>,
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub token_url: String,
    pub upstream_path: String,
    pub release_version: String,
    pub timeout: Duration,
    pub credentials: RegionCredentials,
}

impl ServerConfig {
    pub fn new(cipher: CipherKeys) -> Self {
        Self {
            port: DEFAULT_PORT,
            cipher,
            upstream: None,
        }
    }

    pub fn with_upstream(mut self, upstream: UpstreamConfig) -> Self {
        self.upstream = Some(upstream);
        self
    }

    pub fn from_args<E: ReadEnv>(args: Args, env: &E) -> Result<Self, ConfigError> {
        let key = env
            .var(ENV_CIPHER_KEY)
            .map_err(|_| ConfigError::MissingVar(ENV_CIPHER_KEY))?;
        let iv = env
            .var(ENV_CIPHER_IV)
            .map_err(|_| ConfigError::MissingVar(ENV_CIPHER_IV))?;

        let port = args
            .port
            .or_else(|| env.var(ENV_PORT).ok().and_then(|p| p.parse().ok()))
            .unwrap_or(DEFAULT_PORT);

        let upstream = match env.var(ENV_TOKEN_URL) {
            Ok(token_url) if !token_url.trim().is_empty() => {
                Some(UpstreamConfig::from_env(token_url.trim().to_string(), env)?)
            }
            _ => None,
        };

        Ok(Self {
            port,
            cipher: CipherKeys::from_secrets(&key, &iv)?,
            upstream,
        })
    }
}

impl UpstreamConfig {
    pub fn new(token_url: impl Into<String>, credentials: RegionCredentials) -> Self {
        Self {
            token_url: token_url.into(),
            upstream_path: DEFAULT_UPSTREAM_PATH.to_string(),
            release_version: DEFAULT_RELEASE_VERSION.to_string(),
            timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            credentials,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_upstream_path(mut self, path: impl Into<String>) -> Self {
        self.upstream_path = normalize_path(&path.into());
        self
    }

    fn from_env<E: ReadEnv>(token_url: String, env: &E) -> Result<Self, ConfigError> {
        let credentials =
            RegionCredentials::parse(&env.var(ENV_REGION_CREDENTIALS).unwrap_or_default())?;
        if credentials.is_empty() {
            warn!("{ENV_TOKEN_URL} is set but {ENV_REGION_CREDENTIALS} is empty; every region will be rejected");
        }

        let mut config = Self::new(token_url, credentials);

        if let Ok(path) = env.var(ENV_UPSTREAM_PATH) {
            config.upstream_path = normalize_path(&path);
        }
        if let Ok(version) = env.var(ENV_RELEASE_VERSION) {
            config.release_version = version;
        }
        if let Ok(raw) = env.var(ENV_UPSTREAM_TIMEOUT_SECS) {
            match raw.parse::<u64>() {
                Ok(secs) if secs >= MIN_TIMEOUT_SECS => {
                    config.timeout = Duration::from_secs(secs);
                }
                Ok(secs) => {
                    warn!(
                        "{ENV_UPSTREAM_TIMEOUT_SECS}={secs} is below minimum ({MIN_TIMEOUT_SECS}), using default"
                    );
                }
                Err(_) => {
                    warn!("{ENV_UPSTREAM_TIMEOUT_SECS}={raw:?} is not a valid integer, using default");
                }
            }
        }

        Ok(config)
    }
}

fn normalize_path(path: &str) -> String {
    let path = path.trim();
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Account used to obtain an upstream token for one region.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountCredentials {
    pub uid: String,
    pub password: String,
}

impl fmt::Debug for AccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountCredentials")
            .field("uid", &self.uid)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Region code (uppercase) → account credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionCredentials(HashMap<String, AccountCredentials>);

impl RegionCredentials {
    /// Parse `REGION=uid:password,REGION=uid:password`. Passwords may
    /// contain `:`; only the first one separates uid from password.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let invalid = || ConfigError::InvalidCredentials {
                    entry: entry.to_string(),
                };
                let (region, account) = entry.split_once('=').ok_or_else(invalid)?;
                let (uid, password) = account.split_once(':').ok_or_else(invalid)?;
                let (region, uid) = (region.trim(), uid.trim());
                if region.is_empty() || uid.is_empty() || password.is_empty() {
                    return Err(invalid());
                }
                Ok((
                    region.to_uppercase(),
                    AccountCredentials {
                        uid: uid.to_string(),
                        password: password.to_string(),
                    },
                ))
            })
            .collect::<Result<HashMap<_, _>, _>>()
            .map(Self)
    }

    pub fn insert(&mut self, region: &str, uid: impl Into<String>, password: impl Into<String>) {
        self.0.insert(
            region.to_uppercase(),
            AccountCredentials {
                uid: uid.into(),
                password: password.into(),
            },
        );
    }

    /// Case-insensitive lookup.
    pub fn get(&self, region: &str) -> Option<&AccountCredentials> {
        self.0.get(&region.to_uppercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::InMemoryEnv;

    fn base_env() -> InMemoryEnv {
        let env = InMemoryEnv::new();
        env.set(ENV_CIPHER_KEY, "0123456789abcdef");
        env.set(ENV_CIPHER_IV, "fedcba9876543210");
        env
    }

    #[test]
    fn defaults_with_only_secrets() {
        let config = ServerConfig::from_args(Args::default(), &base_env()).unwrap();

        assert_eq!(config.port, 5000);
        assert!(config.upstream.is_none());
        assert_eq!(
            config.cipher,
            CipherKeys::from_secrets("0123456789abcdef", "fedcba9876543210").unwrap()
        );
    }

    #[test]
    fn missing_key_is_an_error() {
        let env = InMemoryEnv::new();
        env.set(ENV_CIPHER_IV, "fedcba9876543210");

        let err = ServerConfig::from_args(Args::default(), &env).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("BACKPACK_CIPHER_KEY")));
    }

    #[test]
    fn missing_iv_is_an_error() {
        let env = InMemoryEnv::new();
        env.set(ENV_CIPHER_KEY, "0123456789abcdef");

        let err = ServerConfig::from_args(Args::default(), &env).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("BACKPACK_CIPHER_IV")));
    }

    #[test]
    fn short_secret_fails_fast() {
        let env = base_env();
        env.set(ENV_CIPHER_KEY, "too-short");

        let err = ServerConfig::from_args(Args::default(), &env).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Cipher(CipherError::SecretTooShort { which: "key", .. })
        ));
    }

    #[test]
    fn port_from_env_and_args_override() {
        let env = base_env();
        env.set(ENV_PORT, "8081");

        let config = ServerConfig::from_args(Args::default(), &env).unwrap();
        assert_eq!(config.port, 8081);

        let config = ServerConfig::from_args(Args { port: Some(9090) }, &env).unwrap();
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn invalid_port_falls_back_to_default() {
        let env = base_env();
        env.set(ENV_PORT, "not-a-number");

        let config = ServerConfig::from_args(Args::default(), &env).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn token_url_enables_upstream_with_defaults() {
        let env = base_env();
        env.set(ENV_TOKEN_URL, "https://tokens.example.com/token");
        env.set(ENV_REGION_CREDENTIALS, "ind=111:secret,BR=222:pa:ss");

        let config = ServerConfig::from_args(Args::default(), &env).unwrap();
        let upstream = config.upstream.expect("upstream enabled");

        assert_eq!(upstream.token_url, "https://tokens.example.com/token");
        assert_eq!(upstream.upstream_path, "/GetBackpack");
        assert_eq!(upstream.release_version, "OB50");
        assert_eq!(upstream.timeout, Duration::from_secs(10));
        assert_eq!(upstream.credentials.len(), 2);
        assert_eq!(upstream.credentials.get("IND").unwrap().uid, "111");
        assert_eq!(upstream.credentials.get("br").unwrap().password, "pa:ss");
    }

    #[test]
    fn blank_token_url_disables_upstream() {
        let env = base_env();
        env.set(ENV_TOKEN_URL, "   ");

        let config = ServerConfig::from_args(Args::default(), &env).unwrap();
        assert!(config.upstream.is_none());
    }

    #[test]
    fn upstream_overrides() {
        let env = base_env();
        env.set(ENV_TOKEN_URL, "http://localhost:1/token");
        env.set(ENV_UPSTREAM_PATH, "Backpack/Get");
        env.set(ENV_RELEASE_VERSION, "OB51");
        env.set(ENV_UPSTREAM_TIMEOUT_SECS, "3");

        let upstream = ServerConfig::from_args(Args::default(), &env)
            .unwrap()
            .upstream
            .unwrap();

        assert_eq!(upstream.upstream_path, "/Backpack/Get");
        assert_eq!(upstream.release_version, "OB51");
        assert_eq!(upstream.timeout, Duration::from_secs(3));
    }

    #[test]
    fn timeout_below_minimum_uses_default() {
        let env = base_env();
        env.set(ENV_TOKEN_URL, "http://localhost:1/token");
        env.set(ENV_UPSTREAM_TIMEOUT_SECS, "0");

        let upstream = ServerConfig::from_args(Args::default(), &env)
            .unwrap()
            .upstream
            .unwrap();
        assert_eq!(upstream.timeout, Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS));

        env.set(ENV_UPSTREAM_TIMEOUT_SECS, "soon");
        let upstream = ServerConfig::from_args(Args::default(), &env)
            .unwrap()
            .upstream
            .unwrap();
        assert_eq!(upstream.timeout, Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS));
    }

    #[test]
    fn malformed_credentials_are_rejected() {
        for raw in ["IND", "IND=111", "=111:pw", "IND=:pw", "IND=111:"] {
            let err = RegionCredentials::parse(raw).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidCredentials { .. }),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn empty_credentials_parse_to_nothing() {
        assert!(RegionCredentials::parse("").unwrap().is_empty());
        assert!(RegionCredentials::parse(" , ,").unwrap().is_empty());
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = RegionCredentials::parse("IND=111:hunter2").unwrap();
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("111"));
        assert!(!rendered.contains("hunter2"));
    }
}
