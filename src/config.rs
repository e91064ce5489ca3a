//! Configuration for the SMS client, web front-end and CLI.

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::client::{Auth, DEFAULT_BASE_URL, SmsClient};
use crate::domain::SenderId;

/// Configuration file read when no explicit path is given.
pub const CONFIG_FILE: &str = "sms.toml";
/// Prefix of the environment variables that override file values.
pub const ENV_PREFIX: &str = "SMS_";

/// Keys whose environment values are taken verbatim. Sender ids and API keys
/// may be all digits, possibly with leading zeros.
const RAW_STRING_KEYS: [&str; 2] = ["api_key", "sender_id"];

/// Service configuration with defaults, file, and environment overrides.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables prefixed with `SMS_` (highest priority)
/// 2. Configuration file (`sms.toml` or the path passed on the command line)
/// 3. Built-in defaults (lowest priority)
///
/// `api_key` and `sender_id` have no usable default and must be provided.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Provider base URL.
    ///
    /// Environment variable: `SMS_BASE_URL`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key sent as `Authorization: App <key>`.
    ///
    /// Environment variable: `SMS_API_KEY`
    #[serde(default)]
    pub api_key: String,
    /// Sender id used when a send request carries no override.
    ///
    /// Environment variable: `SMS_SENDER_ID`
    #[serde(default)]
    pub sender_id: String,
    /// Timeout for each provider call, in seconds.
    ///
    /// Environment variable: `SMS_TIMEOUT_SECS`
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Web front-end bind address.
    ///
    /// Environment variable: `SMS_HOST`
    #[serde(default = "default_host")]
    pub host: String,
    /// Web front-end bind port.
    ///
    /// Environment variable: `SMS_PORT`
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Config {
    /// Load configuration from defaults, a TOML file, and `SMS_*` environment
    /// variables.
    ///
    /// A missing file is not an error; `path` falls back to [`CONFIG_FILE`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map_or_else(|| PathBuf::from(CONFIG_FILE), Path::to_path_buf);

        let mut figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(&path))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&RAW_STRING_KEYS));
        for key in RAW_STRING_KEYS {
            let var = format!("{ENV_PREFIX}{}", key.to_ascii_uppercase());
            if let Ok(value) = std::env::var(&var) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }

        let config: Self = figment
            .extract()
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parse the web front-end socket address from host and port.
    pub fn server_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        SocketAddr::from_str(&addr).with_context(|| format!("invalid server address {addr}"))
    }

    /// API key with everything but the last four characters masked, for logs.
    pub fn api_key_masked(&self) -> String {
        let key = self.api_key.trim();
        let visible = key.len().saturating_sub(4);
        match key.get(visible..) {
            Some(tail) if visible > 0 => format!("***{tail}"),
            _ => "***".to_owned(),
        }
    }

    /// Build the SMS client described by this configuration.
    pub fn build_client(&self) -> Result<SmsClient> {
        let auth = Auth::api_key(&self.api_key).context("invalid api_key")?;
        let sender = SenderId::new(&self.sender_id).context("invalid sender_id")?;

        SmsClient::builder(auth, sender)
            .base_url(&self.base_url)
            .timeout(self.timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build SMS client")
    }

    fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("api_key is required (set SMS_API_KEY or api_key in {CONFIG_FILE})");
        }
        if self.sender_id.trim().is_empty() {
            anyhow::bail!("sender_id is required (set SMS_SENDER_ID or sender_id in {CONFIG_FILE})");
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than 0");
        }
        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key_masked())
            .field("sender_id", &self.sender_id)
            .field("timeout_secs", &self.timeout_secs)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            sender_id: String::new(),
            timeout_secs: default_timeout_secs(),
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5001
}
