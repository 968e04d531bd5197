//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Identity service configuration
    pub identity: IdentityConfig,

    /// Form behaviour
    #[serde(default)]
    pub portal: PortalConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Project URL of the hosted identity service
    pub url: String,

    /// Public (anon) project key
    pub anon_key: String,

    /// Table holding profile rows
    #[serde(default = "default_profile_table")]
    pub profile_table: String,

    /// Request timeout. Unset means requests wait indefinitely.
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortalConfig {
    /// Where to send the user once signed in
    #[serde(default = "default_post_login_location")]
    pub post_login_location: String,

    /// Pause between the welcome message and the redirect
    #[serde(default = "default_redirect_delay", with = "humantime_serde")]
    pub redirect_delay: Duration,

    /// File mirroring the session marker. In-memory only when unset.
    #[serde(default)]
    pub session_path: Option<PathBuf>,

    /// Confirmation redirect fragment (`#access_token=...`) to adopt at startup.
    /// A fragment given on the command line takes precedence.
    #[serde(default)]
    pub fragment: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default implementations
impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            post_login_location: default_post_login_location(),
            redirect_delay: default_redirect_delay(),
            session_path: None,
            fragment: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_profile_table() -> String {
    account_gateway::DEFAULT_PROFILE_TABLE.into()
}

fn default_post_login_location() -> String {
    "menu.html".into()
}

fn default_redirect_delay() -> Duration {
    Duration::from_millis(1200)
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_env(config::Environment::default())
    }

    fn from_env(env: config::Environment) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(
                env.separator("__")
                    // Keys and table names must stay strings.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
