use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::constants::{api, env, intervals, users};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub graylog: GraylogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

/// What `set_admin` does when fetching a user fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingUserPolicy {
    /// Any fetch error, including auth and network failures, is taken to
    /// mean the user does not exist and a create is attempted.
    #[default]
    AnyError,

    /// Only a 404 leads to a create; other fetch errors are returned.
    NotFoundOnly,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraylogConfig {
    /// Base URL of the REST API; request paths are appended verbatim.
    pub api_url: String,

    /// Password of the `admin` account.
    pub password: String,

    /// Users that must hold the Admin role.
    pub admins: Vec<String>,

    /// Domain used for the email address of newly created users.
    pub email_domain: String,

    pub poll_interval_seconds: u64,

    /// Unset means no client-side timeout.
    pub request_timeout_seconds: Option<u64>,

    pub missing_user_policy: MissingUserPolicy,
}

impl Default for GraylogConfig {
    fn default() -> Self {
        Self {
            api_url: api::DEFAULT_URL.to_string(),
            password: String::new(),
            admins: vec![],
            email_domain: users::DEFAULT_EMAIL_DOMAIN.to_string(),
            poll_interval_seconds: intervals::API_POLL.as_secs(),
            request_timeout_seconds: None,
            missing_user_policy: MissingUserPolicy::default(),
        }
    }
}

impl fmt::Debug for GraylogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };

        f.debug_struct("GraylogConfig")
            .field("api_url", &self.api_url)
            .field("password", &password)
            .field("admins", &self.admins)
            .field("email_domain", &self.email_domain)
            .field("poll_interval_seconds", &self.poll_interval_seconds)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("missing_user_policy", &self.missing_user_policy)
            .finish()
    }
}

impl GraylogConfig {
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }
}

/// Splits a whitespace-separated list of user names.
#[must_use]
pub fn parse_admin_list(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

impl Config {
    /// Loads the first config file found (or defaults), then applies
    /// environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = match explicit_path {
            Some(path) => {
                info!("Loading config from: {}", path.display());
                Self::load_from_path(path)?
            }
            None => Self::load_from_search_paths()?,
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_from_search_paths() -> Result<Self> {
        for path in Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(&path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Overlays values from the environment. Empty variables are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(password) = var(env::ADMIN_PASSWORD) {
            self.graylog.password = password;
        }
        if let Some(admins) = var(env::ADMINS) {
            self.graylog.admins = parse_admin_list(&admins);
        }
        if let Some(url) = var(env::API_URL) {
            self.graylog.api_url = url;
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![Self::default_config_path()];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("graylog-configurer").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".graylog-configurer").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    /// Writes a default config file unless one already exists.
    /// The written password is empty; supply it through `ADMIN_PASSWORD`.
    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            Self::default().save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.graylog.password.is_empty() {
            anyhow::bail!("{} not set", env::ADMIN_PASSWORD);
        }

        if self.graylog.api_url.is_empty() {
            anyhow::bail!("Graylog API URL cannot be empty");
        }

        if self.graylog.poll_interval_seconds == 0 {
            anyhow::bail!("Poll interval must be > 0");
        }

        Ok(())
    }
}
