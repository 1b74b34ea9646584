//! Configuration management for spendweb
//!
//! This module handles loading, validation, and environment overrides of
//! spendweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigResult};

/// Environment variable that overrides the expense API base URL
pub const API_BASE_URL_ENV: &str = "VITE_API_BASE_URL";

/// Local development address of the expense API
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8081";

/// Cookie the session guard reads its token from
pub const DEFAULT_SESSION_COOKIE: &str = "auth_token";

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum number of mounted form views kept in memory
    #[serde(default = "default_max_views")]
    pub max_views: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_views: default_max_views(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_views() -> usize {
    1024
}

/// Remote expense API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is appended to
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Which route guard implementation to build
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardKind {
    /// Every request is authorized
    AlwaysAllow,
    /// Authorized when the session cookie is present
    SessionToken,
    /// Authorized when the request carries one of the configured roles
    RoleBased,
}

impl Default for GuardKind {
    fn default() -> Self {
        GuardKind::AlwaysAllow
    }
}

impl std::str::FromStr for GuardKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always_allow" => Ok(GuardKind::AlwaysAllow),
            "session_token" => Ok(GuardKind::SessionToken),
            "role_based" => Ok(GuardKind::RoleBased),
            _ => Err(format!("Invalid guard: {}", s)),
        }
    }
}

impl std::fmt::Display for GuardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuardKind::AlwaysAllow => write!(f, "always_allow"),
            GuardKind::SessionToken => write!(f, "session_token"),
            GuardKind::RoleBased => write!(f, "role_based"),
        }
    }
}

/// Route guard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Put the guard in front of the form routes
    #[serde(default)]
    pub enforce: bool,
    /// Guard implementation
    #[serde(default)]
    pub guard: GuardKind,
    /// Cookie holding the session token
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
    /// Roles accepted by the role-based guard
    #[serde(default)]
    pub roles: Vec<String>,
    /// Where unauthorized requests are redirected
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enforce: false,
            guard: GuardKind::AlwaysAllow,
            session_cookie: default_session_cookie(),
            roles: vec![],
            login_path: default_login_path(),
        }
    }
}

fn default_session_cookie() -> String {
    DEFAULT_SESSION_COOKIE.to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

/// Currency display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Symbol shown in front of the amount field
    #[serde(default = "default_currency_symbol")]
    pub symbol: String,
    /// Number of decimal places shown in placeholders
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_currency_symbol(),
            decimal_places: default_decimal_places(),
        }
    }
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Route guard settings
    #[serde(default)]
    pub auth: AuthConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError { message: e.to_string() },
        })?;

        let config = Self::from_yaml(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> ConfigResult<Self> {
        match Self::load(path.as_ref()) {
            Err(ConfigError::FileNotFound { path }) => {
                log::debug!("Config file {} not found, using defaults", path);
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source.
    ///
    /// An empty value counts as unset.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            log::debug!("{} overrides api.base_url", API_BASE_URL_ENV);
            self.api.base_url = url.trim().to_string();
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.server.max_views == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.max_views".to_string(),
                reason: "At least one form view must fit in memory".to_string(),
            });
        }

        let url = self.api.base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                reason: "Base URL must start with http:// or https://".to_string(),
            });
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Default path of the config file
    pub fn default_path() -> PathBuf {
        PathBuf::from("config.yaml")
    }
}

// ==================== Tests ====================
