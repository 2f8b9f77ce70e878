use std::env;
use std::fmt;
use std::time::Duration;

const DEFAULT_API_BASE: &str = "http://localhost:5000/api";
const DEFAULT_TIMEOUT_SECS: &str = "30";
const DEFAULT_SEARCH_DEBOUNCE_MS: &str = "300";

/// Distinguishes runtime behavior for different stages of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the registration client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub api: ApiConfig,
    pub admin: AdminConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let base_url = ApiConfig::normalize_base_url(
            &env::var("REGISTRATION_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
        )?;

        let timeout_secs = env::var("REGISTRATION_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ConfigError::InvalidTimeout)?;

        let debounce_ms = env::var("REGISTRATION_SEARCH_DEBOUNCE_MS")
            .unwrap_or_else(|_| DEFAULT_SEARCH_DEBOUNCE_MS.to_string())
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidDebounce)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            api: ApiConfig {
                base_url,
                timeout: Duration::from_secs(timeout_secs),
            },
            admin: AdminConfig {
                search_debounce: Duration::from_millis(debounce_ms),
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where the registration backend lives and how long to wait for it.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: Self::normalize_base_url(base_url)?,
            timeout: Duration::from_secs(30),
        })
    }

    /// Trims surrounding whitespace and trailing slashes; only http(s) is accepted.
    pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
        let trimmed = raw.trim().trim_end_matches('/');
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(ConfigError::InvalidBaseUrl {
                value: raw.to_string(),
            });
        }
        Ok(trimmed.to_string())
    }
}

/// Admin dashboard behavior.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub search_debounce: Duration,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBaseUrl { value: String },
    InvalidTimeout,
    InvalidDebounce,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBaseUrl { value } => write!(
                f,
                "REGISTRATION_API_BASE must be an http(s) URL, got '{}'",
                value
            ),
            ConfigError::InvalidTimeout => write!(
                f,
                "REGISTRATION_API_TIMEOUT_SECS must be a positive number of seconds"
            ),
            ConfigError::InvalidDebounce => write!(
                f,
                "REGISTRATION_SEARCH_DEBOUNCE_MS must be a number of milliseconds"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
