use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use std::{env, fmt};

use url::Url;

/// Endpoints of the auth service itself; requests for these must clear the
/// gate without credentials or nobody could ever obtain a token.
const DEFAULT_OPEN_ENDPOINTS: [&str; 4] = [
    "/api/v1/auth/sign-in",
    "/api/v1/auth/sign-up",
    "/api/v1/auth/refresh",
    "/api/v1/auth/validate",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    /// Full URL of the token-validation endpoint on the auth service.
    pub validate_url: Url,
    pub validate_timeout: Duration,

    /// Paths exempt from authentication.
    pub open_endpoints: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = env::var("GATEWAY_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("GATEWAY_PORT"))?;

        let app_env = AppEnv::from_env();

        let validate_url = env::var("AUTH_VALIDATE_URL")
            .map_err(|_| ConfigError::Missing("AUTH_VALIDATE_URL"))?;
        let validate_url =
            Url::parse(&validate_url).map_err(|_| ConfigError::Invalid("AUTH_VALIDATE_URL"))?;

        let validate_timeout_ms: u64 = env::var("AUTH_VALIDATE_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3_000);

        let open_endpoints = match env::var("OPEN_ENDPOINTS") {
            Ok(raw) => parse_endpoint_list(&raw),
            Err(_) => DEFAULT_OPEN_ENDPOINTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        Ok(Config {
            addr,
            app_env,
            validate_url,
            validate_timeout: Duration::from_millis(validate_timeout_ms),
            open_endpoints,
        })
    }
}

fn parse_endpoint_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
