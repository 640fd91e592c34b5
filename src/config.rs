/*
 * Responsibility
 * - Load environment configuration (JWKS_URL, issuer/audience, leeway, cache TTL)
 * - Validate settings (fail startup on missing/invalid values)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use url::Url;

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

pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    /// Identity provider's published key set (JSON Web Key Set) endpoint.
    pub jwks_url: Url,

    // Optional claim checks; when unset the corresponding claim is not enforced.
    pub auth_issuer: Option<String>,
    pub auth_audience: Option<String>,
    pub token_leeway_seconds: u64,

    /// 0 disables the key-set cache: every authorization attempt refetches.
    pub key_set_cache_ttl_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let jwks_url = std::env::var("JWKS_URL").map_err(|_| ConfigError::Missing("JWKS_URL"))?;
        let jwks_url = Url::parse(&jwks_url).map_err(|_| ConfigError::Invalid("JWKS_URL"))?;

        let auth_issuer = std::env::var("AUTH_ISSUER")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let auth_audience = std::env::var("AUTH_AUDIENCE")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let token_leeway_seconds = std::env::var("TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        let key_set_cache_ttl_seconds = std::env::var("KEY_SET_CACHE_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        Ok(Self {
            addr,
            app_env,
            jwks_url,
            auth_issuer,
            auth_audience,
            token_leeway_seconds,
            key_set_cache_ttl_seconds,
        })
    }
}
