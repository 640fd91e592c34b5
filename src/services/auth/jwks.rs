/*
 * Responsibility
 * - Key set (JWKS) wire types
 * - KeySetFetcher trait (injected collaborator, substitutable in tests)
 * - HTTP fetcher with optional time-bounded, single-flight cache
 */
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};
use url::Url;

use super::error::AuthError;

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// One entry of the provider's published key set.
///
/// Fields are defaulted so a single odd entry cannot fail the whole fetch;
/// the key resolver filters out anything structurally unusable.
#[derive(Debug, Clone, Deserialize)]
pub struct SigningKey {
    #[serde(default)]
    pub kid: String,
    #[serde(default, rename = "use")]
    pub key_use: String,
    #[serde(default)]
    pub kty: String,
    /// Base64 DER certificate chain, leaf first.
    #[serde(default)]
    pub x5c: Vec<String>,
    #[serde(default)]
    pub nbf: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeySet {
    pub keys: Vec<SigningKey>,
}

/// Source of the provider's current signing keys.
///
/// A failed fetch fails the whole authorization attempt (fail-closed); any
/// retry policy belongs to the caller and re-runs the pipeline from the start.
#[async_trait]
pub trait KeySetFetcher: Send + Sync {
    async fn fetch(&self) -> Result<Vec<SigningKey>, AuthError>;

    /// Drop any cached key set. No-op for uncached fetchers.
    async fn invalidate(&self) {}
}

pub struct HttpKeySetFetcher {
    jwks_url: Url,
    http: reqwest::Client,
    cache_ttl: Option<Duration>,
    cache: RwLock<Option<CachedKeys>>,
    fetch_lock: Mutex<()>,
}

struct CachedKeys {
    keys: Vec<SigningKey>,
    expires_at: Instant,
}

impl HttpKeySetFetcher {
    pub fn new(jwks_url: Url) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_FETCH_TIMEOUT)
            .build()?;

        Ok(Self {
            jwks_url,
            http,
            cache_ttl: None,
            cache: RwLock::new(None),
            fetch_lock: Mutex::new(()),
        })
    }

    /// Enable the time-bounded cache. Without this every fetch goes remote.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    async fn fetch_remote(&self) -> Result<Vec<SigningKey>, AuthError> {
        let resp = self
            .http
            .get(self.jwks_url.clone())
            .send()
            .await
            .map_err(|e| AuthError::KeySetUnavailable(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AuthError::KeySetUnavailable(format!("status {status}")));
        }

        // A body without a `keys` field is as unusable as no body at all.
        let key_set: KeySet = resp
            .json()
            .await
            .map_err(|e| AuthError::KeySetUnavailable(format!("invalid key set body: {e}")))?;

        Ok(key_set.keys)
    }
}

#[async_trait]
impl KeySetFetcher for HttpKeySetFetcher {
    async fn fetch(&self) -> Result<Vec<SigningKey>, AuthError> {
        let Some(ttl) = self.cache_ttl else {
            return self.fetch_remote().await;
        };

        if let Some(cached) = self.cache.read().await.as_ref() {
            if cached.expires_at > Instant::now() {
                return Ok(cached.keys.clone());
            }
        }

        // Single flight: concurrent misses trigger one remote fetch, not N.
        let _guard = self.fetch_lock.lock().await;
        if let Some(cached) = self.cache.read().await.as_ref() {
            if cached.expires_at > Instant::now() {
                return Ok(cached.keys.clone());
            }
        }

        let keys = self.fetch_remote().await?;
        *self.cache.write().await = Some(CachedKeys {
            keys: keys.clone(),
            expires_at: Instant::now() + ttl,
        });

        Ok(keys)
    }

    async fn invalidate(&self) {
        *self.cache.write().await = None;
    }
}
