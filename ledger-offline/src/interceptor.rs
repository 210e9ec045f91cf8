//! The interceptor itself — classify, fetch, capture, fall back.

use crate::cache::AssetCache;
use crate::policy::{InterceptorConfig, RoutePolicy};
use crate::{OfflineError, OfflineResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// An outgoing request as seen at the network boundary.
#[derive(Debug, Clone)]
pub struct AssetRequest {
    pub method: String,
    pub url: String,
    /// The request's `Accept` header; used to detect full-page document
    /// requests eligible for the shell fallback.
    pub accept: String,
}

impl AssetRequest {
    /// A plain GET for a static asset or API resource.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.into(),
            accept: "*/*".to_string(),
        }
    }

    /// A navigation-style GET that wants a full HTML document.
    pub fn document(url: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.into(),
            accept: "text/html,application/xhtml+xml".to_string(),
        }
    }

    fn wants_document(&self) -> bool {
        self.accept.contains("text/html")
    }
}

/// A response flowing back through the interceptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl AssetResponse {
    pub fn ok(content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    /// The structured response synthesized for network-first requests that
    /// fail while offline.
    pub fn offline_error() -> Self {
        Self {
            status: 200,
            content_type: "application/json".to_string(),
            body: serde_json::json!({ "error": "offline, sync unavailable" })
                .to_string()
                .into_bytes(),
        }
    }
}

/// The network behind the interceptor. Production embeds an HTTP client;
/// tests script it.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, request: &AssetRequest) -> OfflineResult<AssetResponse>;
}

/// Request-boundary proxy serving cached assets when offline.
pub struct OfflineInterceptor {
    config: InterceptorConfig,
    fetcher: Arc<dyn Fetch>,
    cache: AssetCache,
    controlling: AtomicBool,
}

impl OfflineInterceptor {
    pub fn new(config: InterceptorConfig, fetcher: Arc<dyn Fetch>) -> Self {
        Self::with_cache(config, fetcher, AssetCache::new())
    }

    /// Builds the interceptor over an existing cache, so captured assets
    /// survive an interceptor replacement during a shell upgrade.
    pub fn with_cache(config: InterceptorConfig, fetcher: Arc<dyn Fetch>, cache: AssetCache) -> Self {
        Self {
            config,
            fetcher,
            cache,
            controlling: AtomicBool::new(false),
        }
    }

    /// Install phase: proactively capture the fixed shell-asset manifest
    /// into the current cache generation. Fails the install on the first
    /// asset that cannot be fetched.
    pub async fn install(&self) -> OfflineResult<()> {
        info!(
            "installing cache generation {}",
            self.config.cache_generation
        );
        for url in &self.config.shell_assets {
            let request = AssetRequest::get(url.clone());
            let response = self.fetcher.fetch(&request).await?;
            if response.status != 200 {
                return Err(OfflineError::Network(format!(
                    "shell asset {url} returned {}",
                    response.status
                )));
            }
            self.cache
                .put(&self.config.cache_generation, url, response)
                .await;
        }
        Ok(())
    }

    /// Activation phase: delete every cache generation other than the
    /// current one, then take control of open sessions immediately.
    pub async fn activate(&self) {
        let dropped = self
            .cache
            .retain_generation(&self.config.cache_generation)
            .await;
        if dropped > 0 {
            info!("activated, dropped {dropped} stale cache generation(s)");
        }
        self.controlling.store(true, Ordering::SeqCst);
    }

    /// True once `activate` has claimed open sessions.
    pub fn is_controlling(&self) -> bool {
        self.controlling.load(Ordering::SeqCst)
    }

    /// Routes one request through the interception policies. Non-GET
    /// requests pass straight through to the network.
    pub async fn handle(&self, request: &AssetRequest) -> OfflineResult<AssetResponse> {
        if request.method != "GET" {
            return self.fetcher.fetch(request).await;
        }

        match self.config.classify(&request.url) {
            RoutePolicy::NetworkFirst => self.network_first(request).await,
            RoutePolicy::CacheFirst => self.cache_first(request).await,
        }
    }

    async fn network_first(&self, request: &AssetRequest) -> OfflineResult<AssetResponse> {
        match self.fetcher.fetch(request).await {
            Ok(response) => Ok(response),
            Err(e) => {
                // Data-sync callers get a parseable offline body, never a
                // raw transport error.
                debug!("network-first fetch failed for {}: {e}", request.url);
                Ok(AssetResponse::offline_error())
            }
        }
    }

    async fn cache_first(&self, request: &AssetRequest) -> OfflineResult<AssetResponse> {
        let generation = &self.config.cache_generation;

        if let Some(hit) = self.cache.get(generation, &request.url).await {
            debug!("cache hit for {}", request.url);
            return Ok(hit);
        }

        match self.fetcher.fetch(request).await {
            Ok(response) => {
                // Capture successful responses only.
                if response.status == 200 {
                    self.cache
                        .put(generation, &request.url, response.clone())
                        .await;
                }
                Ok(response)
            }
            Err(e) => {
                if request.wants_document() {
                    if let Some(shell) = self
                        .cache
                        .get(generation, &self.config.shell_fallback)
                        .await
                    {
                        debug!("serving shell fallback for {}", request.url);
                        return Ok(shell);
                    }
                }
                warn!("offline with no cached copy of {}", request.url);
                Err(OfflineError::NotCached(format!("{}: {e}", request.url)))
            }
        }
    }
}
