//! Request classification and interceptor configuration.

/// Which strategy applies to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePolicy {
    /// Data-sync and auth endpoints: always try the network.
    NetworkFirst,
    /// Static application assets: serve from cache when possible.
    CacheFirst,
}

/// Configuration for the offline interceptor.
#[derive(Debug, Clone)]
pub struct InterceptorConfig {
    /// Name of the current cache generation. Bumped on every asset-shell
    /// release; stale generations are deleted on activation.
    pub cache_generation: String,

    /// Fixed manifest of shell assets captured proactively on install.
    pub shell_assets: Vec<String>,

    /// Asset served to offline full-page document requests.
    pub shell_fallback: String,

    /// URL prefixes that are network-first (remote mirror and auth hosts).
    pub network_first_prefixes: Vec<String>,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            cache_generation: "ledger-shell-v1".to_string(),
            shell_assets: vec![
                "/".to_string(),
                "/index.html".to_string(),
                "/style.css".to_string(),
                "/app.js".to_string(),
                "/manifest.json".to_string(),
            ],
            shell_fallback: "/index.html".to_string(),
            network_first_prefixes: vec![
                "https://www.googleapis.com/".to_string(),
                "https://accounts.google.com/".to_string(),
                "https://oauth2.googleapis.com/".to_string(),
            ],
        }
    }
}

impl InterceptorConfig {
    /// Classifies a URL: anything under a network-first prefix goes to the
    /// network; everything else is treated as a static asset.
    pub fn classify(&self, url: &str) -> RoutePolicy {
        if self
            .network_first_prefixes
            .iter()
            .any(|prefix| url.starts_with(prefix.as_str()))
        {
            RoutePolicy::NetworkFirst
        } else {
            RoutePolicy::CacheFirst
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_endpoints_are_network_first() {
        let config = InterceptorConfig::default();
        assert_eq!(
            config.classify("https://www.googleapis.com/drive/v3/files"),
            RoutePolicy::NetworkFirst
        );
        assert_eq!(
            config.classify("https://oauth2.googleapis.com/token"),
            RoutePolicy::NetworkFirst
        );
    }

    #[test]
    fn app_assets_are_cache_first() {
        let config = InterceptorConfig::default();
        assert_eq!(config.classify("/style.css"), RoutePolicy::CacheFirst);
        assert_eq!(
            config.classify("https://example.com/cdn/lib.js"),
            RoutePolicy::CacheFirst
        );
    }
}
