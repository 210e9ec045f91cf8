//! Named cache generations of captured responses.

use crate::interceptor::AssetResponse;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Captured responses keyed by URL, grouped into named generations.
///
/// Cheap to clone; clones share storage, so an embedder can hand the same
/// cache to a replacement interceptor across an asset-shell upgrade.
#[derive(Clone, Default)]
pub struct AssetCache {
    generations: Arc<RwLock<HashMap<String, HashMap<String, AssetResponse>>>>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a captured response under the given generation.
    pub async fn put(&self, generation: &str, url: &str, response: AssetResponse) {
        let mut generations = self.generations.write().await;
        generations
            .entry(generation.to_string())
            .or_default()
            .insert(url.to_string(), response);
    }

    /// Looks up a captured response.
    pub async fn get(&self, generation: &str, url: &str) -> Option<AssetResponse> {
        let generations = self.generations.read().await;
        generations.get(generation)?.get(url).cloned()
    }

    /// Deletes every generation except the one named. Returns how many were
    /// dropped.
    pub async fn retain_generation(&self, keep: &str) -> usize {
        let mut generations = self.generations.write().await;
        let before = generations.len();
        generations.retain(|name, _| {
            let kept = name == keep;
            if !kept {
                debug!("deleting stale cache generation {name}");
            }
            kept
        });
        before - generations.len()
    }

    /// Names of all generations currently present.
    pub async fn generation_names(&self) -> Vec<String> {
        let generations = self.generations.read().await;
        let mut names: Vec<String> = generations.keys().cloned().collect();
        names.sort();
        names
    }
}
