// ABOUTME: Three-layer food search pipeline: local, cloud, then external fallback
// ABOUTME: Results are cached, merged by normalized name and ranked CLOUD, LOCAL, API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Search Engine
//!
//! The engine owns its collaborators: the bundled [`LocalCatalog`], optional
//! cloud and external sources behind traits, the search cache and the
//! credential cache. Read paths never fail: a source error is logged and the
//! source contributes nothing.

/// Goal tag derivation
pub mod enrich;
/// Merge, dedupe and rank
pub mod merge;
/// Search options and layer filter
pub mod options;
/// Progressive search with stale-response discard
pub mod progressive;

pub use enrich::enrich_tags;
pub use merge::{merge_dedupe_rank, merge_layers};
pub use options::{LayerFilter, SearchOptions};
pub use progressive::{PartialResults, ProgressiveSearch, SearchTicket};

use crate::cache::{SearchCache, SearchCacheKey};
use crate::catalog::LocalCatalog;
use crate::cloud::CloudCatalog;
use crate::credentials::TokenCache;
use crate::external::ExternalCatalog;
use food_core::constants::search::{DISCOVERY_RECENT_COUNT, EXTERNAL_FALLBACK_THRESHOLD};
use food_core::models::{normalize_name, FoodItem};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Discovery (browse) view shown for an empty query
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Discovery {
    /// The user's favorites from the backend
    pub favorites: Vec<FoodItem>,
    /// Quick picks
    pub recent: Vec<FoodItem>,
    /// Enriched local catalog
    pub catalog: Vec<FoodItem>,
}

/// Hybrid food search over the local, cloud and external layers
pub struct FoodSearchEngine {
    local: LocalCatalog,
    cloud: Option<Arc<dyn CloudCatalog>>,
    external: Option<Arc<dyn ExternalCatalog>>,
    cache: SearchCache,
    credentials: Arc<TokenCache>,
    external_threshold: usize,
}

impl FoodSearchEngine {
    /// Engine with only the local layer enabled
    #[must_use]
    pub fn new(local: LocalCatalog, cache: SearchCache, credentials: Arc<TokenCache>) -> Self {
        Self {
            local,
            cloud: None,
            external: None,
            cache,
            credentials,
            external_threshold: EXTERNAL_FALLBACK_THRESHOLD,
        }
    }

    /// Enable the cloud layer
    #[must_use]
    pub fn with_cloud(mut self, cloud: Arc<dyn CloudCatalog>) -> Self {
        self.cloud = Some(cloud);
        self
    }

    /// Enable the external layer
    #[must_use]
    pub fn with_external(mut self, external: Arc<dyn ExternalCatalog>) -> Self {
        self.external = Some(external);
        self
    }

    /// Local + cloud count at which the external layer is skipped
    #[must_use]
    pub const fn with_external_threshold(mut self, threshold: usize) -> Self {
        self.external_threshold = threshold;
        self
    }

    /// Bundled catalog
    #[must_use]
    pub const fn local(&self) -> &LocalCatalog {
        &self.local
    }

    /// Shared search cache
    #[must_use]
    pub const fn cache(&self) -> &SearchCache {
        &self.cache
    }

    /// Run a search across the layers selected by `options`
    ///
    /// Never fails; an empty list means no matches.
    pub async fn search(&self, query: &str, options: &SearchOptions) -> Vec<FoodItem> {
        let started = Instant::now();
        let key = SearchCacheKey::new(query, options);
        let cache_key = key.to_string();

        if let Some(hit) = self.cache.get(&cache_key).await {
            debug!(query = %key.query, layer = %options.layer, count = hit.len(), "Search cache hit");
            return hit;
        }

        let query = key.query;
        let tag = options.tag_filter();

        let local = if options.layer.includes_local() {
            self.local.search(&query, tag)
        } else {
            Vec::new()
        };
        let cloud = self.search_cloud(&query, options).await;

        let external = if self.should_fetch_external(&query, options, local.len() + cloud.len()) {
            self.search_external(&query).await
        } else {
            Vec::new()
        };

        let (local_count, cloud_count, external_count) = (local.len(), cloud.len(), external.len());
        let results = merge_layers(local, cloud, external);
        self.cache.insert(cache_key, results.clone()).await;

        info!(
            query = %query,
            layer = %options.layer,
            local = local_count,
            cloud = cloud_count,
            external = external_count,
            count = results.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "Food search completed"
        );
        results
    }

    /// Query the external layer directly
    ///
    /// Returns nothing for a blank query, when the layer is disabled, or
    /// when the source fails.
    pub async fn search_external(&self, query: &str) -> Vec<FoodItem> {
        let query = normalize_name(query);
        let Some(external) = self.external.as_ref() else {
            return Vec::new();
        };
        if query.is_empty() {
            return Vec::new();
        }

        match external.search(&query).await {
            Ok(foods) => foods,
            Err(e) => {
                warn!(query = %query, error = %e, "External search failed; continuing without it");
                Vec::new()
            }
        }
    }

    /// Browse view: enriched local catalog with the first few as quick picks
    #[must_use]
    pub fn discovery(&self, favorites: Vec<FoodItem>) -> Discovery {
        let catalog: Vec<FoodItem> = self.local.all().iter().map(enrich_tags).collect();
        let recent = catalog.iter().take(DISCOVERY_RECENT_COUNT).cloned().collect();
        Discovery {
            favorites,
            recent,
            catalog,
        }
    }

    /// Whether the external layer runs for a search that found `internal_count` candidates
    #[must_use]
    pub fn should_fetch_external(
        &self,
        normalized_query: &str,
        options: &SearchOptions,
        internal_count: usize,
    ) -> bool {
        !options.skip_external
            && options.layer.includes_external()
            && self.external.is_some()
            && !normalized_query.is_empty()
            && internal_count < self.external_threshold
    }

    async fn search_cloud(&self, query: &str, options: &SearchOptions) -> Vec<FoodItem> {
        let Some(cloud) = self.cloud.as_ref() else {
            return Vec::new();
        };
        if !options.layer.includes_cloud() {
            return Vec::new();
        }

        let credential = self.credentials.token().await;
        match cloud.search(query, options, credential.as_deref()).await {
            Ok(foods) => foods,
            Err(e) => {
                warn!(query = %query, error = %e, "Cloud search failed; continuing without it");
                Vec::new()
            }
        }
    }
}
