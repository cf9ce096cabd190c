// ABOUTME: Wires configuration into a search engine and library client sharing caches and HTTP pool
// ABOUTME: Entry point for callers that want the whole food library stack from one config value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::cache::SearchCache;
use crate::catalog::LocalCatalog;
use crate::cloud::CloudFoodClient;
use crate::config::FoodSearchConfig;
use crate::credentials::{CredentialStore, StaticCredentialStore, TokenCache};
use crate::engine::{Discovery, FoodSearchEngine, ProgressiveSearch};
use crate::errors::{AppError, AppResult};
use crate::external::OpenFoodFactsClient;
use crate::library::FoodLibraryClient;
use std::sync::Arc;
use tracing::info;

/// User agent sent to the backend and to Open Food Facts
const USER_AGENT: &str = concat!("food-search/", env!("CARGO_PKG_VERSION"));

/// Search engine and library client over one set of caches
pub struct FoodService {
    engine: Arc<FoodSearchEngine>,
    library: FoodLibraryClient,
}

impl FoodService {
    /// Build the stack with the credential from `config.backend.api_token`
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is invalid or the HTTP client
    /// cannot be created
    pub fn from_config(config: &FoodSearchConfig) -> AppResult<Self> {
        let store = Arc::new(StaticCredentialStore::new(config.backend.api_token.clone()));
        Self::with_credentials(config, store)
    }

    /// Build the stack over a caller-provided credential store
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is invalid or the HTTP client
    /// cannot be created
    pub fn with_credentials(
        config: &FoodSearchConfig,
        store: Arc<dyn CredentialStore>,
    ) -> AppResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        let cache = SearchCache::new(config.cache.search_max_entries, config.cache.search_ttl);
        let credentials = Arc::new(TokenCache::new(store, config.cache.token_ttl));

        let mut engine = FoodSearchEngine::new(
            LocalCatalog::bundled(),
            cache.clone(),
            Arc::clone(&credentials),
        )
        .with_external_threshold(config.external_threshold);

        if config.backend.enabled {
            engine = engine.with_cloud(Arc::new(CloudFoodClient::new(
                http.clone(),
                &config.backend,
            )));
        }
        if config.external_enabled {
            engine = engine.with_external(Arc::new(OpenFoodFactsClient::new(
                http.clone(),
                config.external.clone(),
            )));
        }

        let library = FoodLibraryClient::new(http, &config.backend, credentials, cache);

        info!(
            backend = config.backend.enabled,
            external = config.external_enabled,
            base_url = %config.backend.base_url,
            "Food service initialized"
        );

        Ok(Self {
            engine: Arc::new(engine),
            library,
        })
    }

    /// Search engine
    #[must_use]
    pub fn engine(&self) -> &FoodSearchEngine {
        &self.engine
    }

    /// Backend mutations
    #[must_use]
    pub const fn library(&self) -> &FoodLibraryClient {
        &self.library
    }

    /// Progressive search driver for one interactive input
    #[must_use]
    pub fn progressive(&self) -> ProgressiveSearch {
        ProgressiveSearch::new(Arc::clone(&self.engine))
    }

    /// Browse view: favorites from the backend plus the enriched local catalog
    pub async fn discovery(&self) -> Discovery {
        let favorites = self.library.favorites().await;
        self.engine.discovery(favorites)
    }
}
