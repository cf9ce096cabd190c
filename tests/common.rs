// ABOUTME: Shared test utilities for food search integration tests
// ABOUTME: Mock catalog sources with call counters, engine builders and throwaway HTTP servers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `food_search`

use anyhow::Result;
use async_trait::async_trait;
use axum::Router;
use food_search::cache::SearchCache;
use food_search::catalog::LocalCatalog;
use food_search::cloud::CloudCatalog;
use food_search::credentials::{StaticCredentialStore, TokenCache};
use food_search::engine::{FoodSearchEngine, SearchOptions};
use food_search::errors::{AppError, AppResult};
use food_search::external::ExternalCatalog;
use food_search::models::{FoodItem, Layer, Nutrients};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;
use tokio::sync::Notify;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Test food with the given macros
pub fn food(id: &str, name: &str, layer: Layer, kcal: f64) -> FoodItem {
    FoodItem::new(id, name, layer).with_nutrients(Nutrients::new(kcal, 10.0, 10.0, 5.0))
}

/// `count` distinct cloud foods named `"{prefix} {i}"`
pub fn cloud_foods(prefix: &str, count: usize) -> Vec<FoodItem> {
    (0..count)
        .map(|i| food(&format!("cloud_{i}"), &format!("{prefix} {i}"), Layer::Cloud, 120.0))
        .collect()
}

/// `count` distinct external foods named `"{prefix} {i}"`
pub fn api_foods(prefix: &str, count: usize) -> Vec<FoodItem> {
    (0..count)
        .map(|i| food(&format!("off_{i}"), &format!("{prefix} {i}"), Layer::Api, 200.0))
        .collect()
}

/// Cloud source returning a fixed list and recording every call
#[derive(Default)]
pub struct MockCloud {
    foods: Vec<FoodItem>,
    fail: bool,
    calls: AtomicUsize,
    credentials: Mutex<Vec<Option<String>>>,
}

impl MockCloud {
    pub fn returning(foods: Vec<FoodItem>) -> Arc<Self> {
        Arc::new(Self {
            foods,
            ..Self::default()
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn credentials_seen(&self) -> Vec<Option<String>> {
        self.credentials.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl CloudCatalog for MockCloud {
    async fn search(
        &self,
        _query: &str,
        _options: &SearchOptions,
        credential: Option<&str>,
    ) -> AppResult<Vec<FoodItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.credentials.lock() {
            seen.push(credential.map(str::to_owned));
        }
        if self.fail {
            return Err(AppError::external_unavailable("Food backend", "connection refused"));
        }
        Ok(self.foods.clone())
    }
}

/// External source returning a fixed list, optionally held until released
#[derive(Default)]
pub struct MockExternal {
    foods: Vec<FoodItem>,
    fail: bool,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
    gate: Option<Arc<Notify>>,
}

impl MockExternal {
    pub fn returning(foods: Vec<FoodItem>) -> Arc<Self> {
        Arc::new(Self {
            foods,
            ..Self::default()
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    /// Responses wait until `gate` is notified
    pub fn gated(foods: Vec<FoodItem>, gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            foods,
            gate: Some(gate),
            ..Self::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ExternalCatalog for MockExternal {
    async fn search(&self, query: &str) -> AppResult<Vec<FoodItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_owned());
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail {
            return Err(AppError::external_service("Open Food Facts", "HTTP 503"));
        }
        Ok(self.foods.clone())
    }
}

/// Credential cache over a fixed token
pub fn token_cache(token: Option<&str>) -> Arc<TokenCache> {
    Arc::new(TokenCache::new(
        Arc::new(StaticCredentialStore::new(token.map(str::to_owned))),
        Duration::from_secs(60),
    ))
}

/// Default-sized search cache
pub fn search_cache() -> SearchCache {
    SearchCache::new(50, Duration::from_secs(30))
}

/// Engine over the bundled catalog and the given mocks, signed in as `test-token`
pub fn engine_with(cloud: &Arc<MockCloud>, external: &Arc<MockExternal>) -> FoodSearchEngine {
    FoodSearchEngine::new(LocalCatalog::bundled(), search_cache(), token_cache(Some("test-token")))
        .with_cloud(Arc::clone(cloud) as Arc<dyn CloudCatalog>)
        .with_external(Arc::clone(external) as Arc<dyn ExternalCatalog>)
}

/// Serve `app` on an ephemeral local port and return its base URL
pub async fn spawn_server(app: Router) -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}
