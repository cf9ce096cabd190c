// ABOUTME: Open Food Facts product search client for the external catalog layer
// ABOUTME: Implements search, product quality filtering, FoodItem mapping and rate limiting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Open Food Facts API Client
//!
//! Open Food Facts is a free, crowd-sourced product database. Data quality
//! varies, so every product goes through [`passes_quality_checks`] before it
//! is mapped:
//!
//! - products without a name are dropped
//! - zero-energy products are dropped unless categorized as a seasoning
//! - products with energy but no macros at all are dropped
//! - products whose reported energy deviates more than 40% from the Atwater
//!   estimate (4 kcal/g protein and carbohydrate, 9 kcal/g fat) are dropped
//!
//! # API Reference
//! <https://openfoodfacts.github.io/openfoodfacts-server/api/>

use super::ExternalCatalog;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use food_core::constants::search;
use food_core::models::{FoodItem, Layer, Nutrients};
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Service label used in error messages
const SERVICE: &str = "Open Food Facts";

/// Product fields requested from the search endpoint
const SEARCH_FIELDS: &str = "product_name,product_name_es,nutriments,image_front_small_url,image_url,code,brands,categories_tags";

/// Open Food Facts client configuration
#[derive(Debug, Clone)]
pub struct OpenFoodFactsConfig {
    /// Base URL (default: Spanish regional mirror)
    pub base_url: String,
    /// Products requested per search
    pub page_size: u32,
    /// Products kept after quality filtering
    pub max_results: usize,
    /// Request timeout; the service can be very slow
    pub timeout: Duration,
    /// Client-side search budget per minute
    pub rate_limit_per_minute: u32,
}

impl Default for OpenFoodFactsConfig {
    fn default() -> Self {
        Self {
            base_url: search::DEFAULT_OPEN_FOOD_FACTS_URL.to_owned(),
            page_size: search::OPEN_FOOD_FACTS_PAGE_SIZE,
            max_results: search::OPEN_FOOD_FACTS_MAX_RESULTS,
            timeout: Duration::from_secs(search::OPEN_FOOD_FACTS_TIMEOUT_SECS),
            rate_limit_per_minute: search::OPEN_FOOD_FACTS_RATE_LIMIT_PER_MINUTE,
        }
    }
}

/// Search response envelope
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub(crate) products: Option<Vec<OffProduct>>,
}

/// Product as returned by the search endpoint
#[derive(Debug, Default, Deserialize)]
pub(crate) struct OffProduct {
    #[serde(default, deserialize_with = "lenient_string")]
    pub(crate) code: Option<String>,
    #[serde(default)]
    pub(crate) product_name: Option<String>,
    #[serde(default)]
    pub(crate) product_name_es: Option<String>,
    #[serde(default)]
    pub(crate) brands: Option<String>,
    #[serde(default)]
    pub(crate) nutriments: Option<OffNutriments>,
    #[serde(default)]
    pub(crate) image_front_small_url: Option<String>,
    #[serde(default)]
    pub(crate) image_url: Option<String>,
    #[serde(default)]
    pub(crate) categories_tags: Option<Vec<String>>,
}

/// Per-100 g nutriment values; the API mixes numbers and numeric strings
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub(crate) struct OffNutriments {
    #[serde(rename = "energy-kcal_100g", default, deserialize_with = "lenient_f64")]
    pub(crate) energy_kcal: f64,
    #[serde(rename = "proteins_100g", default, deserialize_with = "lenient_f64")]
    pub(crate) proteins: f64,
    #[serde(rename = "carbohydrates_100g", default, deserialize_with = "lenient_f64")]
    pub(crate) carbohydrates: f64,
    #[serde(rename = "fat_100g", default, deserialize_with = "lenient_f64")]
    pub(crate) fat: f64,
    #[serde(rename = "fiber_100g", default, deserialize_with = "lenient_f64")]
    pub(crate) fiber: f64,
}

impl OffProduct {
    fn nutriments(&self) -> OffNutriments {
        self.nutriments.unwrap_or_default()
    }

    fn display_name(&self) -> Option<&str> {
        [&self.product_name_es, &self.product_name]
            .into_iter()
            .filter_map(Option::as_deref)
            .map(str::trim)
            .find(|name| !name.is_empty())
    }

    fn is_seasoning(&self) -> bool {
        self.categories_tags.as_ref().is_some_and(|categories| {
            categories.iter().any(|category| {
                let category = category.to_lowercase();
                search::SEASONING_CATEGORIES
                    .iter()
                    .any(|seasoning| category.contains(seasoning))
            })
        })
    }
}

/// Whether a product is trustworthy enough to show
pub(crate) fn passes_quality_checks(product: &OffProduct) -> bool {
    if product
        .product_name
        .as_deref()
        .is_none_or(|name| name.trim().is_empty())
    {
        return false;
    }

    let n = product.nutriments();
    let macros = n.proteins + n.carbohydrates + n.fat;

    if n.energy_kcal <= 0.0 {
        return product.is_seasoning();
    }
    if macros <= 0.0 {
        return false;
    }

    let expected = n.proteins.mul_add(4.0, n.carbohydrates.mul_add(4.0, n.fat * 9.0));
    expected <= 0.0 || (n.energy_kcal - expected).abs() / expected <= search::ATWATER_TOLERANCE
}

/// Map a product into an external-layer `FoodItem`
pub(crate) fn map_product(product: OffProduct) -> Option<FoodItem> {
    let name = product.display_name()?.to_owned();
    let n = product.nutriments();
    let code = product.code.clone().unwrap_or_default();

    let mut item = FoodItem::new(format!("off_{code}"), name, Layer::Api)
        .system(true)
        .with_nutrients(
            Nutrients::new(
                n.energy_kcal.round(),
                round_tenth(n.proteins),
                round_tenth(n.carbohydrates),
                round_tenth(n.fat),
            )
            .with_fiber(round_tenth(n.fiber)),
        )
        .with_tags(
            product
                .categories_tags
                .iter()
                .flatten()
                .take(search::EXTERNAL_MAX_CATEGORY_TAGS)
                .map(|tag| tag.replacen("en:", "", 1)),
        );
    item.brand = product.brands.filter(|b| !b.trim().is_empty());
    item.image = product.image_front_small_url.or(product.image_url);
    Some(item)
}

/// Filter, truncate and map a search response
pub(crate) fn map_search_response(response: SearchResponse, max_results: usize) -> Vec<FoodItem> {
    response
        .products
        .unwrap_or_default()
        .into_iter()
        .filter(passes_quality_checks)
        .take(max_results)
        .filter_map(map_product)
        .collect()
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Sliding-window rate limiter for API requests
#[derive(Debug)]
struct RateLimiter {
    requests: Vec<Instant>,
    limit: u32,
    window: Duration,
}

impl RateLimiter {
    const fn new(limit: u32, window: Duration) -> Self {
        Self {
            requests: Vec::new(),
            limit,
            window,
        }
    }

    /// Record a request if the window has room
    ///
    /// Searches are interactive, so an exhausted budget fails fast instead of
    /// sleeping until the window rolls over.
    fn try_acquire(&mut self) -> bool {
        let now = Instant::now();
        self.requests
            .retain(|&t| now.duration_since(t) < self.window);
        if self.requests.len() < self.limit as usize {
            self.requests.push(now);
            true
        } else {
            false
        }
    }
}

/// Open Food Facts search client
#[derive(Debug)]
pub struct OpenFoodFactsClient {
    config: OpenFoodFactsConfig,
    http_client: reqwest::Client,
    rate_limiter: Mutex<RateLimiter>,
}

impl OpenFoodFactsClient {
    /// Create a client sharing an HTTP connection pool
    #[must_use]
    pub fn new(http_client: reqwest::Client, config: OpenFoodFactsConfig) -> Self {
        let rate_limiter = RateLimiter::new(config.rate_limit_per_minute, Duration::from_secs(60));
        Self {
            config,
            http_client,
            rate_limiter: Mutex::new(rate_limiter),
        }
    }
}

#[async_trait]
impl ExternalCatalog for OpenFoodFactsClient {
    async fn search(&self, query: &str) -> AppResult<Vec<FoodItem>> {
        if query.trim().is_empty() {
            return Err(AppError::invalid_input("Search query cannot be empty"));
        }

        if !self.rate_limiter.lock().await.try_acquire() {
            return Err(AppError::rate_limited(SERVICE));
        }

        let url = format!("{}/cgi/search.pl", self.config.base_url.trim_end_matches('/'));
        let page_size = self.config.page_size.to_string();
        let response = self
            .http_client
            .get(&url)
            .timeout(self.config.timeout)
            .query(&[
                ("search_terms", query),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("page_size", page_size.as_str()),
                ("fields", SEARCH_FIELDS),
            ])
            .send()
            .await
            .map_err(|e| AppError::from(e).for_service(SERVICE))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(SERVICE, format!("HTTP {status}")));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::from(e).for_service(SERVICE))?;

        let foods = map_search_response(body, self.config.max_results);
        debug!(query, count = foods.len(), "External search returned");
        Ok(foods)
    }
}
