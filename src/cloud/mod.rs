// ABOUTME: Cloud catalog layer: backend food search contract and payload mapping
// ABOUTME: Raw backend documents are coerced into FoodItem with layer forced to CLOUD
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// HTTP client for the backend food catalog
pub mod client;

pub use client::CloudFoodClient;

use crate::engine::SearchOptions;
use crate::errors::AppResult;
use async_trait::async_trait;
use food_core::models::{FoodItem, Layer, Nutrients, ServingSize};
use serde::Deserialize;
use tracing::warn;

/// Backend food search
///
/// Implementations report failures as errors; the engine turns them into an
/// empty result set.
#[async_trait]
pub trait CloudCatalog: Send + Sync {
    /// Search the backend catalog
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or malformed body
    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
        credential: Option<&str>,
    ) -> AppResult<Vec<FoodItem>>;
}

/// Backend search response envelope
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CloudSearchResponse {
    #[serde(default)]
    pub(crate) foods: Option<Vec<serde_json::Value>>,
}

/// Backend food document, every field optional
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CloudFoodPayload {
    #[serde(rename = "_id", alias = "id")]
    id: Option<String>,
    name: Option<String>,
    brand: Option<String>,
    is_system: Option<bool>,
    owner_id: Option<serde_json::Value>,
    nutrients: Option<Nutrients>,
    image: Option<String>,
    tags: Option<Vec<String>>,
    usage_count: Option<u64>,
    is_favorite: Option<bool>,
    serving_size: Option<ServingSize>,
    is_composite: Option<bool>,
    instructions: Option<String>,
    prep_time: Option<u32>,
    ingredients: Option<Vec<serde_json::Value>>,
}

/// Map one backend document into a cloud `FoodItem`
///
/// Returns `None` for documents without a usable name.
pub(crate) fn map_cloud_food(raw: CloudFoodPayload) -> Option<FoodItem> {
    let name = raw.name.filter(|n| !n.trim().is_empty())?;
    let id = raw.id.unwrap_or_default();

    let mut item = FoodItem::new(id, name, Layer::Cloud)
        .system(raw.is_system.unwrap_or(false))
        .with_nutrients(raw.nutrients.unwrap_or_default())
        .with_tags(raw.tags.unwrap_or_default());
    item.brand = raw.brand.filter(|b| !b.trim().is_empty());
    item.owner_id = raw.owner_id.and_then(|owner| match owner {
        serde_json::Value::String(id) => Some(id),
        serde_json::Value::Object(map) => map
            .get("_id")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned),
        _ => None,
    });
    item.image = raw.image;
    item.usage_count = raw.usage_count;
    item.is_favorite = raw.is_favorite;
    item.serving_size = raw.serving_size;
    item.is_composite = raw.is_composite;
    item.instructions = raw.instructions;
    item.prep_time = raw.prep_time;
    item.ingredients = raw.ingredients.unwrap_or_default();
    Some(item)
}

/// Map one untyped backend document, logging and skipping it when malformed
pub(crate) fn map_cloud_document(doc: serde_json::Value) -> Option<FoodItem> {
    match serde_json::from_value::<CloudFoodPayload>(doc) {
        Ok(raw) => map_cloud_food(raw),
        Err(e) => {
            warn!(error = %e, "Skipping malformed cloud food document");
            None
        }
    }
}

/// Map a search envelope, skipping documents that do not parse
pub(crate) fn map_cloud_response(response: CloudSearchResponse) -> Vec<FoodItem> {
    response
        .foods
        .unwrap_or_default()
        .into_iter()
        .filter_map(map_cloud_document)
        .collect()
}
