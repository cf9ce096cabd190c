// ABOUTME: Backend food library: save, import, favorite and delete mutations plus read helpers
// ABOUTME: Mutations propagate errors with the server's message; reads degrade to empty results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Food Library
//!
//! User-initiated writes against the backend catalog. Unlike search, these
//! surface failures to the caller: a silent failure would leave the user
//! believing a food was saved or favorited. Every successful mutation clears
//! the shared search cache so the next search sees the change.
//!
//! Favoriting follows clone-on-favorite: a cloud item with a backend id is
//! favorited in place, any other item is sent as data (without its id) so
//! the backend creates a user-owned cloud copy. That copy later shadows the
//! original in merged search results.

use crate::cache::SearchCache;
use crate::cloud::map_cloud_document;
use crate::config::BackendConfig;
use crate::credentials::TokenCache;
use crate::errors::{AppError, AppResult, ErrorCode};
use food_core::models::{FoodItem, Layer};
use regex::Regex;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::{Arc, OnceLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

/// Service label used in error messages
const SERVICE: &str = "Food backend";

/// Result of a favorite toggle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FavoriteOutcome {
    /// The favorited item (the cloud clone for non-cloud inputs)
    pub food: Option<FoodItem>,
    /// Backend action label, e.g. `added` or `removed`
    pub action: String,
}

/// Recipe built from a meal plan entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRecipe {
    /// Recipe name
    pub name: String,
    /// Plan items, passed through opaque
    pub items: Vec<Value>,
    /// Preparation steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FavoriteResponse {
    #[serde(default)]
    food: Option<Value>,
    #[serde(default)]
    action: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FoodsEnvelope {
    #[serde(default)]
    foods: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Client for the backend food library
#[derive(Clone)]
pub struct FoodLibraryClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<TokenCache>,
    cache: SearchCache,
}

impl FoodLibraryClient {
    /// Create a client sharing the engine's HTTP pool, credentials and search cache
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        config: &BackendConfig,
        credentials: Arc<TokenCache>,
        cache: SearchCache,
    ) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            credentials,
            cache,
        }
    }

    /// `{base}/foods/{segments...}` with every segment percent-encoded
    fn url(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            AppError::config(format!("Invalid backend URL {}: {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                AppError::config(format!("Backend URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .push("foods")
            .extend(segments);
        Ok(url)
    }

    /// Create (`POST /foods`) or update (`PUT /foods/{id}`) a food
    ///
    /// An item with an empty id is created.
    ///
    /// # Errors
    ///
    /// `AUTH_REQUIRED` without a session; otherwise the backend's error
    /// message or a transport error
    pub async fn save_food(&self, food: &FoodItem) -> AppResult<FoodItem> {
        let token = self.credentials.require_token().await?;
        let request = if food.id.is_empty() {
            self.http.post(self.url(&[])?)
        } else {
            self.http.put(self.url(&[food.id.as_str()])?)
        };

        let body = self
            .send(
                request.bearer_auth(token).json(&food_body(food)?),
                "Error saving food",
            )
            .await?;
        self.cache.clear().await;

        let saved = food_from_response(body)?;
        info!(id = %saved.id, name = %saved.name, "Food saved");
        Ok(saved)
    }

    /// Copy an item into the user's cloud library (`POST /foods/import`)
    ///
    /// # Errors
    ///
    /// Returns the backend's error message or a transport error
    pub async fn import_to_cloud(&self, food: &FoodItem) -> AppResult<FoodItem> {
        let mut request = self.http.post(self.url(&["import"])?).json(food);
        if let Some(token) = self.credentials.token().await {
            request = request.bearer_auth(token);
        }

        let body = self.send(request, "Error importing food").await?;
        self.cache.clear().await;

        let imported = food_from_response(body)?;
        info!(id = %imported.id, name = %imported.name, "Food imported to cloud");
        Ok(imported)
    }

    /// Save a meal plan entry as a recipe (`POST /foods/save-from-plan`)
    ///
    /// # Errors
    ///
    /// `AUTH_REQUIRED` without a session; otherwise the backend's error
    /// message, a transport error, or a response without a food
    pub async fn save_food_from_plan(&self, recipe: &PlanRecipe) -> AppResult<FoodItem> {
        let token = self.credentials.require_token().await?;
        let request = self
            .http
            .post(self.url(&["save-from-plan"])?)
            .bearer_auth(token)
            .json(recipe);

        let body = self
            .send(request, "Error saving recipe from plan")
            .await?;
        self.cache.clear().await;

        body.get("food")
            .cloned()
            .and_then(map_cloud_document)
            .ok_or_else(|| {
                AppError::external_service(SERVICE, "Response did not contain the saved recipe")
            })
    }

    /// Toggle the favorite state of an item, cloning non-cloud items
    ///
    /// # Errors
    ///
    /// `AUTH_REQUIRED` without a session; otherwise the backend's error
    /// message or a transport error
    pub async fn toggle_favorite(&self, food: &FoodItem) -> AppResult<FavoriteOutcome> {
        let token = self.credentials.require_token().await?;
        let request = self
            .http
            .post(self.url(&["favorite"])?)
            .bearer_auth(token)
            .json(&favorite_body(food)?);

        let body = self.send(request, "Error toggling favorite").await?;
        self.cache.clear().await;

        let response: FavoriteResponse = serde_json::from_value(body)?;
        let outcome = FavoriteOutcome {
            food: response.food.and_then(map_cloud_document),
            action: response.action.unwrap_or_default(),
        };
        info!(name = %food.name, layer = %food.layer, action = %outcome.action, "Favorite toggled");
        Ok(outcome)
    }

    /// Delete a food (`DELETE /foods/{id}`)
    ///
    /// # Errors
    ///
    /// `AUTH_REQUIRED` without a session, `INVALID_INPUT` for a blank id;
    /// otherwise the backend's error message or a transport error
    pub async fn delete_food(&self, id: &str) -> AppResult<()> {
        if id.trim().is_empty() {
            return Err(AppError::invalid_input("Food id must not be empty"));
        }
        let token = self.credentials.require_token().await?;
        let request = self
            .http
            .delete(self.url(&[id])?)
            .bearer_auth(token);

        self.send(request, "Error deleting food").await?;
        self.cache.clear().await;
        info!(id = %id, "Food deleted");
        Ok(())
    }

    /// Fetch one food; `None` when signed out, missing, or on any failure
    pub async fn get_food_by_id(&self, id: &str) -> Option<FoodItem> {
        if id.trim().is_empty() {
            return None;
        }
        let token = self.credentials.token().await?;
        let url = self.url(&[id]).ok()?;
        let request = self.http.get(url).bearer_auth(token);

        match self.send(request, "Error loading food").await {
            Ok(body) => map_cloud_document(body),
            Err(e) => {
                warn!(id = %id, error = %e, "Food lookup failed");
                None
            }
        }
    }

    /// The user's favorites; empty when signed out or on any failure
    pub async fn favorites(&self) -> Vec<FoodItem> {
        let Some(token) = self.credentials.token().await else {
            return Vec::new();
        };
        let url = match self.url(&["favorites"]) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "Favorites lookup failed");
                return Vec::new();
            }
        };
        let request = self.http.get(url).bearer_auth(token);

        let body = match self.send(request, "Error loading favorites").await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Favorites lookup failed");
                return Vec::new();
            }
        };
        serde_json::from_value::<FoodsEnvelope>(body)
            .unwrap_or_default()
            .foods
            .unwrap_or_default()
            .into_iter()
            .filter_map(map_cloud_document)
            .collect()
    }

    /// Record that a food was used; runs in the background and never fails
    ///
    /// The returned handle may be dropped. Failures are logged at `debug`.
    pub fn track_usage(&self, id: &str) -> JoinHandle<()> {
        let client = self.clone();
        let id = id.to_owned();
        tokio::spawn(async move {
            if let Err(e) = client.post_usage(&id).await {
                debug!(id = %id, error = %e, "Usage ping failed");
            }
        })
    }

    async fn post_usage(&self, id: &str) -> AppResult<()> {
        let mut request = self.http.post(self.url(&[id, "usage"])?);
        if let Some(token) = self.credentials.token().await {
            request = request.bearer_auth(token);
        }
        self.send(request, "Error recording usage").await?;
        Ok(())
    }

    /// Send a request; non-2xx becomes an error carrying the backend message
    ///
    /// 401 maps to `AUTH_INVALID` and drops the cached token, 404 to
    /// `RESOURCE_NOT_FOUND`, anything else to `EXTERNAL_SERVICE_ERROR`.
    async fn send(&self, request: RequestBuilder, fallback: &str) -> AppResult<Value> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::from(e).for_service(SERVICE))?;
        let status = response.status();

        if !status.is_success() {
            let message = error_message(response)
                .await
                .unwrap_or_else(|| format!("{fallback} ({status})"));
            let error = match status {
                StatusCode::UNAUTHORIZED => {
                    self.credentials.invalidate().await;
                    AppError::auth_invalid(message)
                }
                StatusCode::NOT_FOUND => AppError::new(ErrorCode::ResourceNotFound, message),
                _ => AppError::new(ErrorCode::ExternalServiceError, message),
            };
            return Err(error
                .for_service(SERVICE)
                .with_details(json!({ "status": status.as_u16() })));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::from(e).for_service(SERVICE))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

async fn error_message(response: Response) -> Option<String> {
    let body: ErrorBody = response.json().await.ok()?;
    body.error.filter(|e| !e.trim().is_empty())
}

/// Response shaped either `{food: {...}}` or as a bare item
fn food_from_response(body: Value) -> AppResult<FoodItem> {
    let doc = match body {
        Value::Object(mut map) if map.contains_key("food") => {
            map.remove("food").unwrap_or(Value::Null)
        }
        other => other,
    };
    map_cloud_document(doc).ok_or_else(|| {
        AppError::external_service(SERVICE, "Response did not contain a valid food")
    })
}

/// Serialized item, without `_id` when it has none yet
fn food_body(food: &FoodItem) -> AppResult<Value> {
    let mut body = serde_json::to_value(food)?;
    if food.id.is_empty() {
        if let Value::Object(map) = &mut body {
            map.remove("_id");
        }
    }
    Ok(body)
}

/// Request body for the favorite toggle
fn favorite_body(food: &FoodItem) -> AppResult<Value> {
    if food.layer == Layer::Cloud && is_object_id(&food.id) {
        return Ok(json!({ "layer": Layer::Cloud, "foodId": food.id }));
    }

    let mut data = serde_json::to_value(food)?;
    if let Value::Object(map) = &mut data {
        map.remove("_id");
    }
    Ok(json!({ "layer": food.layer, "foodData": data }))
}

fn object_id_regex() -> Option<&'static Regex> {
    static OBJECT_ID_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    OBJECT_ID_REGEX
        .get_or_init(|| Regex::new(r"(?i)^[a-f\d]{24}$").ok())
        .as_ref()
}

/// Whether `id` is a backend document id (24 hex characters)
fn is_object_id(id: &str) -> bool {
    object_id_regex().is_some_and(|re| re.is_match(id))
}
