// ABOUTME: Real-server tests for food library mutations and read helpers
// ABOUTME: Checks request shapes, clone-on-favorite, error propagation and cache invalidation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use food_search::cache::SearchCache;
use food_search::config::BackendConfig;
use food_search::errors::ErrorCode;
use food_search::library::{FoodLibraryClient, PlanRecipe};
use food_search::models::{FoodItem, Layer, Nutrients};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
struct Call {
    route: String,
    body: Value,
    auth: Option<String>,
}

#[derive(Clone, Default)]
struct Backend {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Backend {
    fn record(&self, route: impl Into<String>, headers: &HeaderMap, body: Value) {
        self.calls.lock().unwrap().push(Call {
            route: route.into(),
            body,
            auth: headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned),
        });
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

fn saved(id: &str, body: &Value) -> Value {
    json!({
        "_id": id,
        "name": body["name"],
        "layer": "CLOUD",
        "isSystem": false,
        "ownerId": "user_1",
        "nutrients": body["nutrients"],
    })
}

fn backend_router(backend: Backend) -> Router {
    Router::new()
        .route(
            "/api/foods",
            post(
                |State(b): State<Backend>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    b.record("POST /foods", &headers, body.clone());
                    Json(json!({ "food": saved("64b7f0c2a1d3e4f5a6b7c8d9", &body) }))
                },
            ),
        )
        .route(
            "/api/foods/favorites",
            get(|State(b): State<Backend>, headers: HeaderMap| async move {
                b.record("GET /foods/favorites", &headers, Value::Null);
                Json(json!({
                    "foods": [
                        {"_id": "64b7f0c2a1d3e4f5a6b7c8d9", "name": "Tortilla", "isFavorite": true},
                        {"broken": true}
                    ]
                }))
            }),
        )
        .route(
            "/api/foods/favorite",
            post(
                |State(b): State<Backend>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    b.record("POST /foods/favorite", &headers, body.clone());
                    let name = body["foodData"]["name"].as_str().unwrap_or("Tortilla").to_owned();
                    Json(json!({
                        "food": {"_id": "64b7f0c2a1d3e4f5a6b7c8da", "name": name, "isFavorite": true},
                        "action": "added"
                    }))
                },
            ),
        )
        .route(
            "/api/foods/import",
            post(
                |State(b): State<Backend>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    b.record("POST /foods/import", &headers, body.clone());
                    Json(saved("64b7f0c2a1d3e4f5a6b7c8db", &body))
                },
            ),
        )
        .route(
            "/api/foods/save-from-plan",
            post(
                |State(b): State<Backend>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    b.record("POST /foods/save-from-plan", &headers, body.clone());
                    Json(json!({
                        "food": {"_id": "64b7f0c2a1d3e4f5a6b7c8dc", "name": body["name"],
                                 "isComposite": true, "instructions": body["instructions"]}
                    }))
                },
            ),
        )
        .route(
            "/api/foods/:id",
            get(
                |State(b): State<Backend>, Path(id): Path<String>, headers: HeaderMap| async move {
                    b.record(format!("GET /foods/{id}"), &headers, Value::Null);
                    if id == "missing" {
                        return Err((StatusCode::NOT_FOUND, Json(json!({"error": "Not found"}))));
                    }
                    Ok(Json(json!({"_id": id, "name": "Pisto", "layer": "CLOUD"})))
                },
            )
            .put(
                |State(b): State<Backend>,
                 Path(id): Path<String>,
                 headers: HeaderMap,
                 Json(body): Json<Value>| async move {
                    b.record(format!("PUT /foods/{id}"), &headers, body.clone());
                    if id == "forbidden" {
                        return Err((
                            StatusCode::FORBIDDEN,
                            Json(json!({"error": "No puedes editar alimentos del sistema"})),
                        ));
                    }
                    Ok(Json(saved(&id, &body)))
                },
            )
            .delete(
                |State(b): State<Backend>, Path(id): Path<String>, headers: HeaderMap| async move {
                    b.record(format!("DELETE /foods/{id}"), &headers, Value::Null);
                    match id.as_str() {
                        "locked" => return Err((StatusCode::CONFLICT, "in use".to_owned())),
                        "expired" => return Err((StatusCode::UNAUTHORIZED, String::new())),
                        "gone" => return Err((StatusCode::NOT_FOUND, String::new())),
                        _ => {}
                    }
                    Ok(Json(json!({"success": true})))
                },
            ),
        )
        .route(
            "/api/foods/:id/usage",
            post(
                |State(b): State<Backend>, Path(id): Path<String>, headers: HeaderMap| async move {
                    b.record(format!("POST /foods/{id}/usage"), &headers, Value::Null);
                    StatusCode::NO_CONTENT
                },
            ),
        )
        .with_state(backend)
}

struct Harness {
    backend: Backend,
    cache: SearchCache,
    library: FoodLibraryClient,
}

async fn harness(token: Option<&str>) -> Result<Harness> {
    common::init_test_logging();
    let backend = Backend::default();
    let base = common::spawn_server(backend_router(backend.clone())).await?;
    let config = BackendConfig {
        base_url: format!("{base}/api"),
        ..BackendConfig::default()
    };
    let cache = SearchCache::new(50, Duration::from_secs(30));
    let library = FoodLibraryClient::new(
        reqwest::Client::new(),
        &config,
        common::token_cache(token),
        cache.clone(),
    );
    Ok(Harness {
        backend,
        cache,
        library,
    })
}

fn draft(name: &str) -> FoodItem {
    FoodItem::new("", name, Layer::Cloud).with_nutrients(Nutrients::new(120.0, 4.0, 18.0, 3.5))
}

#[tokio::test]
async fn test_save_new_food_posts_without_id_and_clears_cache() -> Result<()> {
    let h = harness(Some("tok")).await?;
    h.cache.insert("pisto|ALL||false".to_owned(), Vec::new()).await;

    let food = h.library.save_food(&draft("Pisto manchego")).await?;

    assert_eq!(food.id, "64b7f0c2a1d3e4f5a6b7c8d9");
    assert_eq!(food.layer, Layer::Cloud);
    assert_eq!(food.owner_id.as_deref(), Some("user_1"));
    assert!(h.cache.is_empty().await);

    let calls = h.backend.calls();
    assert_eq!(calls[0].route, "POST /foods");
    assert_eq!(calls[0].auth.as_deref(), Some("Bearer tok"));
    assert!(calls[0].body.get("_id").is_none());
    assert_eq!(calls[0].body["name"], "Pisto manchego");
    Ok(())
}

#[tokio::test]
async fn test_save_existing_food_puts_bare_response() -> Result<()> {
    let h = harness(Some("tok")).await?;
    let mut food = draft("Pisto");
    food.id = "64b7f0c2a1d3e4f5a6b7c8d9".to_owned();

    let updated = h.library.save_food(&food).await?;

    assert_eq!(updated.id, "64b7f0c2a1d3e4f5a6b7c8d9");
    assert_eq!(h.backend.calls()[0].route, "PUT /foods/64b7f0c2a1d3e4f5a6b7c8d9");
    Ok(())
}

#[tokio::test]
async fn test_save_propagates_server_message() -> Result<()> {
    let h = harness(Some("tok")).await?;
    let mut food = draft("Pisto");
    food.id = "forbidden".to_owned();
    h.cache.insert("k".to_owned(), Vec::new()).await;

    let err = h.library.save_food(&food).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert!(err.message.contains("No puedes editar alimentos del sistema"));
    assert_eq!(h.cache.len().await, 1);
    Ok(())
}

#[tokio::test]
async fn test_mutations_require_session() -> Result<()> {
    let h = harness(None).await?;

    let food = FoodItem::new("local_001", "Pechuga de pollo", Layer::Local);
    let errors = [
        h.library.save_food(&draft("Pisto")).await.unwrap_err(),
        h.library.toggle_favorite(&food).await.unwrap_err(),
        h.library.delete_food("64b7f0c2a1d3e4f5a6b7c8d9").await.unwrap_err(),
        h.library
            .save_food_from_plan(&PlanRecipe {
                name: "Bowl".to_owned(),
                items: Vec::new(),
                instructions: None,
                image: None,
            })
            .await
            .unwrap_err(),
    ];

    for err in errors {
        assert_eq!(err.code, ErrorCode::AuthRequired);
        assert_eq!(err.message, "No active session");
    }
    assert!(h.backend.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_favorite_local_item_sends_clone_data() -> Result<()> {
    let h = harness(Some("tok")).await?;
    let food = FoodItem::new("local_001", "Pechuga de pollo", Layer::Local)
        .with_nutrients(Nutrients::new(110.0, 23.0, 0.0, 1.2));

    let outcome = h.library.toggle_favorite(&food).await?;

    assert_eq!(outcome.action, "added");
    let clone = outcome.food.unwrap();
    assert_eq!(clone.layer, Layer::Cloud);
    assert_eq!(clone.name, "Pechuga de pollo");

    let call = &h.backend.calls()[0];
    assert_eq!(call.body["layer"], "LOCAL");
    assert!(call.body.get("foodId").is_none());
    assert!(call.body["foodData"].get("_id").is_none());
    assert_eq!(call.body["foodData"]["nutrients"]["protein"], 23.0);
    Ok(())
}

#[tokio::test]
async fn test_favorite_cloud_item_sends_id_only() -> Result<()> {
    let h = harness(Some("tok")).await?;
    let food = FoodItem::new("64b7f0c2a1d3e4f5a6b7c8d9", "Tortilla", Layer::Cloud);

    h.library.toggle_favorite(&food).await?;

    let call = &h.backend.calls()[0];
    assert_eq!(
        call.body,
        json!({"layer": "CLOUD", "foodId": "64b7f0c2a1d3e4f5a6b7c8d9"})
    );
    Ok(())
}

#[tokio::test]
async fn test_delete_food() -> Result<()> {
    let h = harness(Some("tok")).await?;
    h.cache.insert("k".to_owned(), Vec::new()).await;

    h.library.delete_food("64b7f0c2a1d3e4f5a6b7c8d9").await?;
    assert!(h.cache.is_empty().await);

    let err = h.library.delete_food("locked").await.unwrap_err();
    assert!(err.message.contains("Error deleting food"));
    assert!(err.message.contains("409"));

    let err = h.library.delete_food(" ").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_backend_status_selects_error_code() -> Result<()> {
    let h = harness(Some("tok")).await?;

    let err = h.library.delete_food("expired").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthInvalid);
    assert_eq!(err.message, "Food backend: Error deleting food (401 Unauthorized)");
    assert_eq!(err.details["status"], 401);

    let err = h.library.delete_food("gone").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let err = h.library.delete_food("locked").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    Ok(())
}

#[tokio::test]
async fn test_ids_are_sent_as_a_single_path_segment() -> Result<()> {
    let h = harness(Some("tok")).await?;
    let mut food = draft("Pisto");
    food.id = "a/b?c#d".to_owned();

    let updated = h.library.save_food(&food).await?;
    h.library.delete_food("x/../favorites").await?;

    assert_eq!(updated.id, "a/b?c#d");
    let routes: Vec<String> = h.backend.calls().into_iter().map(|c| c.route).collect();
    assert_eq!(routes, ["PUT /foods/a/b?c#d", "DELETE /foods/x/../favorites"]);
    Ok(())
}

#[tokio::test]
async fn test_import_and_save_from_plan() -> Result<()> {
    let h = harness(Some("tok")).await?;
    let api_food = FoodItem::new("off_123", "Yogur natural", Layer::Api);

    let imported = h.library.import_to_cloud(&api_food).await?;
    assert_eq!(imported.layer, Layer::Cloud);
    assert_eq!(imported.name, "Yogur natural");

    let recipe = PlanRecipe {
        name: "Bowl de avena".to_owned(),
        items: vec![json!({"foodId": "local_019", "grams": 60})],
        instructions: Some("Mezclar".to_owned()),
        image: None,
    };
    let saved = h.library.save_food_from_plan(&recipe).await?;
    assert_eq!(saved.name, "Bowl de avena");
    assert_eq!(saved.is_composite, Some(true));

    let calls = h.backend.calls();
    assert_eq!(calls[0].route, "POST /foods/import");
    assert_eq!(calls[1].route, "POST /foods/save-from-plan");
    assert_eq!(calls[1].body["items"][0]["grams"], 60);
    assert!(calls[1].body.get("image").is_none());
    Ok(())
}

#[tokio::test]
async fn test_read_helpers_degrade_quietly() -> Result<()> {
    let h = harness(Some("tok")).await?;

    let food = h.library.get_food_by_id("64b7f0c2a1d3e4f5a6b7c8d9").await;
    assert_eq!(food.map(|f| f.name), Some("Pisto".to_owned()));
    assert!(h.library.get_food_by_id("missing").await.is_none());
    assert!(h.library.get_food_by_id("").await.is_none());

    let favorites = h.library.favorites().await;
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].is_favorite, Some(true));

    let signed_out = harness(None).await?;
    assert!(signed_out.library.favorites().await.is_empty());
    assert!(signed_out.library.get_food_by_id("abc").await.is_none());
    assert!(signed_out.backend.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_track_usage_is_fire_and_forget() -> Result<()> {
    let h = harness(Some("tok")).await?;

    h.library.track_usage("64b7f0c2a1d3e4f5a6b7c8d9").await?;
    assert_eq!(
        h.backend.calls()[0].route,
        "POST /foods/64b7f0c2a1d3e4f5a6b7c8d9/usage"
    );

    // Unreachable backend: the ping completes without surfacing an error
    let config = BackendConfig {
        base_url: "http://127.0.0.1:9/api".to_owned(),
        ..BackendConfig::default()
    };
    let offline = FoodLibraryClient::new(
        reqwest::Client::new(),
        &config,
        common::token_cache(Some("tok")),
        SearchCache::new(50, Duration::from_secs(30)),
    );
    offline.track_usage("abc").await?;
    Ok(())
}
