// ABOUTME: HTTP client for the backend food search endpoint
// ABOUTME: GET /foods/search with bearer credential; non-2xx and bad JSON become errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{map_cloud_response, CloudCatalog, CloudSearchResponse};
use crate::config::BackendConfig;
use crate::engine::SearchOptions;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use food_core::models::{normalize_name, FoodItem};
use tracing::debug;

/// Service label used in error messages
const SERVICE: &str = "Food backend";

/// Backend catalog client
#[derive(Debug, Clone)]
pub struct CloudFoodClient {
    http: reqwest::Client,
    base_url: String,
    page_limit: u32,
}

impl CloudFoodClient {
    /// Create a client sharing an HTTP connection pool
    #[must_use]
    pub fn new(http: reqwest::Client, config: &BackendConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            page_limit: config.page_limit,
        }
    }

    fn query_params(&self, query: &str, options: &SearchOptions) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(4);
        let query = normalize_name(query);
        if !query.is_empty() {
            params.push(("q", query));
        }
        if let Some(tag) = options.tag_filter() {
            params.push(("tag", tag.to_owned()));
        }
        if let Some(layer) = options.layer.backend_param() {
            params.push(("layer", layer.to_owned()));
        }
        params.push(("limit", self.page_limit.to_string()));
        params
    }
}

#[async_trait]
impl CloudCatalog for CloudFoodClient {
    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
        credential: Option<&str>,
    ) -> AppResult<Vec<FoodItem>> {
        let url = format!("{}/foods/search", self.base_url);
        let mut request = self.http.get(&url).query(&self.query_params(query, options));
        if let Some(token) = credential {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::from(e).for_service(SERVICE))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(
                SERVICE,
                format!("HTTP {status} from food search"),
            ));
        }

        let body: CloudSearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::from(e).for_service(SERVICE))?;

        let foods = map_cloud_response(body);
        debug!(count = foods.len(), "Cloud search returned");
        Ok(foods)
    }
}
