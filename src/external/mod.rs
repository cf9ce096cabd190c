// ABOUTME: External catalog layer: third-party nutrition database clients
// ABOUTME: Consulted only as a fallback when internal results are sparse
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! External API Clients
//!
//! The external layer is an open-ended product database. It is slow and
//! noisy, so products are quality-filtered before they become `FoodItem`s.

/// Open Food Facts product search client
pub mod open_food_facts;

pub use open_food_facts::{OpenFoodFactsClient, OpenFoodFactsConfig};

use crate::errors::AppResult;
use async_trait::async_trait;
use food_core::models::FoodItem;

/// Third-party product search
///
/// Implementations report failures as errors; the engine turns them into an
/// empty result set.
#[async_trait]
pub trait ExternalCatalog: Send + Sync {
    /// Search products by free text; `query` is already normalized and non-empty
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, rate limiting or malformed body
    async fn search(&self, query: &str) -> AppResult<Vec<FoodItem>>;
}
