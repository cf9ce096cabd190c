// ABOUTME: Main library entry point for the three-layer food library search engine
// ABOUTME: Resolves food queries across the bundled catalog, the backend and Open Food Facts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Food Search
//!
//! Produces one deduplicated, ranked list of food items from three sources:
//!
//! - **Local**: a bundled catalog, always available, never performs I/O
//! - **Cloud**: the backend food catalog (system and user-owned items)
//! - **API**: Open Food Facts, consulted only when internal results are sparse
//!
//! Name collisions are resolved by layer priority (`CLOUD > LOCAL > API`) so a
//! user's own cloned item shadows the generic entry it was cloned from.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use food_search::config::FoodSearchConfig;
//! use food_search::engine::SearchOptions;
//! use food_search::FoodService;
//!
//! # async fn example() -> food_search::errors::AppResult<()> {
//! let config = FoodSearchConfig::from_env()?;
//! let service = FoodService::from_config(&config)?;
//!
//! let foods = service.engine().search("pollo", &SearchOptions::default()).await;
//! for food in &foods {
//!     println!("[{}] {}", food.layer, food.name);
//! }
//! # Ok(())
//! # }
//! ```

/// Result and credential caches
pub mod cache;

/// Bundled offline food catalog
pub mod catalog;

/// Backend food catalog adapter
pub mod cloud;

/// Environment-driven configuration
pub mod config;

/// Bearer credential sources
pub mod credentials;

/// Merge, deduplication, ranking, enrichment and the search pipeline
pub mod engine;

/// External nutrition database clients (Open Food Facts)
pub mod external;

/// Food library mutations (save, favorite, delete) and usage pings
pub mod library;

/// Structured logging setup
pub mod logging;

/// Service wiring shared by the engine and the library client
pub mod service;

/// Re-exported error types from `food-core`
pub use food_core::errors;

/// Re-exported constants from `food-core`
pub use food_core::constants;

/// Re-exported models from `food-core`
pub use food_core::models;

pub use service::FoodService;
