// ABOUTME: Configuration management module for the food search engine
// ABOUTME: Environment-only configuration for layers, caches and the external catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: all settings read from environment variables (and `.env`)

/// Environment configuration
pub mod environment;

pub use environment::{BackendConfig, CacheSettings, FoodSearchConfig};
