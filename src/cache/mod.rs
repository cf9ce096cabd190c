// ABOUTME: Cache layer for search results with time-boxed entries
// ABOUTME: Structured cache keys built from the normalized query and search options
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// In-memory TTL cache implementation
pub mod memory;

pub use memory::TtlCache;

use crate::engine::SearchOptions;
use food_core::models::{normalize_name, FoodItem};
use std::fmt;

/// Search result cache shared by the engine and the library client
pub type SearchCache = TtlCache<Vec<FoodItem>>;

/// Structured cache key for one search
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchCacheKey {
    /// Trimmed, lower-cased query
    pub query: String,
    /// Search options in effect
    pub options: SearchOptions,
}

impl SearchCacheKey {
    /// Create a key, normalizing the query
    #[must_use]
    pub fn new(query: &str, options: &SearchOptions) -> Self {
        Self {
            query: normalize_name(query),
            options: options.clone(),
        }
    }
}

impl fmt::Display for SearchCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.query,
            self.options.layer,
            self.options.tag_filter().unwrap_or_default(),
            self.options.skip_external
        )
    }
}
