// ABOUTME: Search pipeline constants for the three catalog layers
// ABOUTME: External fallback threshold, page sizes, timeouts and endpoint defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// The external catalog is only consulted when local + cloud yield fewer results
pub const EXTERNAL_FALLBACK_THRESHOLD: usize = 10;

/// `limit` parameter sent with cloud searches
pub const CLOUD_PAGE_LIMIT: u32 = 50;

/// Default backend API root
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8081/api";

/// Default Open Food Facts root (Spanish regional mirror)
pub const DEFAULT_OPEN_FOOD_FACTS_URL: &str = "https://es.openfoodfacts.org";

/// Products requested per external search
pub const OPEN_FOOD_FACTS_PAGE_SIZE: u32 = 8;

/// Products kept from an external search after quality filtering
pub const OPEN_FOOD_FACTS_MAX_RESULTS: usize = 5;

/// External search request timeout in seconds
pub const OPEN_FOOD_FACTS_TIMEOUT_SECS: u64 = 10;

/// Client-side external search budget per minute
pub const OPEN_FOOD_FACTS_RATE_LIMIT_PER_MINUTE: u32 = 10;

/// Category tags carried over from an external product
pub const EXTERNAL_MAX_CATEGORY_TAGS: usize = 3;

/// Maximum relative deviation between reported and Atwater-estimated energy
pub const ATWATER_TOLERANCE: f64 = 0.4;

/// Number of catalog items surfaced as "recent" in the discovery view
pub const DISCOVERY_RECENT_COUNT: usize = 5;

/// Category fragments marking a product as a seasoning (allowed to have 0 kcal)
pub const SEASONING_CATEGORIES: &[&str] = &[
    "spices",
    "condiments",
    "seasonings",
    "herbs",
    "sauces",
    "vinegars",
    "mustards",
    "salt",
    "pepper",
];
