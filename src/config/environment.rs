// ABOUTME: Environment-based configuration for backend, external catalog and cache settings
// ABOUTME: Parses and validates FOOD_* and OPEN_FOOD_FACTS_* variables with sane defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use crate::external::OpenFoodFactsConfig;
use food_core::constants::{cache, search};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Backend (cloud layer and mutations) configuration
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// API root, e.g. `https://host/api`; endpoints live under `/foods`
    pub base_url: String,
    /// Whether the cloud layer is consulted at all
    pub enabled: bool,
    /// `limit` sent with cloud searches
    pub page_limit: u32,
    /// Static bearer credential, if provided through the environment
    pub api_token: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: search::DEFAULT_API_BASE_URL.to_owned(),
            enabled: true,
            page_limit: search::CLOUD_PAGE_LIMIT,
            api_token: None,
        }
    }
}

/// Search cache and credential cache settings
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Search result TTL
    pub search_ttl: Duration,
    /// Maximum cached searches
    pub search_max_entries: usize,
    /// Credential re-read interval
    pub token_ttl: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            search_ttl: Duration::from_secs(cache::SEARCH_CACHE_TTL_SECS),
            search_max_entries: cache::SEARCH_CACHE_MAX_ENTRIES,
            token_ttl: Duration::from_secs(cache::TOKEN_CACHE_TTL_SECS),
        }
    }
}

/// Complete food search configuration
#[derive(Debug, Clone)]
pub struct FoodSearchConfig {
    /// Backend settings
    pub backend: BackendConfig,
    /// External catalog settings
    pub external: OpenFoodFactsConfig,
    /// Whether the external layer is consulted at all
    pub external_enabled: bool,
    /// External layer is skipped once local + cloud reach this many results
    pub external_threshold: usize,
    /// Cache settings
    pub cache: CacheSettings,
}

impl Default for FoodSearchConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            external: OpenFoodFactsConfig::default(),
            external_enabled: true,
            external_threshold: search::EXTERNAL_FALLBACK_THRESHOLD,
            cache: CacheSettings::default(),
        }
    }
}

impl FoodSearchConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns a `CONFIG_INVALID` error naming the offending variable when a
    /// value cannot be parsed or a URL is malformed
    pub fn from_env() -> AppResult<Self> {
        info!("Loading food search configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file loaded: {}", e);
        }

        let defaults = Self::default();

        let config = Self {
            backend: BackendConfig {
                base_url: env_url("FOOD_API_BASE_URL", &defaults.backend.base_url)?,
                enabled: env_bool("FOOD_BACKEND_ENABLED", defaults.backend.enabled)?,
                page_limit: env_parse("FOOD_CLOUD_PAGE_LIMIT", defaults.backend.page_limit)?,
                api_token: env::var("FOOD_API_TOKEN")
                    .ok()
                    .filter(|token| !token.trim().is_empty()),
            },
            external: OpenFoodFactsConfig {
                base_url: env_url("OPEN_FOOD_FACTS_BASE_URL", &defaults.external.base_url)?,
                page_size: env_parse("OPEN_FOOD_FACTS_PAGE_SIZE", defaults.external.page_size)?,
                max_results: env_parse(
                    "OPEN_FOOD_FACTS_MAX_RESULTS",
                    defaults.external.max_results,
                )?,
                timeout: Duration::from_secs(env_parse(
                    "OPEN_FOOD_FACTS_TIMEOUT_SECS",
                    defaults.external.timeout.as_secs(),
                )?),
                rate_limit_per_minute: env_parse(
                    "OPEN_FOOD_FACTS_RATE_LIMIT_PER_MINUTE",
                    defaults.external.rate_limit_per_minute,
                )?,
            },
            external_enabled: env_bool("FOOD_EXTERNAL_ENABLED", defaults.external_enabled)?,
            external_threshold: env_parse("FOOD_EXTERNAL_THRESHOLD", defaults.external_threshold)?,
            cache: CacheSettings {
                search_ttl: Duration::from_secs(env_parse(
                    "FOOD_SEARCH_CACHE_TTL_SECS",
                    defaults.cache.search_ttl.as_secs(),
                )?),
                search_max_entries: env_parse(
                    "FOOD_SEARCH_CACHE_MAX_ENTRIES",
                    defaults.cache.search_max_entries,
                )?,
                token_ttl: Duration::from_secs(env_parse(
                    "FOOD_TOKEN_CACHE_TTL_SECS",
                    defaults.cache.token_ttl.as_secs(),
                )?),
            },
        };

        config.validate()?;

        info!(
            backend = %config.backend.base_url,
            backend_enabled = config.backend.enabled,
            external = %config.external.base_url,
            external_enabled = config.external_enabled,
            "Food search configuration loaded"
        );

        Ok(config)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns a `CONFIG_INVALID` error for zero page sizes or rate limits
    pub fn validate(&self) -> AppResult<()> {
        if self.external.page_size == 0 || self.external.page_size > 100 {
            return Err(AppError::config(
                "OPEN_FOOD_FACTS_PAGE_SIZE must be between 1 and 100",
            ));
        }
        if self.external.rate_limit_per_minute == 0 {
            return Err(AppError::config(
                "OPEN_FOOD_FACTS_RATE_LIMIT_PER_MINUTE must be at least 1",
            ));
        }
        if self.backend.page_limit == 0 {
            return Err(AppError::config("FOOD_CLOUD_PAGE_LIMIT must be at least 1"));
        }
        Ok(())
    }
}

/// Parse an environment variable, falling back to a default when unset
fn env_parse<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}"))),
        Err(_) => Ok(default),
    }
}

/// Parse a boolean flag accepting `true/false`, `1/0`, `yes/no`
fn env_bool(key: &str, default: bool) -> AppResult<bool> {
    env::var(key).map_or(Ok(default), |raw| {
        parse_bool(&raw).ok_or_else(|| AppError::config(format!("Invalid {key} value '{raw}'")))
    })
}

/// Read a URL variable and normalize it without a trailing slash
fn env_url(key: &str, default: &str) -> AppResult<String> {
    let raw = env::var(key).unwrap_or_else(|_| default.to_owned());
    normalize_base_url(&raw)
        .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}")))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn normalize_base_url(raw: &str) -> Result<String, url::ParseError> {
    let parsed = Url::parse(raw.trim())?;
    Ok(parsed.as_str().trim_end_matches('/').to_owned())
}
