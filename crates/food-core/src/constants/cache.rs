// ABOUTME: Cache-related constants for search results and bearer credentials
// ABOUTME: Short TTLs keep results fresh while absorbing keystroke bursts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Search result cache TTL in seconds
pub const SEARCH_CACHE_TTL_SECS: u64 = 30;

/// Maximum number of cached search results; the oldest entry is evicted first
pub const SEARCH_CACHE_MAX_ENTRIES: usize = 50;

/// Bearer credential cache TTL in seconds
pub const TOKEN_CACHE_TTL_SECS: u64 = 60;
