// ABOUTME: Application constants for search thresholds, caching and the tag vocabulary
// ABOUTME: Shared by the engine, the source adapters and configuration defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Cache TTLs and capacities
pub mod cache;

/// Derived-tag vocabulary and nutrient thresholds
pub mod tags;

/// Search pipeline limits and external catalog defaults
pub mod search;
