// ABOUTME: Core data models for the food library
// ABOUTME: FoodItem, Layer provenance, per-100g Nutrients and serving metadata
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Food item, layer and nutrient models
pub mod food;

pub use food::{normalize_name, FoodItem, Layer, Nutrients, ServingSize};
