// ABOUTME: Core types and constants for the food library search engine
// ABOUTME: Foundation crate with error handling, food models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Food Core
//!
//! Foundation crate providing shared types and constants for the food library.
//! This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Thresholds, cache defaults, and the tag vocabulary
//! - **models**: `FoodItem`, `Layer`, `Nutrients` and related types

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`FoodItem`, `Layer`, `Nutrients`)
pub mod models;
