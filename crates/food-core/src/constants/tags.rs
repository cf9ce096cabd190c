// ABOUTME: Goal tags derived from nutrient values and their thresholds
// ABOUTME: All thresholds are per 100 g serving
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Low-calorie food suited to a cutting phase
pub const DEFINITION: &str = "DEFINICION";

/// High-calorie food suited to a bulking phase
pub const VOLUME: &str = "VOLUMEN";

/// Protein-dense food
pub const HIGH_PROTEIN: &str = "ALTA_PROTEINA";

/// Near carbohydrate-free food
pub const LOW_CARB: &str = "LOW_CARB";

/// Low-fat food
pub const LOW_FAT: &str = "BAJO_GRASA";

/// Below this energy (kcal) a food is tagged [`DEFINITION`]
pub const DEFINITION_MAX_KCAL: f64 = 100.0;

/// Above this energy (kcal) a food is tagged [`VOLUME`]
pub const VOLUME_MIN_KCAL: f64 = 300.0;

/// Above this protein (g) a food is tagged [`HIGH_PROTEIN`]
pub const HIGH_PROTEIN_MIN_G: f64 = 15.0;

/// Below this carbohydrate (g) a food is tagged [`LOW_CARB`]
pub const LOW_CARB_MAX_G: f64 = 5.0;

/// Below this fat (g) a food is tagged [`LOW_FAT`]
pub const LOW_FAT_MAX_G: f64 = 3.0;
