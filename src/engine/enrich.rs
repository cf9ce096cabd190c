// ABOUTME: Derives goal tags (cutting, bulking, high protein, low carb, low fat) from nutrients
// ABOUTME: Pure function: returns a new item, never accumulates duplicate tags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use food_core::constants::tags;
use food_core::models::{FoodItem, Nutrients};

/// Tags implied by a nutrient record
#[must_use]
pub fn derived_tags(nutrients: &Nutrients) -> Vec<&'static str> {
    let rules = [
        (nutrients.kcal < tags::DEFINITION_MAX_KCAL, tags::DEFINITION),
        (nutrients.kcal > tags::VOLUME_MIN_KCAL, tags::VOLUME),
        (nutrients.protein > tags::HIGH_PROTEIN_MIN_G, tags::HIGH_PROTEIN),
        (nutrients.carbs < tags::LOW_CARB_MAX_G, tags::LOW_CARB),
        (nutrients.fat < tags::LOW_FAT_MAX_G, tags::LOW_FAT),
    ];
    rules
        .into_iter()
        .filter_map(|(applies, tag)| applies.then_some(tag))
        .collect()
}

/// Copy of `food` with derived tags added to its existing ones
#[must_use]
pub fn enrich_tags(food: &FoodItem) -> FoodItem {
    food.clone().with_tags(derived_tags(&food.nutrients))
}
