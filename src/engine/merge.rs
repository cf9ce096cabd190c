// ABOUTME: Merge, deduplicate and rank food items from the three catalog layers
// ABOUTME: Name collisions keep the highest-priority layer; output is bucketed CLOUD, LOCAL, API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use food_core::models::FoodItem;
use std::collections::HashMap;

/// Deduplicate by normalized name, then rank by layer priority
///
/// Candidates are walked in the order given (local, then cloud, then
/// external). The first item seen for a name is kept unless a later one
/// comes from a strictly higher-priority layer, in which case the later one
/// takes over the earlier one's slot. The survivors are then stable-sorted by
/// descending layer priority, so the result reads all CLOUD items, then all
/// LOCAL, then all API.
#[must_use]
pub fn merge_dedupe_rank<I>(candidates: I) -> Vec<FoodItem>
where
    I: IntoIterator<Item = FoodItem>,
{
    sort_by_priority(dedupe_by_name(candidates))
}

/// Merge the three layer lists in priority-processing order
#[must_use]
pub fn merge_layers(
    local: Vec<FoodItem>,
    cloud: Vec<FoodItem>,
    external: Vec<FoodItem>,
) -> Vec<FoodItem> {
    merge_dedupe_rank(local.into_iter().chain(cloud).chain(external))
}

/// Keep one item per normalized name, preserving first-seen slot order
#[must_use]
pub fn dedupe_by_name<I>(candidates: I) -> Vec<FoodItem>
where
    I: IntoIterator<Item = FoodItem>,
{
    let mut slots: Vec<FoodItem> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for candidate in candidates {
        let key = candidate.dedupe_key();
        match index.get(&key) {
            Some(&slot) => {
                if candidate.layer.priority() > slots[slot].layer.priority() {
                    slots[slot] = candidate;
                }
            }
            None => {
                index.insert(key, slots.len());
                slots.push(candidate);
            }
        }
    }

    slots
}

/// Stable sort by descending layer priority
#[must_use]
pub fn sort_by_priority(mut foods: Vec<FoodItem>) -> Vec<FoodItem> {
    foods.sort_by_key(|food| std::cmp::Reverse(food.layer.priority()));
    foods
}
