// ABOUTME: Local catalog layer: bundled food items filtered by substring and tag
// ABOUTME: Always available, never fails, never performs I/O
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod bundled;

use bundled::{BundledFood, BUNDLED_FOODS};
use food_core::models::{normalize_name, FoodItem, Layer, Nutrients};

/// Offline food catalog
#[derive(Debug, Clone)]
pub struct LocalCatalog {
    foods: Vec<FoodItem>,
}

impl LocalCatalog {
    /// Catalog shipped with the crate
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            foods: BUNDLED_FOODS.iter().map(map_bundled).collect(),
        }
    }

    /// Catalog over caller-supplied items; every item is re-labelled `LOCAL`
    #[must_use]
    pub fn from_items(items: Vec<FoodItem>) -> Self {
        Self {
            foods: items
                .into_iter()
                .map(|mut item| {
                    item.layer = Layer::Local;
                    item
                })
                .collect(),
        }
    }

    /// Every item, in catalog order
    #[must_use]
    pub fn all(&self) -> &[FoodItem] {
        &self.foods
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.foods.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// Items whose name contains `query` and that carry `tag` when one is given
    ///
    /// The query is normalized here; an empty query matches everything.
    #[must_use]
    pub fn search(&self, query: &str, tag: Option<&str>) -> Vec<FoodItem> {
        let query = normalize_name(query);
        self.foods
            .iter()
            .filter(|food| query.is_empty() || food.name.to_lowercase().contains(&query))
            .filter(|food| tag.is_none_or(|tag| food.has_tag(tag)))
            .cloned()
            .collect()
    }
}

impl Default for LocalCatalog {
    fn default() -> Self {
        Self::bundled()
    }
}

fn map_bundled(row: &BundledFood) -> FoodItem {
    FoodItem::new(row.id, row.name, Layer::Local)
        .system(true)
        .with_nutrients(
            Nutrients::new(row.kcal, row.protein, row.carbs, row.fat).with_fiber(row.fiber),
        )
        .with_tags(row.tags.iter().copied())
}
