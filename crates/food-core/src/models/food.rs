// ABOUTME: Unified food item model shared by every catalog layer
// ABOUTME: Layer priority, name normalization and lenient non-negative nutrient parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Provenance tier of a food item
///
/// The priority ordering decides which entry survives a name collision:
/// a user's own cloned item shadows the bundled or external entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Layer {
    /// Bundled offline catalog
    Local,
    /// Backend-stored catalog (system and user-owned items)
    Cloud,
    /// Third-party nutrition database
    Api,
}

impl Layer {
    /// Shadowing priority: `CLOUD(3) > LOCAL(2) > API(1)`
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Cloud => 3,
            Self::Local => 2,
            Self::Api => 1,
        }
    }

    /// Wire name used by the backend
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "LOCAL",
            Self::Cloud => "CLOUD",
            Self::Api => "API",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Macro values per 100 g serving
///
/// Missing, null and negative values all read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    /// Energy in kcal
    #[serde(default, deserialize_with = "non_negative")]
    pub kcal: f64,
    /// Protein in grams
    #[serde(default, deserialize_with = "non_negative")]
    pub protein: f64,
    /// Carbohydrate in grams
    #[serde(default, deserialize_with = "non_negative")]
    pub carbs: f64,
    /// Fat in grams
    #[serde(default, deserialize_with = "non_negative")]
    pub fat: f64,
    /// Fiber in grams, when the source reports it
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_non_negative"
    )]
    pub fiber: Option<f64>,
}

impl Nutrients {
    /// Build a nutrient record, clamping negative or non-finite values to 0
    #[must_use]
    pub fn new(kcal: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            kcal: clamp(kcal),
            protein: clamp(protein),
            carbs: clamp(carbs),
            fat: clamp(fat),
            fiber: None,
        }
    }

    /// Attach a fiber value
    #[must_use]
    pub fn with_fiber(mut self, fiber: f64) -> Self {
        self.fiber = Some(clamp(fiber));
        self
    }
}

/// Household serving expressed in grams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServingSize {
    /// Unit label (e.g. "Unidad", "Rebanada", "Scoop")
    #[serde(default, deserialize_with = "nullable_default")]
    pub unit: String,
    /// Grams per unit
    #[serde(default, deserialize_with = "non_negative")]
    pub weight: f64,
}

/// A food item as rendered by the library
///
/// Values are built fresh on every search and never mutated in place;
/// enrichment produces a new item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    /// Identifier, unique within its layer only
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name, also the deduplication key once normalized
    pub name: String,
    /// Manufacturer or brand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Provenance tier
    pub layer: Layer,
    /// Curated/system entry rather than user-owned
    #[serde(default)]
    pub is_system: bool,
    /// Owning user for cloud items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    /// Per-100 g macros
    #[serde(default, deserialize_with = "nullable_default")]
    pub nutrients: Nutrients,
    /// Product image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Category and goal labels
    #[serde(default, deserialize_with = "nullable_default")]
    pub tags: BTreeSet<String>,
    /// Times the item was added to a plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_count: Option<u64>,
    /// Set by the favoriting flow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    /// Household serving equivalence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<ServingSize>,
    /// Recipe built from other foods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_composite: Option<bool>,
    /// Recipe preparation steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Recipe preparation time in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<u32>,
    /// Snapshot of recipe ingredients, kept opaque
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<serde_json::Value>,
}

impl FoodItem {
    /// Create a bare item with zeroed nutrients and no tags
    pub fn new(id: impl Into<String>, name: impl Into<String>, layer: Layer) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: None,
            layer,
            is_system: false,
            owner_id: None,
            nutrients: Nutrients::default(),
            image: None,
            tags: BTreeSet::new(),
            usage_count: None,
            is_favorite: None,
            serving_size: None,
            is_composite: None,
            instructions: None,
            prep_time: None,
            ingredients: Vec::new(),
        }
    }

    /// Set the nutrient record
    #[must_use]
    pub fn with_nutrients(mut self, nutrients: Nutrients) -> Self {
        self.nutrients = nutrients;
        self
    }

    /// Add tags, ignoring duplicates
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Set the brand
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Mark as curated/system entry
    #[must_use]
    pub const fn system(mut self, is_system: bool) -> Self {
        self.is_system = is_system;
        self
    }

    /// Deduplication key: trimmed, lower-cased name
    #[must_use]
    pub fn dedupe_key(&self) -> String {
        normalize_name(&self.name)
    }

    /// Whether any tag matches, case-sensitively
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Normalize a name or query for matching: trimmed and lower-cased
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn clamp(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Number or numeric string; anything else reads as absent
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn non_negative<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.map_or(0.0, clamp))
}

fn optional_non_negative<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.map(clamp))
}

fn nullable_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
