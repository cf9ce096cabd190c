// ABOUTME: Search request options: layer filter, tag filter and external skip flag
// ABOUTME: Decides which of the three layers a search consults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use std::fmt;
use std::str::FromStr;

/// Restricts which layers a search consults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LayerFilter {
    /// Every layer (default)
    #[default]
    All,
    /// Bundled catalog only
    Local,
    /// Backend catalog only
    Cloud,
    /// External catalog only
    Api,
    /// Backend recipes (composite foods)
    Recipe,
    /// Backend raw ingredients
    Raw,
}

impl LayerFilter {
    /// Whether the bundled catalog is searched
    #[must_use]
    pub const fn includes_local(self) -> bool {
        matches!(self, Self::All | Self::Local)
    }

    /// Whether the backend catalog is searched
    #[must_use]
    pub const fn includes_cloud(self) -> bool {
        matches!(self, Self::All | Self::Cloud | Self::Recipe | Self::Raw)
    }

    /// Whether the external catalog may be searched
    #[must_use]
    pub const fn includes_external(self) -> bool {
        matches!(self, Self::All | Self::Api)
    }

    /// Value forwarded as the backend `layer` parameter (`None` for `All`)
    #[must_use]
    pub const fn backend_param(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Local => Some("LOCAL"),
            Self::Cloud => Some("CLOUD"),
            Self::Api => Some("API"),
            Self::Recipe => Some("RECIPE"),
            Self::Raw => Some("RAW"),
        }
    }
}

impl fmt::Display for LayerFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.backend_param().unwrap_or("ALL"))
    }
}

impl FromStr for LayerFilter {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "ALL" => Ok(Self::All),
            "LOCAL" => Ok(Self::Local),
            "CLOUD" => Ok(Self::Cloud),
            "API" => Ok(Self::Api),
            "RECIPE" => Ok(Self::Recipe),
            "RAW" => Ok(Self::Raw),
            other => Err(AppError::invalid_input(format!(
                "Unknown layer filter '{other}' (expected ALL, LOCAL, CLOUD, API, RECIPE or RAW)"
            ))),
        }
    }
}

/// Options accepted by a search
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchOptions {
    /// Layers to consult
    pub layer: LayerFilter,
    /// Only return items carrying this tag
    pub tag: Option<String>,
    /// Never consult the external catalog (progressive callers fetch it separately)
    pub skip_external: bool,
}

impl SearchOptions {
    /// Restrict to a layer
    #[must_use]
    pub const fn with_layer(mut self, layer: LayerFilter) -> Self {
        self.layer = layer;
        self
    }

    /// Require a tag
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Skip the external catalog
    #[must_use]
    pub const fn internal_only(mut self) -> Self {
        self.skip_external = true;
        self
    }

    /// Tag filter with blank values treated as absent
    #[must_use]
    pub fn tag_filter(&self) -> Option<&str> {
        self.tag.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_filter_routing() {
        assert!(LayerFilter::All.includes_local());
        assert!(LayerFilter::All.includes_cloud());
        assert!(LayerFilter::All.includes_external());
        assert!(!LayerFilter::Recipe.includes_local());
        assert!(LayerFilter::Recipe.includes_cloud());
        assert!(!LayerFilter::Recipe.includes_external());
        assert!(LayerFilter::Api.includes_external());
        assert!(!LayerFilter::Api.includes_cloud());
    }

    #[test]
    fn test_layer_filter_parse() {
        assert_eq!("raw".parse::<LayerFilter>().ok(), Some(LayerFilter::Raw));
        assert_eq!(" All ".parse::<LayerFilter>().ok(), Some(LayerFilter::All));
        assert!("planet".parse::<LayerFilter>().is_err());
    }

    #[test]
    fn test_blank_tag_is_no_filter() {
        let options = SearchOptions::default().with_tag("  ");
        assert_eq!(options.tag_filter(), None);
    }
}
