// ABOUTME: Progressive search: internal results first, external results merged when they arrive
// ABOUTME: Each query takes a generation number so a slow, stale external response is discarded
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{merge_dedupe_rank, FoodSearchEngine, SearchOptions};
use food_core::models::{normalize_name, FoodItem};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Identifies one progressive query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    query: String,
}

impl SearchTicket {
    /// Normalized query this ticket was issued for
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Local + cloud results, ready to render before the external layer answers
#[derive(Debug, Clone)]
pub struct PartialResults {
    /// Ticket to pass to [`ProgressiveSearch::complete`]
    pub ticket: SearchTicket,
    /// Merged internal results
    pub items: Vec<FoodItem>,
    /// Whether an external fetch should follow
    pub external_pending: bool,
}

/// Drives searches for one interactive input, newest query wins
pub struct ProgressiveSearch {
    engine: Arc<FoodSearchEngine>,
    generation: AtomicU64,
}

impl ProgressiveSearch {
    /// Session over a shared engine
    #[must_use]
    pub const fn new(engine: Arc<FoodSearchEngine>) -> Self {
        Self {
            engine,
            generation: AtomicU64::new(0),
        }
    }

    /// Start a query; any earlier ticket becomes stale
    pub async fn begin(&self, query: &str, options: &SearchOptions) -> PartialResults {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = normalize_name(query);

        let internal = options.clone().internal_only();
        let items = self.engine.search(&query, &internal).await;
        let external_pending = self
            .engine
            .should_fetch_external(&query, options, items.len());

        PartialResults {
            ticket: SearchTicket { generation, query },
            items,
            external_pending,
        }
    }

    /// Whether `ticket` belongs to the latest query
    #[must_use]
    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Fetch the external layer and merge it into `partial`
    ///
    /// Returns `None` when a newer query started while the fetch was in
    /// flight; the caller keeps whatever it renders for the newer query.
    /// Without a pending fetch the partial items are returned unchanged.
    pub async fn complete(&self, partial: PartialResults) -> Option<Vec<FoodItem>> {
        if !self.is_current(&partial.ticket) {
            debug!(query = %partial.ticket.query, "Dropping stale progressive search");
            return None;
        }
        if !partial.external_pending {
            return Some(partial.items);
        }

        let external = self.engine.search_external(&partial.ticket.query).await;

        if !self.is_current(&partial.ticket) {
            debug!(
                query = %partial.ticket.query,
                count = external.len(),
                "Discarding stale external response"
            );
            return None;
        }

        Some(merge_dedupe_rank(partial.items.into_iter().chain(external)))
    }
}
