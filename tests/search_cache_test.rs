// ABOUTME: Unit tests for the in-memory TTL cache backing search results
// ABOUTME: Tests lazy expiry, bounded capacity with oldest-first eviction, and key formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use food_search::cache::{SearchCacheKey, TtlCache};
use food_search::engine::{LayerFilter, SearchOptions};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_entry_expires_lazily() {
    let cache: TtlCache<u32> = TtlCache::new(10, Duration::from_secs(30));
    cache.insert("a".to_owned(), 1).await;

    tokio::time::advance(Duration::from_secs(29)).await;
    assert_eq!(cache.get("a").await, Some(1));

    tokio::time::advance(Duration::from_secs(2)).await;
    // Still stored until looked up
    assert_eq!(cache.len().await, 1);
    assert_eq!(cache.get("a").await, None);
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn test_overflow_evicts_oldest_insertion() {
    let cache: TtlCache<u32> = TtlCache::new(2, Duration::from_secs(30));
    cache.insert("first".to_owned(), 1).await;
    cache.insert("second".to_owned(), 2).await;

    // Reads do not refresh an entry's position
    assert_eq!(cache.get("first").await, Some(1));

    cache.insert("third".to_owned(), 3).await;
    assert_eq!(cache.get("first").await, None);
    assert_eq!(cache.get("second").await, Some(2));
    assert_eq!(cache.get("third").await, Some(3));
}

#[tokio::test]
async fn test_reinsert_replaces_value_and_position() {
    let cache: TtlCache<u32> = TtlCache::new(2, Duration::from_secs(30));
    cache.insert("a".to_owned(), 1).await;
    cache.insert("b".to_owned(), 2).await;
    cache.insert("a".to_owned(), 10).await;
    cache.insert("c".to_owned(), 3).await;

    assert_eq!(cache.get("a").await, Some(10));
    assert_eq!(cache.get("b").await, None);
    assert_eq!(cache.len().await, 2);
}

#[tokio::test]
async fn test_invalidate_and_clear() {
    let cache: TtlCache<u32> = TtlCache::new(10, Duration::from_secs(30));
    cache.insert("a".to_owned(), 1).await;
    cache.insert("b".to_owned(), 2).await;

    cache.invalidate("a").await;
    assert_eq!(cache.get("a").await, None);
    assert_eq!(cache.len().await, 1);

    let clone = cache.clone();
    clone.clear().await;
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn test_zero_capacity_falls_back_to_default() {
    let cache: TtlCache<u32> = TtlCache::new(0, Duration::from_secs(30));
    for i in 0..60 {
        cache.insert(format!("k{i}"), i).await;
    }
    assert_eq!(cache.len().await, 50);
    assert_eq!(cache.ttl(), Duration::from_secs(30));
}

#[test]
fn test_search_key_format() {
    let options = SearchOptions::default()
        .with_layer(LayerFilter::Cloud)
        .with_tag("ALTA_PROTEINA");
    assert_eq!(
        SearchCacheKey::new(" Yogur ", &options).to_string(),
        "yogur|CLOUD|ALTA_PROTEINA|false"
    );
}
