// ABOUTME: Bearer credential sources and a TTL cache in front of them
// ABOUTME: The credential is read at most once per window instead of once per layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, warn};

/// Source of the user's bearer credential (session storage, keychain, env)
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the current credential, `None` when signed out
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read
    async fn load_token(&self) -> AppResult<Option<String>>;
}

/// Credential held in memory; updated on sign-in and sign-out
#[derive(Debug, Default)]
pub struct StaticCredentialStore {
    token: RwLock<Option<String>>,
}

impl StaticCredentialStore {
    /// Create a store holding an optional credential
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }

    /// Replace the stored credential
    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }
}

#[async_trait]
impl CredentialStore for StaticCredentialStore {
    async fn load_token(&self) -> AppResult<Option<String>> {
        Ok(self.token.read().await.clone())
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: Option<String>,
    read_at: Instant,
}

/// Caches the credential for a short window
///
/// A signed-out read (`None`) is not cached, so signing in takes effect on
/// the next call.
pub struct TokenCache {
    store: Arc<dyn CredentialStore>,
    ttl: Duration,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    /// Wrap a credential store
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>, ttl: Duration) -> Self {
        Self {
            store,
            ttl,
            cached: Mutex::new(None),
        }
    }

    /// Current credential; storage failures read as signed out
    pub async fn token(&self) -> Option<String> {
        let mut cached = self.cached.lock().await;
        if let Some(entry) = cached.as_ref() {
            if entry.token.is_some() && entry.read_at.elapsed() < self.ttl {
                return entry.token.clone();
            }
        }

        let token = match self.store.load_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read credential; continuing signed out");
                None
            }
        };
        debug!(present = token.is_some(), "Credential refreshed");
        *cached = Some(CachedToken {
            token: token.clone(),
            read_at: Instant::now(),
        });
        drop(cached);
        token
    }

    /// Credential required by a mutation
    ///
    /// # Errors
    ///
    /// Returns `AUTH_REQUIRED` ("No active session") when signed out
    pub async fn require_token(&self) -> AppResult<String> {
        self.token().await.ok_or_else(AppError::auth_required)
    }

    /// Forget the cached credential (e.g. after sign-out)
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }
}
