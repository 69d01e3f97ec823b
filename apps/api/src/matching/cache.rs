//! Response cache — process-lifetime map from request fingerprint to response.
//!
//! Unbounded, never evicted, never persisted. Created once at startup and
//! shared through `AppState`. Concurrent misses on the same key may both
//! compute; the last insert wins, and both values are identical anyway.

use std::sync::Arc;

use dashmap::DashMap;

use crate::matching::models::{MatchResponse, MatchTarget};

/// Reported to clients in the `x-match-cache` response header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheStatus::Hit => "hit",
            CacheStatus::Miss => "miss",
        }
    }
}

/// Entries are scoped per endpoint so a body posted to both endpoints cannot
/// return one endpoint's response shape from the other.
#[derive(Debug, Default)]
pub struct MatchCache {
    entries: DashMap<(MatchTarget, String), Arc<MatchResponse>>,
}

impl MatchCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, target: MatchTarget, key: &str) -> Option<Arc<MatchResponse>> {
        self.entries
            .get(&(target, key.to_string()))
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn insert(&self, target: MatchTarget, key: String, response: Arc<MatchResponse>) {
        self.entries.insert((target, key), response);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
