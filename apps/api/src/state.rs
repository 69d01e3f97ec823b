use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::matching::{MatchCache, TextVectorizer, TfidfVectorizer};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Response cache. Lives as long as the process; never evicted.
    pub cache: Arc<MatchCache>,
    /// Pluggable vectorizer. Default: TfidfVectorizer.
    pub vectorizer: Arc<dyn TextVectorizer>,
}

impl AppState {
    /// Builds state with an empty cache and the default TF-IDF vectorizer.
    pub fn new(config: Config) -> Result<Self> {
        Ok(AppState {
            config,
            cache: Arc::new(MatchCache::new()),
            vectorizer: Arc::new(TfidfVectorizer::new()?),
        })
    }
}
