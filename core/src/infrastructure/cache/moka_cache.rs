use moka::sync::Cache;

use crate::domain::{
    common::CacheConfig,
    food_safety::{entities::SearchResult, ports::SearchCache},
};

/// In-memory [`SearchCache`] with a fixed time-to-live per entry.
///
/// Expiry is measured from the last write, so overwriting a key resets its age.
/// Expired entries are never returned even before moka evicts them.
#[derive(Clone)]
pub struct MokaSearchCache {
    cache: Cache<String, SearchResult>,
}

impl MokaSearchCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(config.max_entries)
                .time_to_live(config.ttl)
                .build(),
        }
    }
}

impl SearchCache for MokaSearchCache {
    fn get(&self, key: &str) -> Option<SearchResult> {
        self.cache.get(key)
    }

    fn put(&self, key: String, value: SearchResult) {
        self.cache.insert(key, value);
    }
}
