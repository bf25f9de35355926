use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_safety::{
        entities::SearchResult,
        value_objects::{Completion, CompletionRequest, SearchFoodInput},
    },
};

/// LLM Client trait for calling chat completion models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Performs exactly one call. Fails with `CoreError::Configuration` before
    /// touching the network when no credential is set.
    fn complete(
        &self,
        request: CompletionRequest,
    ) -> impl Future<Output = Result<Completion, CoreError>> + Send;
}

/// Time-limited store of successful lookups, keyed by normalized query
#[cfg_attr(test, mockall::automock)]
pub trait SearchCache: Send + Sync {
    fn get(&self, key: &str) -> Option<SearchResult>;

    fn put(&self, key: String, value: SearchResult);
}

/// Service trait for food safety lookups
#[cfg_attr(test, mockall::automock)]
pub trait FoodSafetyService: Send + Sync {
    fn search_food(
        &self,
        input: SearchFoodInput,
    ) -> impl Future<Output = Result<SearchResult, CoreError>> + Send;
}
