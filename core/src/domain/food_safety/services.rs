use tracing::debug;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    food_safety::{
        entities::SearchResult,
        ports::{FoodSafetyService, LLMClient, SearchCache},
        validation::{cache_key, validate_query},
        value_objects::SearchFoodInput,
    },
};

impl<LLM, SC> FoodSafetyService for Service<LLM, SC>
where
    LLM: LLMClient,
    SC: SearchCache,
{
    async fn search_food(&self, input: SearchFoodInput) -> Result<SearchResult, CoreError> {
        // 1. Validate before anything else is touched
        let query = validate_query(&input.query)?;

        // 2. Serve from cache when possible
        let key = cache_key(&query);
        if let Some(cached) = self.search_cache.get(&key) {
            debug!(key, "food safety cache hit");
            return Ok(cached);
        }

        // 3. Ask the model; failures are never cached
        let result = self.lookup.lookup(&query).await?;

        self.search_cache.put(key, result.clone());

        Ok(result)
    }
}
