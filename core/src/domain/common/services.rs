use crate::domain::food_safety::{
    lookup::FoodLookup,
    ports::{LLMClient, SearchCache},
};

/// Composition root of the domain: owns the lookup client and the cache.
#[derive(Clone)]
pub struct Service<LLM, SC>
where
    LLM: LLMClient,
    SC: SearchCache,
{
    pub(crate) lookup: FoodLookup<LLM>,
    pub(crate) search_cache: SC,
}

impl<LLM, SC> Service<LLM, SC>
where
    LLM: LLMClient,
    SC: SearchCache,
{
    pub fn new(lookup: FoodLookup<LLM>, search_cache: SC) -> Self {
        Self {
            lookup,
            search_cache,
        }
    }
}
