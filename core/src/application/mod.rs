use crate::{
    domain::{
        common::{BabysafeConfig, services::Service},
        food_safety::lookup::FoodLookup,
    },
    infrastructure::{cache::MokaSearchCache, llm::OpenAILLMClient},
};

pub type BabysafeService = Service<OpenAILLMClient, MokaSearchCache>;

/// Builds the service once at startup. The cache lives as long as the service.
pub fn create_service(config: BabysafeConfig) -> BabysafeService {
    let llm_client = OpenAILLMClient::new(&config.llm);
    let search_cache = MokaSearchCache::new(&config.cache);

    if config.llm.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set, lookups will fail until it is configured");
    }

    Service::new(FoodLookup::new(llm_client, &config.lookup), search_cache)
}
