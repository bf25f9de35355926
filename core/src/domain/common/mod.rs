use std::time::Duration;

pub mod entities;
pub mod services;

pub const DEFAULT_TRUSTED_DOMAINS: [&str; 10] = [
    "mayoclinic.org",
    "webmd.com",
    "nhs.uk",
    "americanpregnancy.org",
    "cdc.gov",
    "healthline.com",
    "whattoexpect.com",
    "babycenter.com",
    "parents.com",
    "verywellfamily.com",
];

#[derive(Clone, Debug, Default)]
pub struct BabysafeConfig {
    pub llm: LLMConfig,
    pub cache: CacheConfig,
    pub lookup: LookupConfig,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_api_url: String,
    pub max_tokens: u32,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: "gpt-4o-mini-search-preview-2025-03-11".to_string(),
            openai_api_url: "https://api.openai.com/v1".to_string(),
            max_tokens: 500,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub ttl: Duration,
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
            max_entries: 10_000,
        }
    }
}

/// Timeout, retry and allow-list settings for a single lookup.
#[derive(Clone, Debug)]
pub struct LookupConfig {
    pub request_timeout: Duration,
    /// Total attempts, the first one included.
    pub max_attempts: u32,
    /// Backoff unit: attempt `n` failing waits `n * retry_delay`.
    pub retry_delay: Duration,
    pub trusted_domains: Vec<String>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            max_attempts: 3,
            retry_delay: Duration::from_millis(1000),
            trusted_domains: DEFAULT_TRUSTED_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }
}
