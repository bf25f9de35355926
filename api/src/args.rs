use std::time::Duration;

use babysafe_core::domain::common::{
    BabysafeConfig, CacheConfig, DEFAULT_TRUSTED_DOMAINS, LLMConfig, LookupConfig,
};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "babysafe-api", version, about = "Pregnancy food safety lookup API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub openai: OpenAIArgs,

    #[command(flatten)]
    pub cache: CacheArgs,

    #[command(flatten)]
    pub lookup: LookupArgs,

    #[command(flatten)]
    pub rate_limit: RateLimitArgs,

    #[command(flatten)]
    pub log: LogArgs,

    #[arg(long, env = "APP_ENV", value_enum, default_value_t = Environment::Production)]
    pub env: Environment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Only development responses carry internal error text.
    pub fn exposes_error_details(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    #[arg(
        long = "allowed-origins",
        env = "FRONTEND_URL",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long, env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    /// Maximum accepted request body, in bytes.
    #[arg(long, env = "BODY_LIMIT_BYTES", default_value_t = 10 * 1024)]
    pub body_limit_bytes: usize,
}

#[derive(Debug, Clone, clap::Args)]
pub struct OpenAIArgs {
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(
        long,
        env = "OPENAI_MODEL",
        default_value = "gpt-4o-mini-search-preview-2025-03-11"
    )]
    pub openai_model: String,

    #[arg(long, env = "OPENAI_API_URL", default_value = "https://api.openai.com/v1")]
    pub openai_api_url: String,

    #[arg(long, env = "OPENAI_MAX_TOKENS", default_value_t = 500)]
    pub openai_max_tokens: u32,
}

#[derive(Debug, Clone, clap::Args)]
pub struct CacheArgs {
    /// Time-to-live of a cached answer, in seconds.
    #[arg(long = "cache-ttl", env = "CACHE_TTL", default_value_t = 3600)]
    pub ttl_secs: u64,

    #[arg(long = "cache-max-entries", env = "CACHE_MAX_ENTRIES", default_value_t = 10_000)]
    pub max_entries: u64,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LookupArgs {
    #[arg(long = "request-timeout-ms", env = "REQUEST_TIMEOUT_MS", default_value_t = 10_000)]
    pub request_timeout_ms: u64,

    /// Total attempts per lookup, the first one included.
    #[arg(long = "max-retries", env = "MAX_RETRIES", default_value_t = 3)]
    pub max_attempts: u32,

    #[arg(long = "retry-delay-ms", env = "RETRY_DELAY_MS", default_value_t = 1000)]
    pub retry_delay_ms: u64,

    #[arg(
        long = "trusted-domains",
        env = "TRUSTED_DOMAINS",
        value_delimiter = ',',
        default_values = DEFAULT_TRUSTED_DOMAINS
    )]
    pub trusted_domains: Vec<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct RateLimitArgs {
    #[arg(long = "rate-limit-window-ms", env = "RATE_LIMIT_WINDOW_MS", default_value_t = 900_000)]
    pub window_ms: u64,

    /// Requests allowed per client and window; 0 disables the limiter.
    #[arg(
        long = "rate-limit-max-requests",
        env = "RATE_LIMIT_MAX_REQUESTS",
        default_value_t = 100
    )]
    pub max_requests: u32,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    /// Used when RUST_LOG is not set.
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for BabysafeConfig {
    fn from(args: Args) -> Self {
        BabysafeConfig {
            llm: LLMConfig {
                openai_api_key: args.openai.openai_api_key,
                openai_model: args.openai.openai_model,
                openai_api_url: args.openai.openai_api_url,
                max_tokens: args.openai.openai_max_tokens,
            },
            cache: CacheConfig {
                ttl: Duration::from_secs(args.cache.ttl_secs),
                max_entries: args.cache.max_entries,
            },
            lookup: LookupConfig {
                request_timeout: Duration::from_millis(args.lookup.request_timeout_ms),
                max_attempts: args.lookup.max_attempts,
                retry_delay: Duration::from_millis(args.lookup.retry_delay_ms),
                trusted_domains: args.lookup.trusted_domains,
            },
        }
    }
}
