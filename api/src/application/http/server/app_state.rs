use std::sync::Arc;

use babysafe_core::application::BabysafeService;

use crate::{application::rate_limit::RateLimiter, args::Args};

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: BabysafeService,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: BabysafeService, rate_limiter: RateLimiter) -> Self {
        Self {
            args,
            service,
            rate_limiter,
        }
    }
}
