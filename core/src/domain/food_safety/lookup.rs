use std::time::Duration;

use tokio::time::{sleep, timeout};
use tracing::{error, warn};

use crate::domain::{
    common::{LookupConfig, entities::app_errors::CoreError},
    food_safety::{
        entities::SearchResult,
        parsing::parse_record,
        ports::LLMClient,
        prompt::build_completion_request,
        source_url::TrustedDomains,
        value_objects::{Completion, CompletionRequest},
    },
};

/// Stateless lookup client: prompt, model call with retry, parse, source check.
///
/// Cancellation is by drop. Dropping the future returned by [`FoodLookup::lookup`]
/// (a disconnected HTTP client, an aborted `Abortable`) drops the in-flight
/// call and no further attempt is scheduled.
#[derive(Debug, Clone)]
pub struct FoodLookup<LLM> {
    llm_client: LLM,
    trusted_domains: TrustedDomains,
    request_timeout: Duration,
    max_attempts: u32,
    retry_delay: Duration,
}

impl<LLM> FoodLookup<LLM>
where
    LLM: LLMClient,
{
    pub fn new(llm_client: LLM, config: &LookupConfig) -> Self {
        Self {
            llm_client,
            trusted_domains: TrustedDomains::new(&config.trusted_domains),
            request_timeout: config.request_timeout,
            max_attempts: config.max_attempts.max(1),
            retry_delay: config.retry_delay,
        }
    }

    pub async fn lookup(&self, query: &str) -> Result<SearchResult, CoreError> {
        let request = build_completion_request(query, self.trusted_domains.as_slice());
        let completion = self.complete_with_retry(request).await?;

        let record = parse_record(&completion.text).inspect_err(|e| {
            error!(error = %e, raw_response = %completion.text, "Failed to parse model response");
        })?;
        let record = self.trusted_domains.sanitize(record);

        Ok(SearchResult::new(record, completion.model))
    }

    async fn complete_with_retry(
        &self,
        request: CompletionRequest,
    ) -> Result<Completion, CoreError> {
        let mut attempt: u32 = 1;

        loop {
            let call = self.llm_client.complete(request.clone());
            let result = match timeout(self.request_timeout, call).await {
                Ok(result) => result,
                Err(_) => Err(CoreError::ExternalServiceError(format!(
                    "request timed out after {} ms",
                    self.request_timeout.as_millis()
                ))),
            };

            match result {
                Ok(completion) => return Ok(completion),
                Err(e) if e.is_retryable() && attempt < self.max_attempts => {
                    let backoff = self.backoff_after(attempt);
                    warn!(
                        error = %e,
                        attempt,
                        max_attempts = self.max_attempts,
                        backoff_ms = backoff.as_millis() as u64,
                        "retrying model request"
                    );
                    sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!(error = %e, attempt, "model request failed");
                    return Err(e);
                }
            }
        }
    }

    /// Linear backoff, saturating instead of overflowing on huge delays.
    fn backoff_after(&self, attempt: u32) -> Duration {
        self.retry_delay
            .checked_mul(attempt)
            .unwrap_or(Duration::MAX)
    }
}
