use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use babysafe_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

pub const GENERIC_ERROR_DETAILS: &str = "An unexpected error occurred";

/// Error body shared by every failing endpoint.
#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    #[schema(example = "Invalid input")]
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Too many requests: {0}")]
    TooManyRequests(String),

    #[error("Failed to fetch food safety information: {0}")]
    LookupFailed(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl ApiError {
    /// Maps a domain error. Outside development only the validation reason
    /// reaches the caller; everything else is replaced by a generic detail.
    pub fn from_core(error: CoreError, expose_details: bool) -> Self {
        match error {
            CoreError::Validation(reason) => ApiError::BadRequest(reason),
            other if expose_details => ApiError::LookupFailed(other.to_string()),
            _ => ApiError::LookupFailed(GENERIC_ERROR_DETAILS.to_string()),
        }
    }

    fn parts(&self) -> (StatusCode, &'static str, &str) {
        match self {
            ApiError::BadRequest(details) => (StatusCode::BAD_REQUEST, "Invalid input", details),
            ApiError::PayloadTooLarge(details) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "Payload too large", details)
            }
            ApiError::TooManyRequests(details) => {
                (StatusCode::TOO_MANY_REQUESTS, "Too many requests", details)
            }
            ApiError::LookupFailed(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch food safety information",
                details,
            ),
            ApiError::InternalServerError(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                details,
            ),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = self.parts();

        let body = ApiErrorResponse {
            error: error.to_string(),
            details: Some(details.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

/// JSON extractor that also runs `validator` rules, rejecting with [`ApiError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value
            .validate()
            .map_err(|errors| ApiError::BadRequest(validation_details(&errors)))?;
        Ok(ValidateJson(value))
    }
}

fn validation_details(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|field_errors| field_errors.iter())
        .map(|error| match &error.message {
            Some(message) => message.to_string(),
            None => error.code.to_string(),
        })
        .collect();
    messages.sort();

    if messages.is_empty() {
        errors.to_string()
    } else {
        messages.join(", ")
    }
}
