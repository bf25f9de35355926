use axum::extract::State;
use babysafe_core::domain::food_safety::{
    entities::SearchResult, ports::FoodSafetyService, value_objects::SearchFoodInput,
};

use crate::application::http::{
    food_safety::validators::SearchFoodValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/search",
    tag = "food-safety",
    summary = "Look up whether a food is safe during pregnancy",
    description = "Validates the query, serves a cached answer when one is fresh, otherwise asks the language model and caches its validated answer",
    request_body = SearchFoodValidator,
    responses(
        (status = 200, body = SearchResult),
        (status = 400, body = ApiErrorResponse),
        (status = 413, body = ApiErrorResponse),
        (status = 500, body = ApiErrorResponse)
    )
)]
pub async fn search_food(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<SearchFoodValidator>,
) -> Result<Response<SearchResult>, ApiError> {
    let result = state
        .service
        .search_food(SearchFoodInput {
            query: payload.query,
        })
        .await
        .map_err(|e| {
            tracing::error!("Failed to search food: {}", e);
            ApiError::from_core(e, state.args.env.exposes_error_details())
        })?;

    Ok(Response::OK(result))
}
