use super::handlers::search_food::{__path_search_food, search_food};
use crate::application::http::server::app_state::AppState;

use axum::{Router, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(search_food))]
pub struct FoodSafetyApiDoc;

pub fn food_safety_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/api/search", state.args.server.root_path),
        post(search_food),
    )
}
