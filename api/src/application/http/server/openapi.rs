use crate::application::http::{food_safety::router::FoodSafetyApiDoc, health};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "BabySafe API"
    ),
    paths(health::health),
    nest(
        (path = "/api", api = FoodSafetyApiDoc),
    )
)]
pub struct ApiDoc;
