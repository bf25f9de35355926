use std::any::Any;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use crate::application::http::food_safety::router::food_safety_routes;
use crate::application::http::health::health_routes;
use crate::application::http::server::api_entities::api_error::{
    ApiError, GENERIC_ERROR_DETAILS,
};
use crate::application::http::server::app_state::AppState;
use crate::application::http::server::openapi::ApiDoc;
use crate::application::rate_limit::{RateLimiter, rate_limit};
use crate::args::Args;

use axum::Json;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{
    CONTENT_SECURITY_POLICY, CONTENT_TYPE, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
    X_FRAME_OPTIONS,
};
use axum::http::{HeaderValue, Method};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use axum_prometheus::PrometheusMetricLayer;
use axum_prometheus::metrics_exporter_prometheus::PrometheusHandle;
use babysafe_core::{application::create_service, domain::common::BabysafeConfig};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{debug, info_span};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};

const CONTENT_SECURITY_POLICY_VALUE: &str = "default-src 'self'; \
    script-src 'self' 'unsafe-inline'; \
    style-src 'self' 'unsafe-inline'; \
    img-src 'self' data: https:; \
    connect-src 'self' https://api.openai.com";

static METRIC_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// The prometheus recorder is process-global: it is installed once, and every
/// router after that gets a fresh layer reporting into it.
fn metrics() -> (PrometheusMetricLayer<'static>, PrometheusHandle) {
    let mut installed = None;
    let handle = METRIC_HANDLE
        .get_or_init(|| {
            let (layer, handle) = PrometheusMetricLayer::pair();
            installed = Some(layer);
            handle
        })
        .clone();

    (installed.unwrap_or_else(PrometheusMetricLayer::new), handle)
}

pub fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let babysafe_config: BabysafeConfig = BabysafeConfig::from(args.as_ref().clone());
    let service = create_service(babysafe_config);
    let rate_limiter = RateLimiter::new(
        Duration::from_millis(args.rate_limit.window_ms),
        args.rate_limit.max_requests,
    );

    Ok(AppState::new(args, service, rate_limiter))
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let allowed_origins = state
        .args
        .server
        .allowed_origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<Result<Vec<HeaderValue>, _>>()?;

    debug!("Allowed origins: {:?}", allowed_origins);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(allowed_origins)
        .allow_headers([CONTENT_TYPE]);

    let (prometheus_layer, metric_handle) = metrics();

    let root_path = state.args.server.root_path.clone();
    let mut openapi = ApiDoc::openapi();
    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{root_path}{path}"), item))
        .collect();
    openapi.paths = paths;

    let api_docs_url = format!("{}/api-docs/openapi.json", root_path);
    let openapi_json = openapi.clone();

    // Scalar loads its bundle from a CDN, so the policy only covers the API routes.
    let api_routes = axum::Router::new()
        .merge(food_safety_routes(state.clone()))
        .merge(health_routes(&root_path))
        .layer(SetResponseHeaderLayer::overriding(
            CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY_VALUE),
        ));

    let router = axum::Router::new()
        .merge(Scalar::with_url(format!("{}/scalar", root_path), openapi))
        .route(
            &api_docs_url,
            get(|| async move { Json(openapi_json) }),
        )
        .merge(api_routes)
        .route(
            &format!("{}/metrics", root_path),
            get(|| async move { metric_handle.render() }),
        )
        .layer(DefaultBodyLimit::max(state.args.server.body_limit_bytes))
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit))
        .layer(SetResponseHeaderLayer::overriding(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(CompressionLayer::new())
        .layer(trace_layer)
        .layer(cors)
        .layer(prometheus_layer)
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state);
    Ok(router)
}

fn handle_panic(_err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("request handler panicked");
    ApiError::InternalServerError(GENERIC_ERROR_DETAILS.to_string()).into_response()
}
