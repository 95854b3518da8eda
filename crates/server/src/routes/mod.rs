pub mod cafes;
pub mod todos;

use axum::Router;
use sea_orm::DatabaseConnection;
use service::cafe::{CafeService, SeaOrmCafeRepository};
use std::sync::Arc;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Store handle for the cafe API, built once at startup and cloned into handlers.
#[derive(Clone)]
pub struct CafeState {
    pub cafes: CafeService<SeaOrmCafeRepository>,
}

impl CafeState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { cafes: CafeService::new(Arc::new(SeaOrmCafeRepository::new(db))) }
    }
}

/// Store handle for the to-do pages.
#[derive(Clone)]
pub struct TodoState {
    pub db: DatabaseConnection,
}

/// HTTP access log shared by both services
fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        // one span per request, carrying method and path
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        // status code and latency on the way out
        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
        // 5xx at ERROR
        .on_failure(DefaultOnFailure::new().level(Level::ERROR))
}

/// Full cafe API: JSON routes, Swagger UI, CORS and access logging.
pub fn build_cafe_router(state: CafeState, cors: CorsLayer) -> Router {
    cafes::router()
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()))
        .layer(cors)
        .layer(trace_layer())
}

/// Full to-do app: HTML pages and access logging.
pub fn build_todo_router(state: TodoState) -> Router {
    todos::router().with_state(state).layer(trace_layer())
}
