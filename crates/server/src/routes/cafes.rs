use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{delete, get, patch, post},
    Json, Router,
};
use common::types::{Banner, Health};
use models::cafe::{self, CafePatch, NewCafe};
use serde::Serialize;
use service::db::cafe_service::CafeFilter;
use tracing::{info, warn};

use crate::errors::ApiError;
use crate::routes::CafeState;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AddCafeResponse {
    pub success: bool,
    pub message: String,
    pub cafe_id: i32,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeleteCafeResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CafeHealth {
    #[serde(flatten)]
    pub health: Health,
    pub cafe_count: u64,
}

pub fn router() -> Router<CafeState> {
    Router::new()
        .route("/", get(home))
        .route("/random", get(random))
        .route("/all", get(all))
        .route("/search", get(search))
        .route("/add", post(add))
        .route("/delete/:id", delete(remove))
        .route("/update/:id", patch(update))
        .route("/health", get(health))
}

#[utoipa::path(get, path = "/", tag = "cafes", responses((status = 200, description = "Service banner")))]
pub async fn home() -> Json<Banner> {
    Json(Banner {
        message: "Welcome to the Cafe API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[utoipa::path(
    get, path = "/random", tag = "cafes",
    responses(
        (status = 200, description = "A uniformly chosen cafe", body = crate::openapi::CafeDoc),
        (status = 404, description = "No cafes stored", body = crate::errors::ErrorBody)
    )
)]
pub async fn random(State(state): State<CafeState>) -> Result<Json<cafe::Model>, ApiError> {
    Ok(Json(state.cafes.random().await?))
}

#[utoipa::path(
    get, path = "/all", tag = "cafes",
    responses((status = 200, description = "Every cafe in insertion order", body = [crate::openapi::CafeDoc]))
)]
pub async fn all(State(state): State<CafeState>) -> Result<Json<Vec<cafe::Model>>, ApiError> {
    let list = state.cafes.list().await?;
    info!(count = list.len(), "list cafes");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/search", tag = "cafes",
    params(
        ("loc" = Option<String>, Query, description = "Case-insensitive substring of the location"),
        ("has_wifi" = Option<bool>, Query, description = "Require (or exclude) wifi"),
        ("has_sockets" = Option<bool>, Query, description = "Require (or exclude) sockets"),
        ("has_toilet" = Option<bool>, Query, description = "Require (or exclude) a toilet"),
        ("can_take_calls" = Option<bool>, Query, description = "Require (or exclude) taking calls")
    ),
    responses(
        (status = 200, description = "Matching cafes", body = [crate::openapi::CafeDoc]),
        (status = 404, description = "No match", body = crate::errors::ErrorBody),
        (status = 422, description = "No criteria given", body = crate::errors::ErrorBody)
    )
)]
pub async fn search(
    State(state): State<CafeState>,
    filter: Result<Query<CafeFilter>, QueryRejection>,
) -> Result<Json<Vec<cafe::Model>>, ApiError> {
    let Query(filter) = filter?;
    let found = state.cafes.search(&filter).await?;
    info!(count = found.len(), loc = ?filter.location, "search cafes");
    Ok(Json(found))
}

#[utoipa::path(
    post, path = "/add", tag = "cafes",
    request_body = crate::openapi::NewCafeDoc,
    responses(
        (status = 200, description = "Created", body = AddCafeResponse),
        (status = 400, description = "Duplicate name", body = crate::errors::ErrorBody),
        (status = 422, description = "Malformed payload", body = crate::errors::ErrorBody),
        (status = 500, description = "Create failed", body = crate::errors::ErrorBody)
    )
)]
pub async fn add(
    State(state): State<CafeState>,
    input: Result<Json<NewCafe>, JsonRejection>,
) -> Result<Json<AddCafeResponse>, ApiError> {
    let Json(input) = input?;
    let created = state.cafes.create(input).await?;
    Ok(Json(AddCafeResponse {
        success: true,
        message: "Successfully added the new cafe.".to_string(),
        cafe_id: created.id,
    }))
}

#[utoipa::path(
    delete, path = "/delete/{id}", tag = "cafes",
    params(("id" = i32, Path, description = "Cafe id")),
    responses(
        (status = 200, description = "Deleted", body = DeleteCafeResponse),
        (status = 404, description = "Not Found", body = crate::errors::ErrorBody)
    )
)]
pub async fn remove(
    State(state): State<CafeState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<DeleteCafeResponse>, ApiError> {
    let Path(id) = id?;
    state.cafes.delete(id).await?;
    Ok(Json(DeleteCafeResponse { success: true, message: format!("Cafe {} deleted.", id) }))
}

#[utoipa::path(
    patch, path = "/update/{id}", tag = "cafes",
    params(("id" = i32, Path, description = "Cafe id")),
    request_body = crate::openapi::CafePatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CafeDoc),
        (status = 400, description = "Name already taken", body = crate::errors::ErrorBody),
        (status = 404, description = "Not Found", body = crate::errors::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<CafeState>,
    id: Result<Path<i32>, PathRejection>,
    patch: Result<Json<CafePatch>, JsonRejection>,
) -> Result<Json<cafe::Model>, ApiError> {
    let Path(id) = id?;
    let Json(patch) = patch?;
    Ok(Json(state.cafes.update(id, patch).await?))
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Liveness and row count", body = crate::openapi::HealthDoc))
)]
pub async fn health(State(state): State<CafeState>) -> Json<CafeHealth> {
    if !state.cafes.ping().await {
        warn!("health: database ping failed");
        return Json(CafeHealth { health: Health::degraded(), cafe_count: 0 });
    }
    match state.cafes.count().await {
        Ok(cafe_count) => Json(CafeHealth { health: Health::ok(), cafe_count }),
        Err(e) => {
            warn!(error = %e, "health: cafe count failed");
            Json(CafeHealth { health: Health::degraded(), cafe_count: 0 })
        }
    }
}
