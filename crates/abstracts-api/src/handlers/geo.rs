use crate::state::AppState;
use abstracts_core::models::{Municipality, Region};
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/geo/regions",
    tag = "geo",
    responses(
        (status = 200, description = "States ordered by name; empty when the upstream is unavailable", body = Vec<Region>)
    )
)]
pub async fn list_regions(State(state): State<Arc<AppState>>) -> Json<Vec<Region>> {
    Json(state.geo.list_regions().await)
}

#[utoipa::path(
    get,
    path = "/api/v1/geo/regions/{id}/municipalities",
    tag = "geo",
    params(
        ("id" = u32, Path, description = "IBGE id of the state")
    ),
    responses(
        (status = 200, description = "Municipalities ordered by name; empty when the upstream is unavailable", body = Vec<Municipality>)
    )
)]
pub async fn list_municipalities(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Json<Vec<Municipality>> {
    Json(state.geo.list_municipalities(Some(id)).await)
}
