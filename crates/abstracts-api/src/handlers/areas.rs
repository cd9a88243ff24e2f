use crate::state::AppState;
use abstracts_core::AreaCatalog;
use axum::{extract::State, Json};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/areas",
    tag = "catalog",
    responses(
        (status = 200, description = "Topical areas an abstract can be filed under", body = AreaCatalog)
    )
)]
pub async fn list_areas(State(state): State<Arc<AppState>>) -> Json<AreaCatalog> {
    Json(state.catalog().clone())
}
