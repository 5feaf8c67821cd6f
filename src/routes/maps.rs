//! Map routes used by the dashboard's map listing and edit form.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use tracing::{error, info};
use uuid::Uuid;

use crate::routes::auth::AdminUser;
use crate::services::map::{self, Map, MapError, MapInput};
use crate::state::AppState;

pub(crate) fn map_error_to_status(err: MapError) -> StatusCode {
    match err {
        MapError::NotFound(_) => StatusCode::NOT_FOUND,
        MapError::EmptyField(_) => StatusCode::BAD_REQUEST,
        MapError::Database(e) => {
            error!(error = %e, "map query failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// `GET /maps` — list maps in display order.
pub async fn list_maps(State(state): State<AppState>) -> Result<Json<Vec<Map>>, StatusCode> {
    let maps = map::list_maps(&state.pool).await.map_err(map_error_to_status)?;
    Ok(Json(maps))
}

/// `GET /maps/:id` — fetch one map.
pub async fn get_map(State(state): State<AppState>, Path(map_id): Path<Uuid>) -> Result<Json<Map>, StatusCode> {
    let row = map::get_map(&state.pool, map_id).await.map_err(map_error_to_status)?;
    Ok(Json(row))
}

/// `POST /maps` — create a map.
pub async fn create_map(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(body): Json<MapInput>,
) -> Result<(StatusCode, Json<Map>), StatusCode> {
    let row = map::create_map(&state.pool, &body).await.map_err(map_error_to_status)?;
    info!(map_id = %row.id, title = %row.title, "map created");
    Ok((StatusCode::CREATED, Json(row)))
}

/// `PUT /maps/update/:id` — replace title, description and order.
pub async fn update_map(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(map_id): Path<Uuid>,
    Json(body): Json<MapInput>,
) -> Result<Json<Map>, StatusCode> {
    let row = map::update_map(&state.pool, map_id, &body).await.map_err(map_error_to_status)?;
    info!(%map_id, order = row.order, "map updated");
    Ok(Json(row))
}

#[cfg(test)]
#[path = "maps_test.rs"]
mod tests;
