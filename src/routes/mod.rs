//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The dashboard and the mobile app are separate origins talking JSON to
//! this router. Reads are public; writes to maps need the admin token
//! (see [`auth::AdminUser`]).

pub mod activities;
pub mod auth;
pub mod maps;
pub mod theory;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/maps", get(maps::list_maps).post(maps::create_map))
        .route("/maps/{id}", get(maps::get_map))
        .route("/maps/update/{id}", put(maps::update_map))
        .route("/phases/{id}/activities", get(activities::list_phase_activities))
        .route("/activities/{id}", get(activities::get_activity))
        .route("/activities/{id}/answer", post(activities::check_answer))
        .route("/theory/render", post(theory::render))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
