pub mod error;
pub mod geo;
pub mod gpx_export;
pub mod handlers;
pub mod store;
pub mod summary;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::store::FleetStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FleetStore>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/uav", post(handlers::create_uav))
        .route("/uav", get(handlers::list_uavs))
        .route("/uav/:id", get(handlers::get_uav))
        .route("/uav/:id", delete(handlers::delete_uav))
        .route("/mission", post(handlers::create_mission))
        .route("/mission", get(handlers::list_missions))
        .route("/mission/:id", get(handlers::get_mission))
        .route("/mission/:id", delete(handlers::delete_mission))
        .route("/mission/:id/summary", get(handlers::mission_summary))
        .route("/mission/:id/gpx", get(handlers::mission_gpx))
        .route("/waypoint", post(handlers::create_waypoint))
        .with_state(state)
}
