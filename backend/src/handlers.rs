// Handlers for the fleet REST API
// Architecture: RESTful API with PostgreSQL backend
// Principles: Functional, immutable, type-safe

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::error::FlightPathError;
use crate::gpx_export::encode_mission_as_gpx;
use crate::store::StoreError;
use crate::summary::{compute_flight_summary, SummaryError};
use crate::AppState;
use shared::{
    ApiError, CreateMissionRequest, CreateUavRequest, CreateWaypointRequest, Mission, MissionGpx,
    MissionSummary, Uav, Waypoint,
};

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

/// GET /ping - liveness check
pub async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}

/// POST /uav - Register a new UAV
pub async fn create_uav(
    State(state): State<AppState>,
    Json(req): Json<CreateUavRequest>,
) -> ApiResult<(StatusCode, Json<Uav>)> {
    if req.name.trim().is_empty()
        || !req.cruising_speed_kmh.is_finite()
        || req.cruising_speed_kmh <= 0.0
    {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                message: "Name is required and speed must be positive".to_string(),
            }),
        ));
    }

    state
        .store
        .create_uav(req)
        .await
        .map(|uav| (StatusCode::CREATED, Json(uav)))
        .map_err(store_error_to_api_error)
}

/// GET /uav - List all UAVs with missions and waypoints
pub async fn list_uavs(State(state): State<AppState>) -> ApiResult<Json<Vec<Uav>>> {
    state
        .store
        .list_uavs()
        .await
        .map(Json)
        .map_err(store_error_to_api_error)
}

/// GET /uav/:id - Get a specific UAV
pub async fn get_uav(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Json<Uav>> {
    state
        .store
        .get_uav(id)
        .await
        .map(Json)
        .map_err(store_error_to_api_error)
}

/// DELETE /uav/:id - Delete a UAV and cascade its missions
pub async fn delete_uav(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state
        .store
        .delete_uav(id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(store_error_to_api_error)
}

/// POST /mission - Create a mission for an existing UAV
pub async fn create_mission(
    State(state): State<AppState>,
    Json(req): Json<CreateMissionRequest>,
) -> ApiResult<(StatusCode, Json<Mission>)> {
    state
        .store
        .create_mission(req)
        .await
        .map(|mission| (StatusCode::CREATED, Json(mission)))
        .map_err(store_error_to_api_error)
}

/// GET /mission - List all missions
pub async fn list_missions(State(state): State<AppState>) -> ApiResult<Json<Vec<Mission>>> {
    state
        .store
        .list_missions()
        .await
        .map(Json)
        .map_err(store_error_to_api_error)
}

/// GET /mission/:id - Get a specific mission
pub async fn get_mission(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Mission>> {
    state
        .store
        .get_mission(id)
        .await
        .map(Json)
        .map_err(store_error_to_api_error)
}

/// DELETE /mission/:id - Delete a mission and cascade its waypoints
pub async fn delete_mission(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state
        .store
        .delete_mission(id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(store_error_to_api_error)
}

/// POST /waypoint - Append a waypoint to a mission's flight path
pub async fn create_waypoint(
    State(state): State<AppState>,
    Json(req): Json<CreateWaypointRequest>,
) -> ApiResult<(StatusCode, Json<Waypoint>)> {
    state
        .store
        .create_waypoint(req)
        .await
        .map(|waypoint| (StatusCode::CREATED, Json(waypoint)))
        .map_err(store_error_to_api_error)
}

/// GET /mission/:id/summary - Derived flight metrics for a mission
pub async fn mission_summary(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<MissionSummary>> {
    let plan = state
        .store
        .mission_flight_plan(id)
        .await
        .map_err(store_error_to_api_error)?;

    let summary = compute_flight_summary(&plan.path, plan.cruising_speed_kmh)
        .map_err(summary_error_to_api_error)?;

    Ok(Json(MissionSummary {
        mission_id: plan.mission_id,
        uav: plan.uav_name,
        total_distance_km: summary.total_distance_km,
        estimated_fuel_litres: summary.estimated_fuel_litres,
        estimated_travel_time_minutes: summary.estimated_travel_time_minutes,
    }))
}

/// GET /mission/:id/gpx - Mission flight path as a base64 GPX track
pub async fn mission_gpx(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<MissionGpx>> {
    let plan = state
        .store
        .mission_flight_plan(id)
        .await
        .map_err(store_error_to_api_error)?;

    let gpx_base64 =
        encode_mission_as_gpx(&plan.mission_name, &plan.path).map_err(gpx_error_to_api_error)?;

    Ok(Json(MissionGpx {
        mission_id: plan.mission_id,
        gpx_base64,
    }))
}

/// Convert StoreError to API error response
fn store_error_to_api_error(err: StoreError) -> (StatusCode, Json<ApiError>) {
    let (status, message) = match err {
        StoreError::UavNotFound(id) => (
            StatusCode::NOT_FOUND,
            format!("UAV with ID {} not found", id),
        ),
        StoreError::MissionNotFound(id) => (
            StatusCode::NOT_FOUND,
            format!("Mission with ID {} not found", id),
        ),
        StoreError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        StoreError::Connection(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            format!("Database connection error: {}", e),
        ),
    };

    (status, Json(ApiError { message }))
}

// The record exists but its speed is unusable, hence 422 rather than 404.
fn summary_error_to_api_error(err: SummaryError) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiError {
            message: err.to_string(),
        }),
    )
}

fn gpx_error_to_api_error(err: FlightPathError) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError {
            message: err.to_string(),
        }),
    )
}
