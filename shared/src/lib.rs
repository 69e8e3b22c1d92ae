use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single geographic coordinate on the flight path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Derived flight metrics for one mission. Computed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightSummary {
    pub total_distance_km: f64,
    pub estimated_fuel_litres: f64,
    pub estimated_travel_time_minutes: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Uav {
    pub id: i32,
    pub name: String,
    pub cruising_speed_kmh: f64,
    pub fuel_capacity_litres: f64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub missions: Vec<Mission>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub id: i32,
    pub name: String,
    pub uav_id: i32,
    /// Present on listings where the owning UAV is joined in.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub uav_name: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Waypoints in flight order (insertion order).
    pub waypoints: Vec<Waypoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: i32,
    pub mission_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_m: f64,
    pub created_at: DateTime<Utc>,
}

impl Waypoint {
    pub fn position(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUavRequest {
    pub name: String,
    pub cruising_speed_kmh: f64,
    #[serde(default)]
    pub fuel_capacity_litres: f64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMissionRequest {
    pub name: String,
    pub uav_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWaypointRequest {
    pub mission_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub altitude_m: f64,
}

/// Payload of GET /mission/:id/summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionSummary {
    pub mission_id: i32,
    pub uav: String,
    pub total_distance_km: f64,
    pub estimated_fuel_litres: f64,
    pub estimated_travel_time_minutes: f64,
}

/// Payload of GET /mission/:id/gpx.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionGpx {
    pub mission_id: i32,
    pub gpx_base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}
