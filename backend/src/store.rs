// Module store - PostgreSQL connection pool and fleet operations
// Architecture: Clean separation between data layer and business logic
// Principles: Functional, immutable, type-safe

use chrono::{DateTime, Utc};
use shared::{
    CreateMissionRequest, CreateUavRequest, CreateWaypointRequest, GeoPoint, Mission, Uav,
    Waypoint,
};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use std::env;

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("UAV not found: {0}")]
    UavNotFound(i32),

    #[error("Mission not found: {0}")]
    MissionNotFound(i32),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, FromRow)]
struct UavRow {
    id: i32,
    name: String,
    cruising_speed_kmh: f64,
    fuel_capacity_litres: f64,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl UavRow {
    fn into_uav(self, missions: Vec<Mission>) -> Uav {
        Uav {
            id: self.id,
            name: self.name,
            cruising_speed_kmh: self.cruising_speed_kmh,
            fuel_capacity_litres: self.fuel_capacity_litres,
            description: self.description,
            created_at: self.created_at,
            missions,
        }
    }
}

#[derive(Debug, FromRow)]
struct MissionRow {
    id: i32,
    name: String,
    uav_id: i32,
    created_at: DateTime<Utc>,
}

impl MissionRow {
    fn into_mission(self, uav_name: Option<String>, waypoints: Vec<Waypoint>) -> Mission {
        Mission {
            id: self.id,
            name: self.name,
            uav_id: self.uav_id,
            uav_name,
            created_at: self.created_at,
            waypoints,
        }
    }
}

#[derive(Debug, FromRow)]
struct WaypointRow {
    id: i32,
    mission_id: i32,
    latitude: f64,
    longitude: f64,
    altitude_m: f64,
    created_at: DateTime<Utc>,
}

impl From<WaypointRow> for Waypoint {
    fn from(row: WaypointRow) -> Self {
        Waypoint {
            id: row.id,
            mission_id: row.mission_id,
            latitude: row.latitude,
            longitude: row.longitude,
            altitude_m: row.altitude_m,
            created_at: row.created_at,
        }
    }
}

/// The read model handed to the flight-summary core: the mission's ordered
/// path and the cruising speed of its UAV.
#[derive(Debug, Clone)]
pub struct MissionFlightPlan {
    pub mission_id: i32,
    pub mission_name: String,
    pub uav_name: String,
    pub cruising_speed_kmh: f64,
    pub path: Vec<GeoPoint>,
}

/// Fleet database connection pool
pub struct FleetStore {
    pool: PgPool,
}

impl FleetStore {
    /// Create new database connection pool
    ///
    /// # Errors
    /// Returns StoreError if connection fails or DATABASE_URL is not set
    pub async fn new() -> Result<Self, StoreError> {
        let database_url = env::var("DATABASE_URL").map_err(|_| {
            StoreError::Config("DATABASE_URL environment variable not set".to_string())
        })?;

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&database_url)
            .await?;

        tracing::info!("PostgreSQL connection pool created");

        Ok(Self { pool })
    }

    /// Wrap an existing pool (tests, embedding).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run database migrations
    ///
    /// # Errors
    /// Returns StoreError if migration fails
    pub async fn migrate(&self) -> Result<(), StoreError> {
        // SQLx query() cannot handle multiple statements, so we use a raw connection
        let mut conn = self.pool.acquire().await?;

        let migration_sql = include_str!("../migrations/20260810_create_fleet_tables.sql");

        sqlx::raw_sql(migration_sql).execute(&mut *conn).await?;

        tracing::info!("Database migrations completed");
        Ok(())
    }

    /// Register a new UAV
    pub async fn create_uav(&self, req: CreateUavRequest) -> Result<Uav, StoreError> {
        let row = sqlx::query_as::<_, UavRow>(
            r#"
            INSERT INTO uavs (name, cruising_speed_kmh, fuel_capacity_litres, description)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(req.cruising_speed_kmh)
        .bind(req.fuel_capacity_litres)
        .bind(&req.description)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("UAV created: {} (ID: {})", row.name, row.id);
        Ok(row.into_uav(Vec::new()))
    }

    /// Get all UAVs with their missions and ordered waypoints
    pub async fn list_uavs(&self) -> Result<Vec<Uav>, StoreError> {
        let rows = sqlx::query_as::<_, UavRow>("SELECT * FROM uavs ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        let mut uavs = Vec::with_capacity(rows.len());
        for row in rows {
            let missions = self.missions_for_uav(row.id).await?;
            uavs.push(row.into_uav(missions));
        }

        tracing::info!("Retrieved {} UAVs", uavs.len());
        Ok(uavs)
    }

    /// Get a specific UAV by ID, with missions and ordered waypoints
    pub async fn get_uav(&self, id: i32) -> Result<Uav, StoreError> {
        let row = sqlx::query_as::<_, UavRow>("SELECT * FROM uavs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::UavNotFound(id))?;

        let missions = self.missions_for_uav(row.id).await?;
        Ok(row.into_uav(missions))
    }

    /// Delete a UAV by ID; its missions and their waypoints cascade
    pub async fn delete_uav(&self, id: i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM uavs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::UavNotFound(id));
        }

        tracing::info!("UAV deleted: ID {}", id);
        Ok(())
    }

    /// Create a mission for an existing UAV
    pub async fn create_mission(&self, req: CreateMissionRequest) -> Result<Mission, StoreError> {
        let uav_name = self.uav_name(req.uav_id).await?;

        let row = sqlx::query_as::<_, MissionRow>(
            r#"
            INSERT INTO missions (name, uav_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(req.uav_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Mission created: {} (ID: {})", row.name, row.id);
        Ok(row.into_mission(Some(uav_name), Vec::new()))
    }

    /// Get all missions with their UAV name and ordered waypoints
    pub async fn list_missions(&self) -> Result<Vec<Mission>, StoreError> {
        let rows = sqlx::query_as::<_, MissionRow>("SELECT * FROM missions ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        let mut missions = Vec::with_capacity(rows.len());
        for row in rows {
            let uav_name = self.uav_name(row.uav_id).await?;
            let waypoints = self.waypoints_for_mission(row.id).await?;
            missions.push(row.into_mission(Some(uav_name), waypoints));
        }

        tracing::info!("Retrieved {} missions", missions.len());
        Ok(missions)
    }

    /// Get a specific mission by ID, with ordered waypoints
    pub async fn get_mission(&self, id: i32) -> Result<Mission, StoreError> {
        let row = sqlx::query_as::<_, MissionRow>("SELECT * FROM missions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::MissionNotFound(id))?;

        let uav_name = self.uav_name(row.uav_id).await?;
        let waypoints = self.waypoints_for_mission(row.id).await?;
        Ok(row.into_mission(Some(uav_name), waypoints))
    }

    /// Delete a mission by ID; its waypoints cascade
    pub async fn delete_mission(&self, id: i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM missions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::MissionNotFound(id));
        }

        tracing::info!("Mission deleted: ID {}", id);
        Ok(())
    }

    /// Append a waypoint to an existing mission's flight path
    pub async fn create_waypoint(
        &self,
        req: CreateWaypointRequest,
    ) -> Result<Waypoint, StoreError> {
        // Explicit existence check so an unknown mission surfaces as NotFound
        // rather than a foreign-key violation.
        self.mission_exists(req.mission_id).await?;

        let row = sqlx::query_as::<_, WaypointRow>(
            r#"
            INSERT INTO waypoints (mission_id, latitude, longitude, altitude_m)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(req.mission_id)
        .bind(req.latitude)
        .bind(req.longitude)
        .bind(req.altitude_m)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            "Waypoint created for mission {} (ID: {})",
            row.mission_id,
            row.id
        );
        Ok(row.into())
    }

    /// Read surface for the flight-summary core: mission identity, UAV name,
    /// cruising speed, and the waypoint path in flight order.
    pub async fn mission_flight_plan(&self, id: i32) -> Result<MissionFlightPlan, StoreError> {
        #[derive(FromRow)]
        struct PlanRow {
            mission_id: i32,
            mission_name: String,
            uav_name: String,
            cruising_speed_kmh: f64,
        }

        let plan = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT m.id AS mission_id, m.name AS mission_name,
                   u.name AS uav_name, u.cruising_speed_kmh
            FROM missions m
            JOIN uavs u ON u.id = m.uav_id
            WHERE m.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::MissionNotFound(id))?;

        let path = self
            .waypoints_for_mission(id)
            .await?
            .iter()
            .map(Waypoint::position)
            .collect();

        Ok(MissionFlightPlan {
            mission_id: plan.mission_id,
            mission_name: plan.mission_name,
            uav_name: plan.uav_name,
            cruising_speed_kmh: plan.cruising_speed_kmh,
            path,
        })
    }

    async fn uav_name(&self, uav_id: i32) -> Result<String, StoreError> {
        sqlx::query_scalar::<_, String>("SELECT name FROM uavs WHERE id = $1")
            .bind(uav_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::UavNotFound(uav_id))
    }

    async fn mission_exists(&self, mission_id: i32) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i32>("SELECT id FROM missions WHERE id = $1")
            .bind(mission_id)
            .fetch_optional(&self.pool)
            .await?
            .map(|_| ())
            .ok_or(StoreError::MissionNotFound(mission_id))
    }

    async fn missions_for_uav(&self, uav_id: i32) -> Result<Vec<Mission>, StoreError> {
        let rows = sqlx::query_as::<_, MissionRow>(
            "SELECT * FROM missions WHERE uav_id = $1 ORDER BY id",
        )
        .bind(uav_id)
        .fetch_all(&self.pool)
        .await?;

        let mut missions = Vec::with_capacity(rows.len());
        for row in rows {
            let waypoints = self.waypoints_for_mission(row.id).await?;
            missions.push(row.into_mission(None, waypoints));
        }
        Ok(missions)
    }

    // Ascending id is insertion order, which is the flight order.
    async fn waypoints_for_mission(&self, mission_id: i32) -> Result<Vec<Waypoint>, StoreError> {
        let rows = sqlx::query_as::<_, WaypointRow>(
            "SELECT * FROM waypoints WHERE mission_id = $1 ORDER BY id",
        )
        .bind(mission_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Waypoint::from).collect())
    }
}
