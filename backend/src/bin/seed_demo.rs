use backend::store::FleetStore;
use backend::summary::compute_flight_summary;
use clap::Parser;
use shared::{CreateMissionRequest, CreateUavRequest, CreateWaypointRequest};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Seed a demo UAV with one mission and waypoints, then print its flight summary"
)]
struct Args {
    /// Name of the demo UAV
    #[arg(long, default_value = "Falcon-1")]
    uav_name: String,

    /// Cruising speed in km/h
    #[arg(long, default_value_t = 120.0)]
    speed: f64,

    /// Name of the demo mission
    #[arg(long, default_value = "Coastal survey")]
    mission_name: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let store = FleetStore::new().await?;
    store.migrate().await?;

    let uav = store
        .create_uav(CreateUavRequest {
            name: args.uav_name,
            cruising_speed_kmh: args.speed,
            fuel_capacity_litres: 40.0,
            description: Some("Demo airframe".to_string()),
        })
        .await?;
    tracing::info!("seeded UAV {} (ID {})", uav.name, uav.id);

    let mission = store
        .create_mission(CreateMissionRequest {
            name: args.mission_name,
            uav_id: uav.id,
        })
        .await?;
    tracing::info!("seeded mission {} (ID {})", mission.name, mission.id);

    // A short triangle off the Ligurian coast.
    let demo_path = [(43.70, 7.26, 120.0), (43.55, 7.02, 150.0), (43.40, 6.75, 90.0)];
    for (latitude, longitude, altitude_m) in demo_path {
        store
            .create_waypoint(CreateWaypointRequest {
                mission_id: mission.id,
                latitude,
                longitude,
                altitude_m,
            })
            .await?;
    }

    let plan = store.mission_flight_plan(mission.id).await?;
    let summary = compute_flight_summary(&plan.path, plan.cruising_speed_kmh)?;
    tracing::info!(
        "mission {}: {:.2} km, {:.2} L fuel, {:.1} min at {} km/h",
        plan.mission_name,
        summary.total_distance_km,
        summary.estimated_fuel_litres,
        summary.estimated_travel_time_minutes,
        plan.cruising_speed_kmh
    );

    Ok(())
}
