use shared::{FlightSummary, GeoPoint};

use crate::geo::path_distance_km;

/// Linear fuel model applied to the total path distance.
pub const FUEL_BURN_LITRES_PER_KM: f64 = 0.2;

#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("cruising speed must be positive, got {speed_kmh} km/h")]
    InvalidSpeed { speed_kmh: f64 },
}

/// Derive the flight summary for an ordered waypoint path.
///
/// The speed is validated up front: a zero, negative, or non-finite speed
/// fails with `InvalidSpeed` even for an empty path, instead of leaking
/// Infinity or NaN into the travel-time estimate.
pub fn compute_flight_summary(
    path: &[GeoPoint],
    cruising_speed_kmh: f64,
) -> Result<FlightSummary, SummaryError> {
    if !(cruising_speed_kmh.is_finite() && cruising_speed_kmh > 0.0) {
        return Err(SummaryError::InvalidSpeed {
            speed_kmh: cruising_speed_kmh,
        });
    }

    let total_distance_km = path_distance_km(path);

    Ok(FlightSummary {
        total_distance_km,
        estimated_fuel_litres: total_distance_km * FUEL_BURN_LITRES_PER_KM,
        estimated_travel_time_minutes: total_distance_km / cruising_speed_kmh * 60.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::haversine_km;

    fn point(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint {
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_empty_path_is_all_zero() {
        let summary = compute_flight_summary(&[], 120.0).expect("valid speed");
        assert_eq!(summary.total_distance_km, 0.0);
        assert_eq!(summary.estimated_fuel_litres, 0.0);
        assert_eq!(summary.estimated_travel_time_minutes, 0.0);
    }

    #[test]
    fn test_single_waypoint_is_all_zero() {
        let summary = compute_flight_summary(&[point(45.0, 5.0)], 120.0).expect("valid speed");
        assert_eq!(summary.total_distance_km, 0.0);
        assert_eq!(summary.estimated_fuel_litres, 0.0);
        assert_eq!(summary.estimated_travel_time_minutes, 0.0);
    }

    #[test]
    fn test_fuel_is_distance_times_burn_rate() {
        let path = vec![point(0.0, 0.0), point(0.0, 1.0)];
        let summary = compute_flight_summary(&path, 100.0).expect("valid speed");
        let distance = path_distance_km(&path);
        assert_eq!(summary.estimated_fuel_litres, distance * 0.2);
    }

    #[test]
    fn test_time_is_distance_over_speed_in_minutes() {
        let path = vec![point(0.0, 0.0), point(0.0, 1.0)];
        let speed = 90.0;
        let summary = compute_flight_summary(&path, speed).expect("valid speed");
        let distance = path_distance_km(&path);
        assert_eq!(summary.estimated_travel_time_minutes, distance / speed * 60.0);
    }

    #[test]
    fn test_zero_speed_is_rejected() {
        let result = compute_flight_summary(&[point(0.0, 0.0), point(0.0, 1.0)], 0.0);
        assert!(matches!(
            result,
            Err(SummaryError::InvalidSpeed { speed_kmh }) if speed_kmh == 0.0
        ));
    }

    #[test]
    fn test_negative_speed_is_rejected() {
        let result = compute_flight_summary(&[point(0.0, 0.0), point(0.0, 1.0)], -50.0);
        assert!(matches!(result, Err(SummaryError::InvalidSpeed { .. })));
    }

    #[test]
    fn test_nan_speed_is_rejected() {
        let result = compute_flight_summary(&[], f64::NAN);
        assert!(matches!(result, Err(SummaryError::InvalidSpeed { .. })));
    }

    #[test]
    fn test_invalid_speed_wins_over_empty_path() {
        // Distance would be zero regardless, but the speed contract still holds.
        assert!(compute_flight_summary(&[], 0.0).is_err());
    }

    #[test]
    fn test_path_sum_is_not_endpoint_distance() {
        let a = point(0.0, 0.0);
        let b = point(0.0, 1.0);
        let c = point(1.0, 1.0);
        let summary = compute_flight_summary(&[a, b, c], 100.0).expect("valid speed");
        let legs = haversine_km(a, b) + haversine_km(b, c);
        assert!((summary.total_distance_km - legs).abs() < 1e-9);
        assert!((summary.total_distance_km - haversine_km(a, c)).abs() > 1.0);
    }

    #[test]
    fn test_reordering_waypoints_changes_distance() {
        let a = point(0.0, 0.0);
        let b = point(0.0, 1.0);
        let c = point(1.0, 1.0);
        let original = compute_flight_summary(&[a, b, c], 100.0).unwrap();
        let shuffled = compute_flight_summary(&[b, a, c], 100.0).unwrap();
        assert!((original.total_distance_km - shuffled.total_distance_km).abs() > 1e-6);
    }

    #[test]
    fn test_reversed_path_keeps_distance() {
        let path = vec![point(0.0, 0.0), point(0.0, 1.0), point(1.0, 1.0)];
        let mut reversed = path.clone();
        reversed.reverse();
        let forward = compute_flight_summary(&path, 100.0).unwrap();
        let backward = compute_flight_summary(&reversed, 100.0).unwrap();
        assert!((forward.total_distance_km - backward.total_distance_km).abs() < 1e-9);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn valid_point() -> impl Strategy<Value = GeoPoint> {
            (-90.0..=90.0, -180.0..=180.0).prop_map(|(latitude, longitude)| GeoPoint {
                latitude,
                longitude,
            })
        }

        proptest! {
            #[test]
            fn prop_fuel_formula_exact(
                path in prop::collection::vec(valid_point(), 0..10),
                speed in 1.0..500.0f64
            ) {
                let summary = compute_flight_summary(&path, speed).unwrap();
                prop_assert_eq!(
                    summary.estimated_fuel_litres,
                    summary.total_distance_km * FUEL_BURN_LITRES_PER_KM
                );
            }

            #[test]
            fn prop_time_formula_exact(
                path in prop::collection::vec(valid_point(), 0..10),
                speed in 1.0..500.0f64
            ) {
                let summary = compute_flight_summary(&path, speed).unwrap();
                prop_assert_eq!(
                    summary.estimated_travel_time_minutes,
                    summary.total_distance_km / speed * 60.0
                );
            }

            #[test]
            fn prop_summary_is_finite_and_non_negative(
                path in prop::collection::vec(valid_point(), 0..10),
                speed in 1.0..500.0f64
            ) {
                let summary = compute_flight_summary(&path, speed).unwrap();
                prop_assert!(summary.total_distance_km.is_finite());
                prop_assert!(summary.estimated_fuel_litres.is_finite());
                prop_assert!(summary.estimated_travel_time_minutes.is_finite());
                prop_assert!(summary.total_distance_km >= 0.0);
                prop_assert!(summary.estimated_fuel_litres >= 0.0);
                prop_assert!(summary.estimated_travel_time_minutes >= 0.0);
            }

            #[test]
            fn prop_non_positive_speed_always_fails(
                path in prop::collection::vec(valid_point(), 0..10),
                speed in -500.0..=0.0f64
            ) {
                prop_assert!(compute_flight_summary(&path, speed).is_err());
            }
        }
    }
}
