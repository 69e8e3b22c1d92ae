use shared::GeoPoint;

pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Great-circle distance in kilometers between two points, haversine formula.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    let h = sin_dlat * sin_dlat
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Total distance along an ordered path, summing consecutive pairs.
/// Empty and single-point paths have zero length.
pub fn path_distance_km(path: &[GeoPoint]) -> f64 {
    path.windows(2).map(|w| haversine_km(w[0], w[1])).sum()
}
