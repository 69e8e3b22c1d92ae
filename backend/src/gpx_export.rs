use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use geo_types::Point;
use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};

use crate::error::FlightPathError;
use shared::GeoPoint;

pub fn encode_mission_as_gpx(name: &str, path: &[GeoPoint]) -> Result<String, FlightPathError> {
    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some("uav_fleet".into()),
        ..Default::default()
    };
    let mut track = Track {
        name: Some(name.into()),
        ..Default::default()
    };

    let mut segment = TrackSegment::new();
    for waypoint in path.iter().map(to_waypoint) {
        segment.points.push(waypoint);
    }
    track.segments.push(segment);
    gpx.tracks.push(track);

    let mut buffer = Vec::new();
    gpx::write(&gpx, &mut buffer)?;
    Ok(BASE64.encode(buffer))
}

fn to_waypoint(point: &GeoPoint) -> Waypoint {
    Waypoint::new(Point::new(point.longitude, point.latitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_track_carries_mission_name_and_points() {
        let path = vec![
            GeoPoint {
                latitude: 45.0,
                longitude: 5.0,
            },
            GeoPoint {
                latitude: 45.01,
                longitude: 5.01,
            },
        ];

        let encoded = encode_mission_as_gpx("Survey A", &path).expect("gpx");
        let xml = BASE64.decode(encoded).expect("valid base64");
        let xml = String::from_utf8(xml).expect("utf8");

        assert!(xml.contains("Survey A"));
        assert_eq!(xml.matches("<trkpt").count(), 2);
    }

    #[test]
    fn test_empty_path_still_encodes() {
        let encoded = encode_mission_as_gpx("Empty", &[]).expect("gpx");
        assert!(!encoded.is_empty());
    }
}
