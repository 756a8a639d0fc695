//! Geographic primitives: coordinates, great-circle distance and the
//! geometric travel estimate used whenever live road routing is unavailable.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Road distance is typically 1.4x the straight-line distance
pub const ROAD_TORTUOSITY_FACTOR: f64 = 1.4;

/// Flat average speed assumed by the geometric estimate
pub const FALLBACK_SPEED_KMH: f64 = 50.0;

/// A WGS84 point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// GeoJSON position order, `[lng, lat]`
    pub fn to_position(self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

/// Great-circle distance in kilometers
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Travel between two points: distance, duration and the path followed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelLeg {
    pub distance_km: f64,
    pub duration_hours: f64,
    /// Path as `[lng, lat]` positions
    pub geometry: Vec<[f64; 2]>,
}

impl TravelLeg {
    /// Geometric estimate: haversine inflated by the tortuosity factor at a
    /// flat average speed, along a straight line.
    pub fn estimate(from: Coordinate, to: Coordinate) -> Self {
        let distance_km = haversine_km(from, to) * ROAD_TORTUOSITY_FACTOR;
        Self {
            distance_km,
            duration_hours: distance_km / FALLBACK_SPEED_KMH,
            geometry: vec![from.to_position(), to.to_position()],
        }
    }

    /// The same leg travelled in the opposite direction
    pub fn reversed(&self) -> Self {
        let mut geometry = self.geometry.clone();
        geometry.reverse();
        Self {
            distance_km: self.distance_km,
            duration_hours: self.duration_hours,
            geometry,
        }
    }
}
