//! Great-circle distances over GPS coordinates.
//!
//! All distances are in meters. Row-scale geometry (tens to hundreds of
//! meters) keeps the spherical approximation well below GPS noise.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A GPS coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Haversine distance between two coordinates, in meters.
pub fn geodesic_m(from: Coord, to: Coord) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Cumulative length of a polyline of coordinates, in meters.
pub fn path_length_m(points: &[Coord]) -> f64 {
    points
        .windows(2)
        .map(|pair| geodesic_m(pair[0], pair[1]))
        .sum()
}
