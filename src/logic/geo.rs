//! Geo Utility
//!
//! Great-circle distance between two WGS84 coordinates.

use crate::constants::EARTH_RADIUS_M;

/// Haversine distance in meters between (lat1, lon1) and (lat2, lon2), degrees.
///
/// NaN in any coordinate propagates to the result; callers treat a NaN
/// distance as anomalous.
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    EARTH_RADIUS_M * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(distance_meters(40.7128, -74.0060, 40.7128, -74.0060), 0.0);
    }

    #[test]
    fn test_one_degree_latitude() {
        // 1 degree of latitude ≈ 111.19 km on a 6371 km sphere
        let d = distance_meters(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111_194.9).abs() < 1.0, "got {}", d);
    }

    #[test]
    fn test_symmetric() {
        let a = distance_meters(40.7128, -74.0060, 51.5074, -0.1278);
        let b = distance_meters(51.5074, -0.1278, 40.7128, -74.0060);
        assert!((a - b).abs() < 1e-6);
        // New York -> London ≈ 5570 km
        assert!((a / 1000.0 - 5570.0).abs() < 10.0);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(distance_meters(f64::NAN, 0.0, 1.0, 1.0).is_nan());
    }
}
