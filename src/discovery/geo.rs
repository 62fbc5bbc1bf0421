use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 coordinate pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Great-circle distance between two points in kilometers (Haversine).
pub fn distance_km(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Distance rounded to one decimal, as shown to users. Ranking always uses
/// the unrounded value.
pub fn display_km(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_same_point() {
        let p = Coordinates::new(41.0082, 28.9784);
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = Coordinates::new(41.0, 29.0);
        let b = Coordinates::new(42.0, 29.0);
        let d = distance_km(a, b);
        assert!((d - 111.2).abs() < 0.5, "got {d}");
    }

    #[test]
    fn display_rounds_to_one_decimal() {
        assert_eq!(display_km(2.149), 2.1);
        assert_eq!(display_km(2.15), 2.2);
        assert_eq!(display_km(0.0), 0.0);
    }

    #[test]
    fn range_check() {
        assert!(Coordinates::new(41.0, 29.0).in_range());
        assert!(!Coordinates::new(91.0, 29.0).in_range());
        assert!(!Coordinates::new(41.0, -181.0).in_range());
    }
}
