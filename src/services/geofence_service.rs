/// Single circular office boundary, center and radius injected from config.
#[derive(Debug, Clone)]
pub struct GeofenceService {
    center_lat: f64,
    center_lng: f64,
    radius_meters: f64,
}

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

impl GeofenceService {
    pub fn new(center_lat: f64, center_lng: f64, radius_meters: f64) -> Self {
        Self {
            center_lat,
            center_lng,
            radius_meters,
        }
    }

    /// Haversine great-circle distance between two points, in meters.
    pub fn distance_meters(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
        let d_lat = (lat2 - lat1).to_radians();
        let d_lng = (lng2 - lng1).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_METERS * c
    }

    /// Non-finite coordinates classify as outside.
    pub fn is_inside(&self, lat: f64, lng: f64) -> bool {
        if !lat.is_finite() || !lng.is_finite() {
            return false;
        }
        Self::distance_meters(lat, lng, self.center_lat, self.center_lng) <= self.radius_meters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Connaught Place, New Delhi.
    const OFFICE_LAT: f64 = 28.6139;
    const OFFICE_LNG: f64 = 77.2090;

    fn fence() -> GeofenceService {
        GeofenceService::new(OFFICE_LAT, OFFICE_LNG, 200.0)
    }

    #[test]
    fn center_is_inside() {
        assert!(fence().is_inside(OFFICE_LAT, OFFICE_LNG));
    }

    #[test]
    fn nearby_point_is_inside() {
        // ~110 m north of center (0.001 deg latitude).
        assert!(fence().is_inside(OFFICE_LAT + 0.001, OFFICE_LNG));
    }

    #[test]
    fn distant_point_is_outside() {
        // ~1.1 km north.
        assert!(!fence().is_inside(OFFICE_LAT + 0.01, OFFICE_LNG));
    }

    #[test]
    fn non_finite_coordinates_are_outside() {
        assert!(!fence().is_inside(f64::NAN, OFFICE_LNG));
        assert!(!fence().is_inside(OFFICE_LAT, f64::INFINITY));
    }

    #[test]
    fn distance_is_symmetric() {
        let d1 = GeofenceService::distance_meters(OFFICE_LAT, OFFICE_LNG, 28.70, 77.10);
        let d2 = GeofenceService::distance_meters(28.70, 77.10, OFFICE_LAT, OFFICE_LNG);
        assert!((d1 - d2).abs() < 1e-6);
    }

    #[test]
    fn known_distance_roughly_matches() {
        // One degree of latitude is ~111.19 km on the sphere.
        let d = GeofenceService::distance_meters(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111_195.0).abs() < 200.0, "got {}", d);
    }
}
