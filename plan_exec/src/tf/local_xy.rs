//! Local tangent plane projection of geodetic coordinates

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Point3;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// WGS84 semi-major axis
///
/// Units: meters
const WGS84_A: f64 = 6_378_137.0;

/// WGS84 flattening
const WGS84_F: f64 = 1.0 / 298.257_223_563;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The origin of a local XY frame, a plane tangent to the WGS84 ellipsoid with +X east and +Y
/// north.
///
/// Conversion uses the ellipsoid's radii of curvature at the origin, so accuracy falls off with
/// distance from it. This is fine for the extent of a typical plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalXyOrigin {
    /// Latitude of the origin
    ///
    /// Units: radians
    lat_rad: f64,

    /// Longitude of the origin
    ///
    /// Units: radians
    lon_rad: f64,

    /// Altitude of the origin
    ///
    /// Units: meters
    alt_m: f64,

    /// Meters per radian of latitude at the origin
    rho_lat: f64,

    /// Meters per radian of longitude at the origin
    rho_lon: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LocalXyOrigin {
    pub fn new(lat_deg: f64, lon_deg: f64, alt_m: f64) -> Self {
        let lat_rad = lat_deg.to_radians();
        let e2 = WGS84_F * (2.0 - WGS84_F);

        let p = 1.0 - e2 * lat_rad.sin().powi(2);

        // Meridional and prime vertical radii of curvature
        let rho_e = WGS84_A * (1.0 - e2) / (p.sqrt() * p);
        let rho_n = WGS84_A / p.sqrt();

        Self {
            lat_rad,
            lon_rad: lon_deg.to_radians(),
            alt_m,
            rho_lat: rho_e + alt_m,
            rho_lon: (rho_n + alt_m) * lat_rad.cos(),
        }
    }

    /// Convert a geodetic point (x = longitude, y = latitude in degrees, z = altitude in meters)
    /// into local XY coordinates.
    pub fn to_local_xy(&self, geodetic: &Point3<f64>) -> Point3<f64> {
        Point3::new(
            (geodetic.x.to_radians() - self.lon_rad) * self.rho_lon,
            (geodetic.y.to_radians() - self.lat_rad) * self.rho_lat,
            geodetic.z - self.alt_m,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_origin_maps_to_zero() {
        let origin = LocalXyOrigin::new(29.45, -98.61, 200.0);
        let p = origin.to_local_xy(&Point3::new(-98.61, 29.45, 200.0));

        assert_relative_eq!(p.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_equator_scale() {
        let origin = LocalXyOrigin::new(0.0, 0.0, 0.0);

        // At the equator a degree of longitude is the semi-major axis times pi/180
        let p = origin.to_local_xy(&Point3::new(0.001, 0.0, 5.0));
        assert_relative_eq!(p.x, 111.319_490_793, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0);
        assert_relative_eq!(p.z, 5.0);

        // North is +Y, and a degree of latitude is shorter than one of longitude at the equator
        let p = origin.to_local_xy(&Point3::new(0.0, 0.001, 0.0));
        assert!(p.y > 110.0 && p.y < 111.0);
    }
}
