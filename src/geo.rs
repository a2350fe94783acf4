/*!
 * Geographic calculations.
 *
 * Simple spherical-Earth approximations. They lose accuracy over continental distances,
 * but at the neighborhood scale this tool works on the error is far below the size of
 * the coverage circles it draws.
 */
use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters used by all spherical calculations in this crate.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

const DEG2RAD: f64 = 2.0 * std::f64::consts::PI / 360.0;
const RAD2DEG: f64 = 360.0 / (2.0 * std::f64::consts::PI);

/// A coordinate on the globe in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    /// Latitude, positive north, in degrees.
    pub lat: f64,
    /// Longitude, positive east, in degrees.
    pub lon: f64,
}

impl Coord {
    /**
     * Test if these coordinates are nearly the same, within `eps` degrees on each axis.
     */
    pub fn is_close(&self, other: Coord, eps: f64) -> bool {
        let lat_diff = (self.lat - other.lat).abs();
        let lon_diff = (self.lon - other.lon).abs();

        lat_diff < eps && lon_diff < eps
    }
}

/**
 * The simple great circle distance calculation.
 *
 * #Arguments
 * * start - the first point.
 * * end - the second point.
 *
 * #Returns
 * The distance between the points in meters.
 */
pub fn great_circle_distance(start: Coord, end: Coord) -> f64 {
    let lat1_r = start.lat * DEG2RAD;
    let lon1_r = start.lon * DEG2RAD;
    let lat2_r = end.lat * DEG2RAD;
    let lon2_r = end.lon * DEG2RAD;

    let dlat2 = (lat2_r - lat1_r) / 2.0;
    let dlon2 = (lon2_r - lon1_r) / 2.0;

    let sin2_dlat = f64::powf(f64::sin(dlat2), 2.0);
    let sin2_dlon = f64::powf(f64::sin(dlon2), 2.0);

    let arc = 2.0
        * f64::asin(f64::sqrt(
            sin2_dlat + sin2_dlon * f64::cos(lat1_r) * f64::cos(lat2_r),
        ));

    arc * EARTH_RADIUS_M
}

/**
 * The point reached by traveling `distance_m` meters from `start` on the given bearing.
 *
 * #Arguments
 * * start - the starting point.
 * * bearing_deg - the initial bearing in degrees clockwise from north.
 * * distance_m - the distance to travel in meters.
 *
 * #Returns
 * The destination, with longitude normalized to [-180.0, 180.0).
 */
pub fn destination(start: Coord, bearing_deg: f64, distance_m: f64) -> Coord {
    let lat_r = start.lat * DEG2RAD;
    let lon_r = start.lon * DEG2RAD;
    let bearing_r = bearing_deg * DEG2RAD;
    let arc = distance_m / EARTH_RADIUS_M;

    let dest_lat_r =
        f64::asin(lat_r.sin() * arc.cos() + lat_r.cos() * arc.sin() * bearing_r.cos());
    let dest_lon_r = lon_r
        + f64::atan2(
            bearing_r.sin() * arc.sin() * lat_r.cos(),
            arc.cos() - lat_r.sin() * dest_lat_r.sin(),
        );

    let lat = dest_lat_r * RAD2DEG;
    let lon = (dest_lon_r * RAD2DEG + 180.0).rem_euclid(360.0) - 180.0;

    Coord { lat, lon }
}

/**
 * A closed ring of coordinates tracing a circle of the given radius around `center`.
 *
 * The ring has `segments + 1` vertices, the last an exact copy of the first so it can be
 * fed straight into a polygon writer. `segments` must be at least 3.
 */
pub fn circle_ring(center: Coord, radius_m: f64, segments: u32) -> Vec<Coord> {
    debug_assert!(segments >= 3);

    let mut ring: Vec<Coord> = Vec::with_capacity(segments as usize + 1);
    for i in 0..segments {
        let bearing = 360.0 * f64::from(i) / f64::from(segments);
        ring.push(destination(center, bearing, radius_m));
    }

    if let Some(&first) = ring.first() {
        ring.push(first);
    }

    ring
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        let pt = Coord {
            lat: 46.8721,
            lon: -113.9940,
        };

        assert_eq!(great_circle_distance(pt, pt), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Coord {
            lat: 46.8721,
            lon: -113.9940,
        };
        let b = Coord {
            lat: 45.6793,
            lon: -111.0373,
        };

        assert_eq!(great_circle_distance(a, b), great_circle_distance(b, a));
    }

    #[test]
    fn test_one_degree_of_longitude_at_the_equator() {
        let origin = Coord { lat: 0.0, lon: 0.0 };
        let east = Coord { lat: 0.0, lon: 1.0 };

        let dist = great_circle_distance(origin, east);

        // One degree of arc on a sphere of radius 6,371 km is about 111,195 meters.
        assert!((dist - 111_195.0).abs() < 1.0);
    }

    #[test]
    fn test_is_close_thresholds() {
        let a = Coord {
            lat: 45.5,
            lon: -120.0,
        };
        let b = Coord {
            lat: 45.5000002,
            lon: -120.0,
        };

        assert!(a.is_close(b, 1.0e-6));
        assert!(!a.is_close(b, 1.0e-8));
    }

    #[test]
    fn test_destination_east_and_north() {
        let origin = Coord { lat: 0.0, lon: 0.0 };
        let one_degree_m = EARTH_RADIUS_M * DEG2RAD;

        let east = destination(origin, 90.0, one_degree_m);
        assert!(east.is_close(Coord { lat: 0.0, lon: 1.0 }, 1.0e-6));

        let north = destination(origin, 0.0, one_degree_m);
        assert!(north.is_close(Coord { lat: 1.0, lon: 0.0 }, 1.0e-6));
    }

    #[test]
    fn test_destination_normalizes_unwrapped_longitudes() {
        // Site files never range check longitudes, so a start point a full
        // revolution or more out must still come back in [-180, 180).
        let start = Coord {
            lat: 45.0,
            lon: -600.0,
        };

        let east = destination(start, 90.0, 1000.0);
        assert!(east.lon >= -180.0 && east.lon < 180.0);

        // -600 degrees is the same meridian as +120 degrees.
        let same = destination(
            Coord {
                lat: 45.0,
                lon: 120.0,
            },
            90.0,
            1000.0,
        );
        assert!(east.is_close(same, 1.0e-9));
    }

    #[test]
    fn test_destination_round_trips_through_distance() {
        let start = Coord {
            lat: 46.8721,
            lon: -113.9940,
        };

        for bearing in [0.0, 45.0, 137.0, 260.5] {
            let dest = destination(start, bearing, 750.0);
            let dist = great_circle_distance(start, dest);
            assert!((dist - 750.0).abs() < 1.0e-6);
        }
    }

    #[test]
    fn test_circle_ring_is_closed_and_on_the_circle() {
        let center = Coord {
            lat: 45.0,
            lon: -116.0,
        };

        let ring = circle_ring(center, 500.0, 32);

        assert_eq!(ring.len(), 33);
        assert_eq!(ring[0], ring[32]);

        for vertex in &ring {
            let dist = great_circle_distance(center, *vertex);
            assert!((dist - 500.0).abs() < 1.0e-6);
        }
    }
}
