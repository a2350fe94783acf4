use crate::{
    error::GeoStopResult,
    geo::{self, Coord},
    kml::KmlWriter,
};
use serde::Serialize;

/// Base radius every coverage circle starts from, in meters.
pub const BASE_RADIUS_M: f64 = 250.0;

/// Additional radius per unit of relative population, in meters. A site with exactly the
/// average population gets this much on top of the base.
pub const POPULATION_BONUS_M: f64 = 250.0;

/// Slack allowed in containment tests so a point sitting exactly on the boundary counts.
pub const COVERAGE_SLACK_M: f64 = 1.0e-6;

static_assertions::const_assert!(BASE_RADIUS_M > 0.0);
static_assertions::const_assert!(POPULATION_BONUS_M > 0.0);
static_assertions::const_assert!(COVERAGE_SLACK_M > 0.0);

/// Vertexes used to trace a circle when exporting to KML.
const KML_RING_SEGMENTS: u32 = 72;

/**
 * The coverage disc drawn around a single site.
 */
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoverageCircle {
    /// The location of the site this circle covers.
    pub center: Coord,
    /// The radius of the disc in meters.
    pub radius_m: f64,
}

impl CoverageCircle {
    /**
     * Size a circle for a site carrying `weight` people where the average site carries
     * `avg_weight`.
     *
     * An average site gets 500 meters. The radius keeps growing linearly with the site's
     * share of the average, with no upper cap.
     */
    pub fn sized_for(center: Coord, weight: f64, avg_weight: f64) -> Self {
        let radius_m = BASE_RADIUS_M + POPULATION_BONUS_M * (weight / avg_weight);

        CoverageCircle { center, radius_m }
    }

    /**
     * Check whether `point` falls within this circle.
     */
    pub fn contains(&self, point: Coord) -> bool {
        geo::great_circle_distance(point, self.center) <= self.radius_m + COVERAGE_SLACK_M
    }

    /**
     * Write this circle out as a KML polygon clamped to the ground.
     *
     * Only the Polygon element is written, so the caller can wrap it in whatever
     * Placemark and styling it wants.
     */
    pub fn kml_write<K: KmlWriter>(&self, out: &mut K) -> GeoStopResult<()> {
        out.start_polygon()?;
        out.polygon_start_outer_ring()?;
        out.start_linear_ring()?;

        for vertex in geo::circle_ring(self.center, self.radius_m, KML_RING_SEGMENTS) {
            out.linear_ring_add_vertex(vertex, 0.0)?;
        }

        out.finish_linear_ring()?;
        out.polygon_finish_outer_ring()?;
        out.finish_polygon()?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_average_site_gets_500_meters() {
        let center = Coord { lat: 0.0, lon: 0.0 };

        let circle = CoverageCircle::sized_for(center, 5.0, 5.0);
        assert_eq!(circle.radius_m, 500.0);
    }

    #[test]
    fn test_radius_scales_with_relative_weight() {
        let center = Coord { lat: 0.0, lon: 0.0 };

        // Half the average population and three times it.
        let small = CoverageCircle::sized_for(center, 1.0, 2.0);
        let large = CoverageCircle::sized_for(center, 6.0, 2.0);

        assert_eq!(small.radius_m, 375.0);
        assert_eq!(large.radius_m, 1000.0);
    }

    #[test]
    fn test_contains_with_boundary_slack() {
        let center = Coord { lat: 0.0, lon: 0.0 };
        let circle = CoverageCircle {
            center,
            radius_m: 500.0,
        };

        assert!(circle.contains(center));

        // About 222 meters east, well inside.
        let near = Coord {
            lat: 0.0,
            lon: 0.002,
        };
        assert!(circle.contains(near));

        // About 1,112 meters east, well outside.
        let far = Coord {
            lat: 0.0,
            lon: 0.01,
        };
        assert!(!circle.contains(far));

        // Exactly on the boundary, placed there by the direct calculation.
        let boundary = geo::destination(center, 45.0, 500.0);
        assert!(circle.contains(boundary));
    }
}
