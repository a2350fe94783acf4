use crate::{geo::Coord, site::Site, stop::circle::CoverageCircle};
use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/**
 * The result of placing a stop for a list of sites.
 *
 * A fresh value is computed on every call; nothing is cached or carried between runs.
 */
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopAnalysis {
    /// The population-weighted centroid of the sites with usable locations.
    pub best_point: Coord,
    /// How many coverage circles contain the best point.
    pub covered: usize,
    /// How many sites had a usable location and took part in the analysis.
    pub total: usize,
    /// One coverage circle per participating site, in the same order those sites
    /// appeared in the input.
    pub circles: Vec<CoverageCircle>,
}

impl StopAnalysis {
    /**
     * Place a stop for the given sites.
     *
     * Sites without a usable location are skipped. The best point is the
     * population-weighted arithmetic mean of the remaining coordinates. Averaging
     * degrees directly is not geodesically exact, but at the neighborhood scales this
     * tool targets the error is negligible next to the coverage radii.
     *
     * An empty list (or one with no usable locations) is not an error: the result is a
     * best point at the origin with zero counts and no circles.
     */
    pub fn from_sites(sites: &[Site]) -> Self {
        let mut located: Vec<(Coord, f64)> = Vec::with_capacity(sites.len());
        for site in sites {
            if let Some(loc) = site.location() {
                located.push((loc, site.weight()));
            }
        }

        if located.is_empty() {
            return StopAnalysis {
                best_point: Coord { lat: 0.0, lon: 0.0 },
                covered: 0,
                total: 0,
                circles: vec![],
            };
        }

        let mut total_weight = 0.0;
        let mut lat_sum = 0.0;
        let mut lon_sum = 0.0;
        for &(loc, weight) in &located {
            total_weight += weight;
            lat_sum += loc.lat * weight;
            lon_sum += loc.lon * weight;
        }

        let best_point = Coord {
            lat: lat_sum / total_weight,
            lon: lon_sum / total_weight,
        };

        let avg_weight = total_weight / located.len() as f64;

        let circles: Vec<CoverageCircle> = located
            .iter()
            .map(|&(loc, weight)| CoverageCircle::sized_for(loc, weight, avg_weight))
            .collect();

        let covered = circles
            .iter()
            .filter(|circle| circle.contains(best_point))
            .count();

        StopAnalysis {
            best_point,
            covered,
            total: located.len(),
            circles,
        }
    }

    /**
     * The share of sites whose circle reaches the best point, as a whole percentage.
     *
     * Zero participating sites gives zero percent rather than a division error.
     */
    pub fn efficiency_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }

        (100.0 * self.covered as f64 / self.total as f64).round() as u32
    }
}

impl Display for StopAnalysis {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        if self.total == 0 {
            return writeln!(f, "No sites with a usable location.");
        }

        writeln!(f, "    Best Stop: {:.5},{:.5}", self.best_point.lat, self.best_point.lon)?;
        writeln!(f, "Sites Covered: {} of {}", self.covered, self.total)?;
        writeln!(f, "   Efficiency: {}%", self.efficiency_percent())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn site(id: u64, lat: f64, lon: f64, population: i32) -> Site {
        Site {
            id,
            name: None,
            lat,
            lon,
            population,
        }
    }

    #[test]
    fn test_no_sites_is_not_an_error() {
        let analysis = StopAnalysis::from_sites(&[]);

        assert_eq!(analysis.best_point, Coord { lat: 0.0, lon: 0.0 });
        assert_eq!(analysis.covered, 0);
        assert_eq!(analysis.total, 0);
        assert!(analysis.circles.is_empty());
    }

    #[test]
    fn test_single_site_covers_itself() {
        let sites = [site(1, 10.0, 20.0, 5)];

        let analysis = StopAnalysis::from_sites(&sites);

        assert_eq!(
            analysis.best_point,
            Coord {
                lat: 10.0,
                lon: 20.0
            }
        );
        assert_eq!(analysis.total, 1);
        assert_eq!(analysis.covered, 1);
        assert_eq!(analysis.circles.len(), 1);

        // The lone site is exactly average, so its circle is the base 500 meters.
        assert_eq!(analysis.circles[0].radius_m, 500.0);
    }

    #[test]
    fn test_symmetric_pair_close_together() {
        // Two equal sites about 222 meters either side of the origin.
        let sites = [site(1, 0.0, -0.002, 10), site(2, 0.0, 0.002, 10)];

        let analysis = StopAnalysis::from_sites(&sites);

        assert_eq!(analysis.best_point, Coord { lat: 0.0, lon: 0.0 });
        assert_eq!(analysis.total, 2);
        assert_eq!(analysis.covered, 2);
    }

    #[test]
    fn test_symmetric_pair_spread_apart() {
        // Same setup, but about 1,112 meters either side, beyond the 500 meter circles.
        let sites = [site(1, 0.0, -0.01, 10), site(2, 0.0, 0.01, 10)];

        let analysis = StopAnalysis::from_sites(&sites);

        assert_eq!(analysis.best_point, Coord { lat: 0.0, lon: 0.0 });
        assert_eq!(analysis.total, 2);
        assert_eq!(analysis.covered, 0);
    }

    #[test]
    fn test_centroid_and_radii_follow_the_weights() {
        let sites = [site(1, 0.0, 0.0, 1), site(2, 2.0, 0.0, 3)];

        let analysis = StopAnalysis::from_sites(&sites);

        // Pulled three quarters of the way toward the heavier site.
        assert_eq!(analysis.best_point, Coord { lat: 1.5, lon: 0.0 });

        // Average weight is 2, so the radii are 250 + 250 * (1/2) and 250 + 250 * (3/2).
        assert_eq!(analysis.circles[0].radius_m, 375.0);
        assert_eq!(analysis.circles[1].radius_m, 625.0);

        assert_eq!(analysis.covered, 0);
    }

    #[test]
    fn test_zero_population_counts_as_one() {
        let flat = [site(1, 0.0, -0.002, 0), site(2, 0.0, 0.002, 0)];
        let ones = [site(1, 0.0, -0.002, 1), site(2, 0.0, 0.002, 1)];

        assert_eq!(
            StopAnalysis::from_sites(&flat),
            StopAnalysis::from_sites(&ones)
        );
    }

    #[test]
    fn test_unlocatable_sites_are_skipped_and_order_is_kept() {
        let sites = [
            site(1, 10.0, 20.0, 4),
            site(2, f64::NAN, 5.0, 100),
            site(3, 30.0, 40.0, 4),
        ];

        let analysis = StopAnalysis::from_sites(&sites);

        // The enormous population on the unplaced site must not move the centroid.
        assert_eq!(
            analysis.best_point,
            Coord {
                lat: 20.0,
                lon: 30.0
            }
        );
        assert_eq!(analysis.total, 2);
        assert_eq!(analysis.circles.len(), 2);

        // Circles line up with the surviving sites in input order.
        assert_eq!(
            analysis.circles[0].center,
            Coord {
                lat: 10.0,
                lon: 20.0
            }
        );
        assert_eq!(
            analysis.circles[1].center,
            Coord {
                lat: 30.0,
                lon: 40.0
            }
        );
    }

    #[test]
    fn test_repeat_runs_are_identical() {
        let sites = [
            site(1, 43.6511, 51.1722, 120),
            site(2, 43.6601, 51.1831, 45),
            site(3, 43.6422, 51.1605, 0),
        ];

        let first = StopAnalysis::from_sites(&sites);
        let second = StopAnalysis::from_sites(&sites);

        assert_eq!(first, second);
    }

    #[test]
    fn test_efficiency_rounds_to_whole_percent() {
        let mut analysis = StopAnalysis::from_sites(&[]);
        assert_eq!(analysis.efficiency_percent(), 0);

        analysis.covered = 3;
        analysis.total = 4;
        assert_eq!(analysis.efficiency_percent(), 75);

        analysis.covered = 2;
        analysis.total = 3;
        assert_eq!(analysis.efficiency_percent(), 67);
    }
}
