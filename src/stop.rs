/*!
 * Types and functions for placing a stop.
 *
 * The analysis takes a list of weighted sites, finds the population-weighted centroid as
 * the best stop location, and sizes a coverage circle around each site.
 */

pub use analysis::StopAnalysis;
pub use circle::{CoverageCircle, BASE_RADIUS_M, COVERAGE_SLACK_M, POPULATION_BONUS_M};

mod analysis;
mod circle;
