pub use error::{GeoStopError, GeoStopResult};
pub use geo::{circle_ring, destination, great_circle_distance, Coord, EARTH_RADIUS_M};
pub use kml::{KmlFile, KmlWriter};
pub use site::Site;
pub use site_list::SiteList;
pub use stop::{CoverageCircle, StopAnalysis, BASE_RADIUS_M, COVERAGE_SLACK_M, POPULATION_BONUS_M};

/**************************************************************************************************
 * Private Implementation
 *************************************************************************************************/
mod error;
mod geo;
mod kml;
mod site;
mod site_list;
mod stop;
