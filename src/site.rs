/*!
 * All the data related to a single weighted site.
 *
 * A Site is one user-placed point on the map: a location, a population figure, and a
 * display name. Sites are the raw input to the stop analysis.
 */
use crate::geo::Coord;

/**
 * Represents a single weighted point a stop should try to cover.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    /// Unique identifier within a site list. Assigned once, never reused.
    pub id: u64,
    /// Display name, if one was given.
    pub name: Option<String>,
    /// Latitude in degrees. `NaN` marks a site with no usable location.
    pub lat: f64,
    /// Longitude in degrees. `NaN` marks a site with no usable location.
    pub lon: f64,
    /// Population at this site. Kept exactly as entered, including zero and negatives.
    pub population: i32,
}

impl Site {
    /**
     * The weight this site carries in the analysis.
     *
     * Sites with no population recorded (or a nonsense negative one) still deserve a
     * stop nearby, so the weight never drops below one.
     */
    pub fn weight(&self) -> f64 {
        if self.population > 0 {
            f64::from(self.population)
        } else {
            1.0
        }
    }

    /**
     * The site's location, or `None` if either coordinate is not a finite number.
     */
    pub fn location(&self) -> Option<Coord> {
        if self.lat.is_finite() && self.lon.is_finite() {
            Some(Coord {
                lat: self.lat,
                lon: self.lon,
            })
        } else {
            None
        }
    }

    /**
     * The name to show for this site, falling back to the id when unnamed.
     */
    pub fn display_name(&self) -> String {
        match self.name {
            Some(ref name) => name.clone(),
            None => format!("Site #{}", self.id),
        }
    }
}
