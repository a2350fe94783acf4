/*!
 * An owned, id-unique collection of sites.
 *
 * This is the mutable working set the command line tools edit and analyze. It also owns
 * the JSON file format the tools pass between each other, so everything about parsing
 * site files lives here and the rest of the crate only ever sees fully formed [Site]
 * values.
 */
use crate::{error::GeoStopResult, site::Site, stop::StopAnalysis};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/**
 * A list of sites with unique ids.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct SiteList {
    sites: Vec<Site>,
    /// The id the next inserted site will receive.
    next_id: u64,
}

impl Default for SiteList {
    fn default() -> Self {
        Self::new()
    }
}

/// On-disk form of a single site.
///
/// Every field except the population is optional. A missing or `null` coordinate loads
/// as the `NaN` sentinel on the [Site], it is never quietly turned into zero. A value of
/// the wrong type is a load error.
#[derive(Debug, Serialize, Deserialize)]
struct SiteRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lon: Option<f64>,
    #[serde(default)]
    population: i32,
}

impl SiteList {
    /// Create a new, empty list.
    pub fn new() -> Self {
        SiteList {
            sites: vec![],
            next_id: 1,
        }
    }

    /**
     * Add a site at the given location, the way a click on the map does.
     *
     * Coordinates are rounded to 4 decimal places, roughly 11 meters, which is plenty
     * for picking a spot by eye. The new site starts with population 0 and an automatic
     * "Site #n" name.
     *
     * #Returns
     * The id of the new site.
     */
    pub fn add_at(&mut self, lat: f64, lon: f64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        let name = format!("Site #{}", self.sites.len() + 1);

        self.sites.push(Site {
            id,
            name: Some(name),
            lat: round4(lat),
            lon: round4(lon),
            population: 0,
        });

        id
    }

    /// Rename a site. Returns false if no site has that id.
    pub fn set_name(&mut self, id: u64, name: String) -> bool {
        match self.find_mut(id) {
            Some(site) => {
                site.name = Some(name);
                true
            }
            None => false,
        }
    }

    /// Move a site to an exact location. Unlike [SiteList::add_at] nothing is rounded.
    /// Returns false if no site has that id.
    pub fn set_location(&mut self, id: u64, lat: f64, lon: f64) -> bool {
        match self.find_mut(id) {
            Some(site) => {
                site.lat = lat;
                site.lon = lon;
                true
            }
            None => false,
        }
    }

    /// Set the population of a site. Returns false if no site has that id.
    pub fn set_population(&mut self, id: u64, population: i32) -> bool {
        match self.find_mut(id) {
            Some(site) => {
                site.population = population;
                true
            }
            None => false,
        }
    }

    /// Remove a site from the list. Returns false if no site has that id.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.sites.len();
        self.sites.retain(|site| site.id != id);
        self.sites.len() < before
    }

    /// Get a site by id.
    pub fn get(&self, id: u64) -> Option<&Site> {
        self.sites.iter().find(|site| site.id == id)
    }

    /// Get the sites in insertion order.
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Get the number of sites in the list.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Check if this list is empty.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Place a stop for the sites currently in the list.
    pub fn analyze(&self) -> StopAnalysis {
        StopAnalysis::from_sites(&self.sites)
    }

    /**
     * Parse a site list from JSON text.
     *
     * Records missing an id are assigned fresh ids above the largest one present. A
     * duplicated id is an error.
     */
    pub fn from_json(text: &str) -> GeoStopResult<Self> {
        let records: Vec<SiteRecord> = serde_json::from_str(text)?;

        let mut seen = FxHashSet::default();
        let mut next_id = 1;
        for record in &records {
            if let Some(id) = record.id {
                if !seen.insert(id) {
                    return Err(format!("duplicate site id {} in site list", id).into());
                }
                next_id = next_id.max(id.saturating_add(1));
            }
        }

        let mut sites = Vec::with_capacity(records.len());
        for record in records {
            let id = match record.id {
                Some(id) => id,
                None => {
                    let id = next_id;
                    next_id += 1;
                    id
                }
            };

            let site = Site {
                id,
                name: record.name,
                lat: record.lat.unwrap_or(f64::NAN),
                lon: record.lon.unwrap_or(f64::NAN),
                population: record.population,
            };

            if site.location().is_none() {
                log::warn!("{} has no usable location", site.display_name());
            }

            sites.push(site);
        }

        Ok(SiteList { sites, next_id })
    }

    /// Render the list as pretty printed JSON.
    pub fn to_json(&self) -> GeoStopResult<String> {
        let records: Vec<SiteRecord> = self.sites.iter().map(SiteRecord::from_site).collect();
        Ok(serde_json::to_string_pretty(&records)?)
    }

    /// Load a site list from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> GeoStopResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let list = Self::from_json(&text)?;

        log::debug!("loaded {} sites from {}", list.len(), path.display());

        Ok(list)
    }

    /// Save the list to a JSON file, replacing whatever was there.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> GeoStopResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;

        log::debug!("saved {} sites to {}", self.len(), path.display());

        Ok(())
    }

    fn find_mut(&mut self, id: u64) -> Option<&mut Site> {
        self.sites.iter_mut().find(|site| site.id == id)
    }
}

impl SiteRecord {
    fn from_site(site: &Site) -> Self {
        let keep_finite = |v: f64| if v.is_finite() { Some(v) } else { None };

        SiteRecord {
            id: Some(site.id),
            name: site.name.clone(),
            lat: keep_finite(site.lat),
            lon: keep_finite(site.lon),
            population: site.population,
        }
    }
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}
