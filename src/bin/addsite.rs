use clap::Parser;
use geostop::{GeoStopResult, SiteList};
use log::info;
use simple_logger::SimpleLogger;
use std::{
    fmt::{self, Display},
    path::PathBuf,
};

/*-------------------------------------------------------------------------------------------------
 *                               Parse Command Line Arguments
 *-----------------------------------------------------------------------------------------------*/
///
/// Add a site to a sites file.
///
/// This program appends one site to a sites file, creating the file if it does not exist yet.
/// Coordinates are checked for range before anything is written, a bad number is an error and
/// never turns into a site at the origin.
///
#[derive(Debug, Parser)]
#[clap(bin_name = "addsite")]
#[clap(author, version, about)]
struct AddSiteOptionsInit {
    /// The path to the sites file.
    ///
    /// If this is not specified, then the program will check for it in the "SITES_FILE"
    /// environment variable.
    #[clap(short, long)]
    #[clap(env = "SITES_FILE")]
    sites_file: PathBuf,

    /// The latitude of the new site in degrees, -90.0 to 90.0.
    #[clap(parse(try_from_str=parse_latitude))]
    #[clap(allow_hyphen_values = true)]
    latitude: f64,

    /// The longitude of the new site in degrees, -180.0 to 180.0.
    #[clap(parse(try_from_str=parse_longitude))]
    #[clap(allow_hyphen_values = true)]
    longitude: f64,

    /// The population at the new site.
    #[clap(short, long)]
    population: Option<i32>,

    /// A display name for the new site.
    #[clap(short, long)]
    name: Option<String>,

    /// Verbose output
    #[clap(short, long)]
    verbose: bool,
}

/// Parse and range check a latitude argument.
fn parse_latitude(lat_str: &str) -> GeoStopResult<f64> {
    let lat: f64 = lat_str.parse()?;

    if !lat.is_finite() || lat < -90.0 || lat > 90.0 {
        return Err(format!("Latitude is out of range (-90.0 to 90.0): {}", lat_str).into());
    }

    Ok(lat)
}

/// Parse and range check a longitude argument.
fn parse_longitude(lon_str: &str) -> GeoStopResult<f64> {
    let lon: f64 = lon_str.parse()?;

    if !lon.is_finite() || lon < -180.0 || lon > 180.0 {
        return Err(format!("Longitude is out of range (-180.0 to 180.0): {}", lon_str).into());
    }

    Ok(lon)
}

#[derive(Debug)]
struct AddSiteOptionsChecked {
    /// The path to the sites file.
    sites_file: PathBuf,

    /// The latitude of the new site.
    latitude: f64,

    /// The longitude of the new site.
    longitude: f64,

    /// The population at the new site.
    population: Option<i32>,

    /// A display name for the new site.
    name: Option<String>,

    /// Verbose output
    verbose: bool,
}

impl Display for AddSiteOptionsChecked {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        writeln!(f, "\n")?; // yes, two blank lines.
        writeln!(f, "  Sites File: {}", self.sites_file.display())?;
        writeln!(f, "    Location: {:.6},{:.6}", self.latitude, self.longitude)?;
        writeln!(f, "  Population: {}", self.population.unwrap_or(0))?;
        writeln!(f, "\n")?; // yes, two blank lines.

        Ok(())
    }
}

/// Get the command line arguments and check them.
///
/// If there is missing data, try to fill it in with environment variables.
fn parse_args() -> GeoStopResult<AddSiteOptionsChecked> {
    let AddSiteOptionsInit {
        sites_file,
        latitude,
        longitude,
        population,
        name,
        verbose,
    } = AddSiteOptionsInit::parse();

    let checked = AddSiteOptionsChecked {
        sites_file,
        latitude,
        longitude,
        population,
        name,
        verbose,
    };

    if verbose {
        info!("{}", checked);
    }

    Ok(checked)
}

/*-------------------------------------------------------------------------------------------------
 *                                             MAIN
 *-----------------------------------------------------------------------------------------------*/
fn main() -> GeoStopResult<()> {
    SimpleLogger::new().init()?;

    let opts = parse_args()?;

    let mut sites = if opts.sites_file.exists() {
        SiteList::load(&opts.sites_file)?
    } else {
        SiteList::new()
    };

    let id = sites.add_at(opts.latitude, opts.longitude);

    if let Some(population) = opts.population {
        sites.set_population(id, population);
    }

    if let Some(name) = opts.name {
        sites.set_name(id, name);
    }

    sites.save(&opts.sites_file)?;

    if opts.verbose {
        if let Some(site) = sites.get(id) {
            info!(
                "Added {} (id {}) at {:.4},{:.4} - {} sites total",
                site.display_name(),
                site.id,
                site.lat,
                site.lon,
                sites.len()
            );
        }
    }

    Ok(())
}
