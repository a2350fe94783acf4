use chrono::Utc;
use clap::Parser;
use geostop::{GeoStopError, GeoStopResult, KmlFile, KmlWriter, SiteList};
use log::info;
use simple_logger::SimpleLogger;
use std::{
    fmt::{self, Display, Write},
    path::PathBuf,
};

/*-------------------------------------------------------------------------------------------------
 *                               Parse Command Line Arguments
 *-----------------------------------------------------------------------------------------------*/
///
/// Export a stop analysis into a KML file.
///
/// This program will place the best stop for a site file and export the result as KML: one
/// polygon per coverage circle and a placemark at the best stop location.
///
#[derive(Debug, Parser)]
#[clap(bin_name = "showstop")]
#[clap(author, version, about)]
struct ShowStopOptionsInit {
    /// The path to the sites file.
    ///
    /// If this is not specified, then the program will check for it in the "SITES_FILE"
    /// environment variable.
    #[clap(short, long)]
    #[clap(env = "SITES_FILE")]
    sites_file: PathBuf,

    /// The path to a KML file to produce from this run.
    ///
    /// If this is not specified, then the program will create one automatically by replacing the
    /// file extension on the sites_file with "*.kml".
    #[clap(short, long)]
    kml_file: Option<PathBuf>,

    /// Verbose output
    #[clap(short, long)]
    verbose: bool,
}

#[derive(Debug)]
struct ShowStopOptionsChecked {
    /// The path to the sites file.
    sites_file: PathBuf,

    /// The path to a KML file to produce from this run.
    kml_file: PathBuf,

    /// Verbose output
    verbose: bool,
}

impl Display for ShowStopOptionsChecked {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        writeln!(f, "\n")?; // yes, two blank lines.
        writeln!(f, "  Sites File: {}", self.sites_file.display())?;
        writeln!(f, "  Output KML: {}", self.kml_file.display())?;
        writeln!(f, "\n")?; // yes, two blank lines.

        Ok(())
    }
}

/// Get the command line arguments and check them.
///
/// If there is missing data, try to fill it in with environment variables.
fn parse_args() -> GeoStopResult<ShowStopOptionsChecked> {
    let ShowStopOptionsInit {
        sites_file,
        kml_file,
        verbose,
    } = ShowStopOptionsInit::parse();

    let kml_file = match kml_file {
        Some(v) => v,
        None => {
            let mut clone = sites_file.clone();
            clone.set_extension("kml");
            clone
        }
    };

    let checked = ShowStopOptionsChecked {
        sites_file,
        kml_file,
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

    let sites = SiteList::load(&opts.sites_file)?;
    let analysis = sites.analyze();

    if analysis.total == 0 {
        return Err(GeoStopError {
            msg: "no sites with a usable location to export",
        }
        .into());
    }

    let mut kfile = KmlFile::new(&opts.kml_file)?;

    kfile.start_style(Some("coverage"))?;
    kfile.create_poly_style(Some("4dff7800"), true, true)?;
    kfile.finish_style()?;

    kfile.start_style(Some("stop"))?;
    kfile.create_icon_style(
        Some("http://maps.google.com/mapfiles/kml/shapes/bus.png"),
        1.3,
    )?;
    kfile.finish_style()?;

    let mut description = String::with_capacity(256);
    let _ = write!(
        &mut description,
        concat!("Sites covered: {} of {}<br/>", "Efficiency: {}%<br/>"),
        analysis.covered,
        analysis.total,
        analysis.efficiency_percent()
    );

    kfile.start_placemark(Some("Best Stop"), Some(&description), Some("#stop"))?;
    kfile.timestamp(Utc::now())?;
    kfile.create_point(analysis.best_point, 0.0)?;
    kfile.finish_placemark()?;

    kfile.start_folder(Some("Coverage"), None, true)?;

    let mut name = String::with_capacity(32);
    let located = sites.sites().iter().filter(|s| s.location().is_some());
    for (site, circle) in located.zip(analysis.circles.iter()) {
        name.clear();
        let _ = write!(&mut name, "{}", site.display_name());

        description.clear();
        let _ = write!(
            &mut description,
            concat!(
                "Population: {}<br/>",
                "Radius: {:.0} m<br/>",
                "Location: {:.4},{:.4}<br/>",
            ),
            site.population,
            circle.radius_m,
            circle.center.lat,
            circle.center.lon
        );

        kfile.start_placemark(Some(&name), Some(&description), Some("#coverage"))?;
        circle.kml_write(&mut kfile)?;
        kfile.finish_placemark()?;
    }

    kfile.finish_folder()?;

    if opts.verbose {
        info!(
            "Exported {} coverage circles to {}",
            analysis.circles.len(),
            opts.kml_file.display()
        );
    }

    Ok(())
}
