use clap::Parser;
use geostop::{GeoStopResult, SiteList};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::{
    fmt::{self, Display},
    path::PathBuf,
    str::FromStr,
};
use strum::IntoEnumIterator;

/*-------------------------------------------------------------------------------------------------
 *                               Parse Command Line Arguments
 *-----------------------------------------------------------------------------------------------*/
///
/// Find the optimal stop location for a list of sites.
///
/// This program loads a site file, computes the population weighted best stop and the coverage
/// circle around every site, and reports how many sites the stop ends up covering.
///
#[derive(Debug, Parser)]
#[clap(bin_name = "findstop")]
#[clap(author, version, about)]
struct FindStopOptionsInit {
    /// The path to the sites file.
    ///
    /// If this is not specified, then the program will check for it in the "SITES_FILE"
    /// environment variable.
    #[clap(short, long)]
    #[clap(env = "SITES_FILE")]
    sites_file: PathBuf,

    /// The output format, either "text" or "json".
    #[clap(short, long)]
    #[clap(parse(try_from_str=parse_format))]
    #[clap(default_value_t=OutputFormat::Text)]
    format: OutputFormat,

    /// Verbose output
    #[clap(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, strum::Display, strum::EnumIter, strum::EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
enum OutputFormat {
    /// An aligned, human readable report.
    Text,
    /// The full analysis as a JSON document.
    Json,
}

fn parse_format(format_str: &str) -> GeoStopResult<OutputFormat> {
    OutputFormat::from_str(format_str).map_err(|_| {
        let allowed: Vec<String> = OutputFormat::iter().map(|f| f.to_string()).collect();
        format!(
            "Argument is not a valid output format: {} (allowed: {})",
            format_str,
            allowed.join(", ")
        )
        .into()
    })
}

#[derive(Debug)]
struct FindStopOptionsChecked {
    /// The path to the sites file.
    sites_file: PathBuf,

    /// The output format.
    format: OutputFormat,

    /// Verbose output
    verbose: bool,
}

impl Display for FindStopOptionsChecked {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        writeln!(f, "\n")?; // yes, two blank lines.
        writeln!(f, "  Sites File: {}", self.sites_file.display())?;
        writeln!(f, "      Format: {}", self.format)?;
        writeln!(f, "\n")?; // yes, two blank lines.

        Ok(())
    }
}

/// Get the command line arguments and check them.
fn parse_args() -> GeoStopResult<FindStopOptionsChecked> {
    let FindStopOptionsInit {
        sites_file,
        format,
        verbose,
    } = FindStopOptionsInit::parse();

    Ok(FindStopOptionsChecked {
        sites_file,
        format,
        verbose,
    })
}

/*-------------------------------------------------------------------------------------------------
 *                                             MAIN
 *-----------------------------------------------------------------------------------------------*/
fn main() -> GeoStopResult<()> {
    let opts = parse_args()?;

    let level = if opts.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new().with_level(level).init()?;

    log::trace!("Trace messages enabled.");
    log::debug!("Debug messages enabled.");
    log::info!("Info messages enabled.");
    log::warn!("Warn messages enabled.");
    log::error!("Error messages enabled.");

    if opts.verbose {
        info!("{}", opts);
    }

    let sites = SiteList::load(&opts.sites_file)?;
    let analysis = sites.analyze();

    match opts.format {
        OutputFormat::Text => print!("{}", analysis),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
    }

    if analysis.total == 0 && !sites.is_empty() {
        log::warn!("");
        log::warn!("None of the {} sites have a usable location!", sites.len());
        log::warn!("");
    }

    Ok(())
}
