use std::{
    error::Error,
    fmt::{Display, Formatter},
};

/// Result type for fallible operations in this crate.
///
/// The error must be `Send + Sync` so these results can come back from
/// command line argument parsers, which hand their errors to clap.
pub type GeoStopResult<T> = Result<T, Box<dyn Error + Send + Sync + 'static>>;

#[derive(Debug, Clone, Copy)]
pub struct GeoStopError {
    pub msg: &'static str,
}

impl Display for GeoStopError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.msg)
    }
}

impl Error for GeoStopError {}

#[cfg(test)]
mod test {
    use super::*;

    // Same bound clap places on the error type of a try_from_str parser.
    fn accepts_validator_error<T, E>(res: Result<T, E>) -> bool
    where
        E: Into<Box<dyn Error + Send + Sync + 'static>>,
    {
        res.is_ok()
    }

    #[test]
    fn test_errors_satisfy_clap_validator_bounds() {
        let good: GeoStopResult<f64> = Ok(1.0);
        assert!(accepts_validator_error(good));

        let bad: GeoStopResult<f64> = Err(GeoStopError {
            msg: "value out of range",
        }
        .into());
        assert!(!accepts_validator_error(bad));
    }
}
