//! Positions of the Sun and Moon.
//!
//! Everything astronomy-dependent in this crate goes through an
//! [`Ephemeris`] handle, which wraps an [`EphemerisProvider`] together with
//! the fixed observer location. Opening the handle is the only fallible
//! startup step; when it fails, callers keep working with the strategies
//! that need no astronomy.

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

use crate::time_scales::Ut;

pub mod analytic;
pub mod table;
#[cfg(test)]
pub(crate) mod testing;

pub use analytic::AnalyticEphemeris;
pub use table::TabulatedEphemeris;

/// Normalizes an angle to `[0, 360)` degrees.
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    // rem_euclid may return 360.0 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Where the sky is observed from. Fixed for the whole run.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObserverLocation {
    /// Geographic latitude in degrees, north positive.
    pub latitude: f64,
    /// Geographic longitude in degrees, east positive.
    pub longitude: f64,
}

impl ObserverLocation {
    /// Udupi, on the Karnataka coast.
    pub const UDUPI: ObserverLocation = ObserverLocation {
        latitude: 13.3409,
        longitude: 74.7421,
    };

    fn validate(&self) -> Result<(), InitError> {
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude)
        {
            return Err(InitError::InvalidObserver(*self));
        }
        Ok(())
    }
}

impl Default for ObserverLocation {
    fn default() -> Self {
        Self::UDUPI
    }
}

/// The constant offset between the tropical and the sidereal zodiac.
///
/// Real sidereal frames drift by about 50″ a year; this one deliberately
/// does not, so one value applies to every instant of a run.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ayanamsa(pub f64);

impl Ayanamsa {
    pub const DEFAULT: Ayanamsa = Ayanamsa(24.1);

    /// Converts a tropical longitude into a sidereal one.
    ///
    /// # Example
    ///
    /// ```
    /// use seva_calendar::astro::Ayanamsa;
    ///
    /// let ayanamsa = Ayanamsa(24.1);
    /// assert!((ayanamsa.sidereal(30.0) - 5.9).abs() < 1e-9);
    /// assert!((ayanamsa.sidereal(10.0) - 345.9).abs() < 1e-9);
    /// ```
    pub fn sidereal(&self, tropical_lon: f64) -> f64 {
        normalize_degrees(tropical_lon - self.0)
    }
}

impl Default for Ayanamsa {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Apparent tropical ecliptic longitudes, in degrees within `[0, 360)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Positions {
    pub sun: f64,
    pub moon: f64,
}

/// A source of Sun and Moon positions.
pub trait EphemerisProvider: fmt::Debug + Send + Sync {
    /// Positions at `instant` as seen from `observer`, in the tropical frame.
    fn positions(
        &self,
        instant: Ut,
        observer: &ObserverLocation,
    ) -> Result<Positions, EphemerisError>;
}

/// Failure of a provider to produce positions for a given instant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EphemerisError {
    #[error("instant JD {jd} is outside the ephemeris range {first}..={last}")]
    OutOfRange { jd: f64, first: f64, last: f64 },
}

/// Failure to bring up the ephemeris backend.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("observer location {0:?} is out of range")]
    InvalidObserver(ObserverLocation),
    #[error("could not read ephemeris table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed ephemeris table: {0}")]
    Table(#[from] table::RawDataError),
}

/// Which backend to open.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum EphemerisSource {
    /// The built-in Sun and Moon theory.
    #[default]
    Analytic,
    /// A table of pre-computed longitudes.
    Table { path: PathBuf },
}

/// The process-wide handle every astronomy-dependent component borrows.
#[derive(Debug)]
pub struct Ephemeris {
    provider: Box<dyn EphemerisProvider>,
    observer: ObserverLocation,
}

impl Ephemeris {
    /// Opens the configured backend.
    ///
    /// # Example
    ///
    /// ```
    /// use seva_calendar::astro::{Ephemeris, EphemerisSource, ObserverLocation};
    ///
    /// let eph = Ephemeris::open(&EphemerisSource::Analytic, ObserverLocation::UDUPI).unwrap();
    /// assert_eq!(ObserverLocation::UDUPI, eph.observer());
    ///
    /// let bad = ObserverLocation { latitude: 120.0, longitude: 0.0 };
    /// assert!(Ephemeris::open(&EphemerisSource::Analytic, bad).is_err());
    /// ```
    pub fn open(source: &EphemerisSource, observer: ObserverLocation) -> Result<Self, InitError> {
        observer.validate()?;
        let provider: Box<dyn EphemerisProvider> = match source {
            EphemerisSource::Analytic => Box::new(AnalyticEphemeris),
            EphemerisSource::Table { path } => Box::new(TabulatedEphemeris::open(path)?),
        };
        log::debug!("ephemeris opened: {source:?} at {observer:?}");
        Ok(Self { provider, observer })
    }

    /// Wraps an arbitrary provider.
    pub fn with_provider(
        provider: Box<dyn EphemerisProvider>,
        observer: ObserverLocation,
    ) -> Result<Self, InitError> {
        observer.validate()?;
        Ok(Self { provider, observer })
    }

    pub fn observer(&self) -> ObserverLocation {
        self.observer
    }

    /// Sun and Moon positions at `instant`.
    pub fn positions(&self, instant: Ut) -> Result<Positions, EphemerisError> {
        self.provider.positions(instant, &self.observer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidereal_correction_wraps() {
        let ayanamsa = Ayanamsa(24.1);
        for lon in [0.0, 12.5, 24.1, 90.0, 200.0, 359.999] {
            let expected = (lon - 24.1f64).rem_euclid(360.0);
            let got = ayanamsa.sidereal(lon);
            assert!((got - expected).abs() < 1e-9, "{lon}: {got} vs {expected}");
            assert!((0.0..360.0).contains(&got));
        }
        assert_eq!(0.0, ayanamsa.sidereal(24.1));
    }

    #[test]
    fn normalize() {
        assert_eq!(10.0, normalize_degrees(370.0));
        assert_eq!(350.0, normalize_degrees(-10.0));
        assert_eq!(0.0, normalize_degrees(-1e-20));
    }

    #[test]
    fn source_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            ephemeris: EphemerisSource,
        }
        let w: Wrapper = toml::from_str("[ephemeris]\nsource = \"analytic\"\n").unwrap();
        assert_eq!(EphemerisSource::Analytic, w.ephemeris);
        let w: Wrapper =
            toml::from_str("[ephemeris]\nsource = \"table\"\npath = \"sky.txt\"\n").unwrap();
        assert_eq!(
            EphemerisSource::Table {
                path: PathBuf::from("sky.txt")
            },
            w.ephemeris
        );
    }

    #[test]
    fn missing_table_is_init_error() {
        let source = EphemerisSource::Table {
            path: PathBuf::from("/nonexistent/sky.txt"),
        };
        let err = Ephemeris::open(&source, ObserverLocation::UDUPI).unwrap_err();
        assert!(matches!(err, InitError::Io { .. }));
    }
}
