//! Run-wide settings, read from a TOML file.
//!
//! Every field has a default, so an empty file (or none at all) gives the
//! standard Udupi setup.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::astro::{Ayanamsa, EphemerisSource, ObserverLocation};
use crate::panchanga::SamplingClock;
use crate::search::{NegativeWindow, WindowConfig};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Windows(#[from] NegativeWindow),
}

/// Local hours at which the sky is sampled.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Sampling {
    pub sunrise_hour: f64,
    pub midnight_hour: f64,
    /// When the lunar month of a day is decided.
    pub reference_hour: f64,
}

impl Default for Sampling {
    fn default() -> Self {
        let clock = SamplingClock::default();
        Self {
            sunrise_hour: clock.sunrise_hour,
            midnight_hour: clock.midnight_hour,
            reference_hour: clock.reference_hour,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Degrees; the same for every instant.
    pub ayanamsa: f64,
    pub observer: ObserverLocation,
    /// Minutes east of UTC.
    pub timezone_offset_minutes: i32,
    pub sampling: Sampling,
    pub windows: WindowConfig,
    pub ephemeris: EphemerisSource,
    /// A JSON rule table used instead of the built-in one.
    pub festival_rules: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ayanamsa: Ayanamsa::DEFAULT.0,
            observer: ObserverLocation::default(),
            timezone_offset_minutes: SamplingClock::default().timezone_offset_minutes,
            sampling: Sampling::default(),
            windows: WindowConfig::default(),
            ephemeris: EphemerisSource::default(),
            festival_rules: None,
        }
    }
}

impl Config {
    /// Reads a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config: Config = raw.parse()?;
        log::debug!("loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    pub fn ayanamsa(&self) -> Ayanamsa {
        Ayanamsa(self.ayanamsa)
    }

    pub fn clock(&self) -> SamplingClock {
        SamplingClock {
            timezone_offset_minutes: self.timezone_offset_minutes,
            sunrise_hour: self.sampling.sunrise_hour,
            midnight_hour: self.sampling.midnight_hour,
            reference_hour: self.sampling.reference_hour,
        }
    }
}

impl std::str::FromStr for Config {
    type Err = ConfigError;

    /// # Example
    ///
    /// ```
    /// use seva_calendar::config::Config;
    ///
    /// let config: Config = "ayanamsa = 23.9\n[windows]\nlunar_steps = 90\n".parse().unwrap();
    /// assert_eq!(23.9, config.ayanamsa);
    /// assert_eq!(90, config.windows.lunar_steps);
    /// assert_eq!(60, config.windows.solar_steps);
    /// ```
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(raw)?;
        config.windows.validate()?;
        Ok(config)
    }
}
