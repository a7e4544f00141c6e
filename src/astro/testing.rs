//! A sky with uniformly moving Sun and Moon, for exact expectations in tests.

use super::{EphemerisError, EphemerisProvider, ObserverLocation, Positions, normalize_degrees};
use crate::time_scales::Ut;

/// Sun and Moon move linearly from their longitudes at `epoch`.
///
/// With the default rates a tithi lasts exactly one day and a lunar month
/// thirty, while the Sun keeps its real pace.
#[derive(Debug, Copy, Clone)]
pub struct LinearSky {
    pub epoch: f64,
    pub sun_at_epoch: f64,
    pub moon_at_epoch: f64,
    pub sun_rate: f64,
    pub moon_rate: f64,
    /// positions are unavailable outside `epoch ± span` days
    pub span: f64,
}

impl LinearSky {
    /// Conjunction at `epoch` with the Sun at tropical `sun_at_epoch`.
    pub fn new_moon_at(epoch: f64, sun_at_epoch: f64) -> Self {
        let sun_rate = 360.0 / 365.25;
        Self {
            epoch,
            sun_at_epoch,
            moon_at_epoch: sun_at_epoch,
            sun_rate,
            moon_rate: sun_rate + 12.0,
            span: 1000.0,
        }
    }
}

impl EphemerisProvider for LinearSky {
    fn positions(
        &self,
        instant: Ut,
        _observer: &ObserverLocation,
    ) -> Result<Positions, EphemerisError> {
        let dt = instant.0 - self.epoch;
        if dt.abs() > self.span {
            return Err(EphemerisError::OutOfRange {
                jd: instant.0,
                first: self.epoch - self.span,
                last: self.epoch + self.span,
            });
        }
        Ok(Positions {
            sun: normalize_degrees(self.sun_at_epoch + self.sun_rate * dt),
            moon: normalize_degrees(self.moon_at_epoch + self.moon_rate * dt),
        })
    }
}
