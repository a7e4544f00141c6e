//! Pre-computed Sun and Moon longitudes.
//!
//! The table is plain text, one sample per line: the instant as a Julian
//! date (UT), then the tropical longitudes of the Sun and the Moon in
//! degrees, separated by whitespace. Blank lines and lines starting with `#`
//! are skipped. Samples must be strictly ascending in time; positions in
//! between are interpolated linearly.

use std::fmt;
use std::num::ParseFloatError;
use std::path::Path;

use super::{EphemerisError, EphemerisProvider, InitError, ObserverLocation, Positions, normalize_degrees};
use crate::time_scales::Ut;

#[derive(Debug, Copy, Clone, PartialEq)]
struct Sample {
    jd: f64,
    sun: f64,
    moon: f64,
}

/// Longitudes read from a table file.
///
/// The table is assumed to be already topocentric for the configured
/// observer, so the observer is ignored at lookup time.
#[derive(Debug, Clone)]
pub struct TabulatedEphemeris {
    samples: Vec<Sample>,
}

impl TabulatedEphemeris {
    /// Reads and parses the table at `path`.
    pub fn open(path: &Path) -> Result<Self, InitError> {
        let raw = std::fs::read_to_string(path).map_err(|source| InitError::Io {
            path: path.to_owned(),
            source,
        })?;
        let table = Self::parse(&raw)?;
        log::info!(
            "loaded {} ephemeris samples from {}",
            table.samples.len(),
            path.display()
        );
        Ok(table)
    }

    /// Parses table text.
    ///
    /// # Example
    ///
    /// ```
    /// use seva_calendar::astro::TabulatedEphemeris;
    ///
    /// let table = TabulatedEphemeris::parse("# jd sun moon\n2461042.5 280.0 10.0\n2461043.5 281.0 23.0\n").unwrap();
    /// assert_eq!(Some((2461042.5, 2461043.5)), table.range());
    /// assert!(TabulatedEphemeris::parse("2461042.5 280.0\n").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, RawDataError> {
        let mut samples: Vec<Sample> = Vec::new();
        for (line_num, line) in (1usize..).zip(raw.lines()) {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut it = line.split_whitespace();
            let jd = require_next_f64(&mut it, line_num, 1)?;
            let sun = require_next_f64(&mut it, line_num, 2)?;
            let moon = require_next_f64(&mut it, line_num, 3)?;
            if samples.last().is_some_and(|prev| prev.jd >= jd) {
                return Err(RawDataError::new(line_num, 1, ErrorType::NotAscending));
            }
            samples.push(Sample {
                jd,
                sun: normalize_degrees(sun),
                moon: normalize_degrees(moon),
            });
        }
        if samples.is_empty() {
            return Err(RawDataError::new(0, 0, ErrorType::Empty));
        }
        Ok(Self { samples })
    }

    /// First and last tabulated instants.
    pub fn range(&self) -> Option<(f64, f64)> {
        Some((self.samples.first()?.jd, self.samples.last()?.jd))
    }
}

impl EphemerisProvider for TabulatedEphemeris {
    fn positions(
        &self,
        instant: Ut,
        _observer: &ObserverLocation,
    ) -> Result<Positions, EphemerisError> {
        let jd = instant.0;
        let out_of_range = || {
            let (first, last) = self.range().unwrap_or((f64::NAN, f64::NAN));
            EphemerisError::OutOfRange { jd, first, last }
        };
        let i = self.samples.partition_point(|s| s.jd <= jd);
        if i == 0 {
            return Err(out_of_range());
        }
        let a = self.samples[i - 1];
        if a.jd == jd {
            return Ok(Positions {
                sun: a.sun,
                moon: a.moon,
            });
        }
        let b = self.samples.get(i).ok_or_else(out_of_range)?;
        let frac = (jd - a.jd) / (b.jd - a.jd);
        Ok(Positions {
            sun: interpolate_angle(a.sun, b.sun, frac),
            moon: interpolate_angle(a.moon, b.moon, frac),
        })
    }
}

/// Linear interpolation along the shorter arc, so 359° → 1° passes 0°.
fn interpolate_angle(from: f64, to: f64, frac: f64) -> f64 {
    let delta = (to - from + 540.0).rem_euclid(360.0) - 180.0;
    normalize_degrees(from + delta * frac)
}

fn require_next_f64<'a, I: Iterator<Item = &'a str>>(
    it: &mut I,
    line_num: usize,
    field_num: usize,
) -> Result<f64, RawDataError> {
    use ErrorType::*;
    it.next()
        .ok_or_else(|| RawDataError::new(line_num, field_num, MissingField))?
        .parse()
        .map_err(|e| RawDataError::new(line_num, field_num, InvalidFloat(e)))
}

/// Where and why a table failed to parse.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDataError {
    pub line_num: usize,
    pub field_num: usize,
    pub reason: ErrorType,
}

impl RawDataError {
    fn new(line_num: usize, field_num: usize, reason: ErrorType) -> Self {
        Self {
            line_num,
            field_num,
            reason,
        }
    }
}

impl fmt::Display for RawDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            ErrorType::Empty => write!(f, "no samples"),
            _ => write!(
                f,
                "line {}, field {}: {}",
                self.line_num, self.field_num, self.reason
            ),
        }
    }
}

impl std::error::Error for RawDataError {}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorType {
    InvalidFloat(ParseFloatError),
    MissingField,
    NotAscending,
    Empty,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorType::InvalidFloat(e) => write!(f, "invalid number ({e})"),
            ErrorType::MissingField => write!(f, "missing field"),
            ErrorType::NotAscending => write!(f, "time does not increase"),
            ErrorType::Empty => write!(f, "empty table"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# jd_ut sun moon
2461042.5  280.0  350.0

2461043.5  281.0    4.0
2461044.5  282.0   18.0
";

    #[test]
    fn interpolates_across_zero() {
        let table = TabulatedEphemeris::parse(SAMPLE).unwrap();
        let p = table
            .positions(Ut(2461043.0), &ObserverLocation::UDUPI)
            .unwrap();
        assert!((p.sun - 280.5).abs() < 1e-9);
        assert!((p.moon - 357.0).abs() < 1e-9);
        let p = table
            .positions(Ut(2461043.5), &ObserverLocation::UDUPI)
            .unwrap();
        assert_eq!(4.0, p.moon);
    }

    #[test]
    fn out_of_range() {
        let table = TabulatedEphemeris::parse(SAMPLE).unwrap();
        for jd in [2461042.0, 2461045.0] {
            let err = table
                .positions(Ut(jd), &ObserverLocation::UDUPI)
                .unwrap_err();
            assert_eq!(
                EphemerisError::OutOfRange {
                    jd,
                    first: 2461042.5,
                    last: 2461044.5
                },
                err
            );
        }
        assert!(table.positions(Ut(2461044.5), &ObserverLocation::UDUPI).is_ok());
    }

    #[test]
    fn parse_errors() {
        let err = TabulatedEphemeris::parse("2461042.5 280.0\n").unwrap_err();
        assert_eq!((1, 3, ErrorType::MissingField), (err.line_num, err.field_num, err.reason));
        let err = TabulatedEphemeris::parse("2461042.5 280.0 1.0\n2461042.5 281.0 2.0\n").unwrap_err();
        assert_eq!((2, ErrorType::NotAscending), (err.line_num, err.reason));
        let err = TabulatedEphemeris::parse("# nothing\n").unwrap_err();
        assert_eq!(ErrorType::Empty, err.reason);
        let err = TabulatedEphemeris::parse("2461042.5 north 1.0\n").unwrap_err();
        assert!(matches!(err.reason, ErrorType::InvalidFloat(_)));
        assert!(err.to_string().starts_with("line 1, field 2"));
    }
}
