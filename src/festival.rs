//! Festivals defined by calendar rules.
//!
//! A rule table maps festival names to the calendar condition that fixes
//! their day. The table is JSON:
//!
//! ```json
//! {
//!   "ಗಣೇಶ ಚತುರ್ಥಿ": { "type": "lunar", "month": 6, "paksha": "Shukla", "tithi": 4 },
//!   "ಓಣಂ": { "type": "solar", "month": 5, "star": 22 }
//! }
//! ```
//!
//! Each `type` needs its own fields:
//!
//! | `type`          | fields                                       |
//! |-----------------|----------------------------------------------|
//! | `lunar`         | `month`, `tithi`, `paksha`¹, `time` (opt.)   |
//! | `lunar_star`    | `month`, `star`                              |
//! | `lunar_weekday` | `month`, `tithi_max`, `weekday`, `paksha`¹   |
//! | `solar_start`   | `month`                                      |
//! | `solar`         | `month`, `star`                              |
//!
//! ¹ not needed for tithi 15 (full moon) or 30 (new moon).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;

use crate::date::{Date, Weekday};
use crate::error::ResolveError;
use crate::panchanga::Observation;
use crate::query::{Paksha, Tithi, normalize};
use crate::search::{SearchEngine, SolarEvent};

static BUILTIN_RULES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/festivals.json"));

lazy_static::lazy_static! {
    static ref TRAILING_NUMBER: Regex = Regex::new(r"\s*\d+$").expect("valid regex");
}

/// Failure to load a rule table.
#[derive(Debug, thiserror::Error)]
pub enum FestivalError {
    #[error("could not read festival rules {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed festival rules: {0}")]
    Json(#[from] serde_json::Error),
    #[error("festival rule {name:?} of type `{kind}` lacks field `{field}`")]
    MissingField {
        name: String,
        kind: &'static str,
        field: &'static str,
    },
    #[error("festival rule {name:?}: `{field}` is out of range")]
    InvalidField { name: String, field: &'static str },
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RuleType {
    Lunar,
    LunarStar,
    LunarWeekday,
    SolarStart,
    Solar,
}

impl RuleType {
    fn name(self) -> &'static str {
        match self {
            RuleType::Lunar => "lunar",
            RuleType::LunarStar => "lunar_star",
            RuleType::LunarWeekday => "lunar_weekday",
            RuleType::SolarStart => "solar_start",
            RuleType::Solar => "solar",
        }
    }
}

/// A rule as stored, before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRule {
    #[serde(rename = "type")]
    kind: RuleType,
    month: Option<u8>,
    paksha: Option<Paksha>,
    tithi: Option<u8>,
    star: Option<u8>,
    time: Option<Observation>,
    weekday: Option<Weekday>,
    tithi_max: Option<u8>,
}

/// The condition fixing a festival's day.
#[derive(Debug, Clone, PartialEq)]
pub enum FestivalRule {
    /// A tithi of a lunar month, read at `observation`.
    Lunar {
        month: u8,
        tithi: Tithi,
        observation: Observation,
    },
    /// The day of a lunar month the Moon is in `star`.
    LunarStar { month: u8, star: u8 },
    /// The nearest `weekday` on or before a tithi of a lunar month.
    LunarWeekday {
        month: u8,
        tithi: Tithi,
        weekday: Weekday,
    },
    /// The first day of a solar month.
    SolarStart { month: u8 },
    /// The day of a solar month the Moon is in `star`.
    Solar { month: u8, star: u8 },
}

impl FestivalRule {
    fn from_raw(name: &str, raw: RawRule) -> Result<Self, FestivalError> {
        let kind = raw.kind.name();
        let missing = |field| FestivalError::MissingField {
            name: name.to_owned(),
            kind,
            field,
        };
        let invalid = |field| FestivalError::InvalidField {
            name: name.to_owned(),
            field,
        };
        let month = raw.month.ok_or_else(|| missing("month"))?;
        if !(1..=12).contains(&month) {
            return Err(invalid("month"));
        }
        let star = || match raw.star {
            None => Err(missing("star")),
            Some(s @ 1..=27) => Ok(s),
            Some(_) => Err(invalid("star")),
        };
        let tithi = |field: &'static str, num: Option<u8>| -> Result<Tithi, FestivalError> {
            let num = num.ok_or_else(|| missing(field))?;
            match (Tithi::normalize(raw.paksha, num), raw.paksha) {
                (Some(tithi), _) => Ok(tithi),
                (None, None) if (1..=14).contains(&num) => Err(missing("paksha")),
                (None, _) => Err(invalid(field)),
            }
        };
        Ok(match raw.kind {
            RuleType::Lunar => FestivalRule::Lunar {
                month,
                tithi: tithi("tithi", raw.tithi)?,
                observation: raw.time.unwrap_or_default(),
            },
            RuleType::LunarStar => FestivalRule::LunarStar {
                month,
                star: star()?,
            },
            RuleType::LunarWeekday => FestivalRule::LunarWeekday {
                month,
                tithi: tithi("tithi_max", raw.tithi_max)?,
                weekday: raw.weekday.ok_or_else(|| missing("weekday"))?,
            },
            RuleType::SolarStart => FestivalRule::SolarStart { month },
            RuleType::Solar => FestivalRule::Solar {
                month,
                star: star()?,
            },
        })
    }

    /// The festival's day in `year`.
    pub fn resolve(&self, engine: &SearchEngine<'_>, year: i32) -> Result<Date, ResolveError> {
        match *self {
            FestivalRule::Lunar {
                month,
                tithi,
                observation,
            } => engine.lunar_tithi(month, tithi, observation, year),
            FestivalRule::LunarStar { month, star } => engine.lunar_month_star(month, star, year),
            FestivalRule::LunarWeekday {
                month,
                tithi,
                weekday,
            } => engine.weekday_before_tithi(year, month, tithi, weekday),
            FestivalRule::SolarStart { month } => engine.solar_day_number(month, 1, year),
            FestivalRule::Solar { month, star } => {
                engine.solar_span(month, SolarEvent::Star(star), year)
            }
        }
    }
}

/// The lookup key for a festival mentioned in `text`.
///
/// Cleans the text like the query parser does and drops a trailing number,
/// which sheets sometimes append.
///
/// # Example
///
/// ```
/// use seva_calendar::festival::festival_key;
///
/// assert_eq!("ಮಹಾ ಶಿವರಾತ್ರಿ", festival_key("ಮಹಾ-ಶಿವರಾತ್ರಿ 12"));
/// ```
pub fn festival_key(text: &str) -> String {
    TRAILING_NUMBER.replace(&normalize(text), "").into_owned()
}

/// A validated rule table, keyed by normalized festival name.
#[derive(Debug, Clone, Default)]
pub struct FestivalRules {
    rules: HashMap<String, FestivalRule>,
}

impl FestivalRules {
    /// The table shipped with the crate.
    pub fn builtin() -> Result<Self, FestivalError> {
        Self::from_json(BUILTIN_RULES)
    }

    /// Reads a table from a JSON file.
    pub fn load(path: &Path) -> Result<Self, FestivalError> {
        let raw = std::fs::read_to_string(path).map_err(|source| FestivalError::Io {
            path: path.to_owned(),
            source,
        })?;
        let rules = Self::from_json(&raw)?;
        log::info!("loaded {} festival rules from {}", rules.len(), path.display());
        Ok(rules)
    }

    /// Parses and validates a table.
    ///
    /// # Example
    ///
    /// ```
    /// use seva_calendar::festival::{FestivalError, FestivalRules};
    ///
    /// let rules = FestivalRules::from_json(r#"{"ಯುಗಾದಿ": {"type": "lunar", "month": 1, "paksha": "Shukla", "tithi": 1}}"#).unwrap();
    /// assert!(rules.get("ಯುಗಾದಿ").is_some());
    ///
    /// let err = FestivalRules::from_json(r#"{"ಓಣಂ": {"type": "solar", "month": 5}}"#).unwrap_err();
    /// assert!(matches!(err, FestivalError::MissingField { field: "star", .. }));
    /// ```
    pub fn from_json(raw: &str) -> Result<Self, FestivalError> {
        let table: HashMap<String, RawRule> = serde_json::from_str(raw)?;
        let rules = table
            .into_iter()
            .map(|(name, rule)| Ok((normalize(&name), FestivalRule::from_raw(&name, rule)?)))
            .collect::<Result<_, FestivalError>>()?;
        Ok(Self { rules })
    }

    /// The rule for an already normalized name.
    pub fn get(&self, key: &str) -> Option<&FestivalRule> {
        self.rules.get(key)
    }

    /// Whether `text` names a known festival.
    pub fn recognizes(&self, text: &str) -> bool {
        self.rules.contains_key(&festival_key(text))
    }

    /// The day in `year` of the festival named by `name`.
    pub fn resolve(
        &self,
        name: &str,
        engine: &SearchEngine<'_>,
        year: i32,
    ) -> Result<Date, ResolveError> {
        self.get(&festival_key(name))
            .ok_or(ResolveError::Unrecognized)?
            .resolve(engine, year)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astro::{Ayanamsa, Ephemeris, EphemerisSource, ObserverLocation};
    use crate::panchanga::{Almanac, SamplingClock};
    use crate::search::WindowConfig;

    #[test]
    fn builtin_table_is_valid() {
        let rules = FestivalRules::builtin().unwrap();
        assert!(rules.len() >= 30);
        assert_eq!(
            Some(&FestivalRule::Lunar {
                month: 11,
                tithi: Tithi::new(Paksha::Krishna, 14).unwrap(),
                observation: Observation::Midnight,
            }),
            rules.get("ಮಹಾ ಶಿವರಾತ್ರಿ")
        );
        assert_eq!(
            Some(&FestivalRule::Lunar {
                month: 7,
                tithi: Tithi::new(Paksha::Krishna, 15).unwrap(),
                observation: Observation::Sunrise,
            }),
            rules.get("ದೀಪಾವಳಿ")
        );
        assert_eq!(
            Some(&FestivalRule::LunarWeekday {
                month: 5,
                tithi: Tithi::new(Paksha::Shukla, 15).unwrap(),
                weekday: Weekday::Friday,
            }),
            rules.get("ವರಮಹಾಲಕ್ಷ್ಮಿ ವ್ರತ")
        );
        assert!(rules.recognizes("ಮಕರ-ಸಂಕ್ರಾಂತಿ 14"));
        assert!(!rules.recognizes("ಮಕರ ಮಾಸ"));
    }

    #[test]
    fn validation() {
        let err = |json: &str| FestivalRules::from_json(json).unwrap_err();
        assert!(matches!(
            err(r#"{"x": {"type": "lunar", "month": 1, "tithi": 4}}"#),
            FestivalError::MissingField { field: "paksha", .. }
        ));
        assert!(matches!(
            err(r#"{"x": {"type": "lunar", "paksha": "Shukla", "tithi": 4}}"#),
            FestivalError::MissingField { field: "month", .. }
        ));
        assert!(matches!(
            err(r#"{"x": {"type": "lunar", "month": 13, "paksha": "Shukla", "tithi": 4}}"#),
            FestivalError::InvalidField { field: "month", .. }
        ));
        assert!(matches!(
            err(r#"{"x": {"type": "lunar_weekday", "month": 5, "tithi_max": 15}}"#),
            FestivalError::MissingField { field: "weekday", .. }
        ));
        assert!(matches!(
            err(r#"{"x": {"type": "lunar_star", "month": 8, "star": 28}}"#),
            FestivalError::InvalidField { field: "star", .. }
        ));
        assert!(matches!(
            err(r#"{"x": {"type": "lunar", "month": 1, "paksha": "Shukla", "tithi": 1, "colour": "red"}}"#),
            FestivalError::Json(_)
        ));
        assert!(matches!(err(r#"{"x": {"type": "weekly"}}"#), FestivalError::Json(_)));
    }

    #[test]
    fn names_are_normalized() {
        let rules =
            FestivalRules::from_json(r#"{"Ugadi (Chandramana)": {"type": "lunar", "month": 1, "paksha": "Shukla", "tithi": 1}}"#)
                .unwrap();
        assert!(rules.get("ugadi").is_some());
        assert!(rules.recognizes("UGADI"));
    }

    #[test]
    fn unknown_festival() {
        let rules = FestivalRules::builtin().unwrap();
        let engine = SearchEngine::new(None, WindowConfig::default());
        assert_eq!(
            Err(ResolveError::Unrecognized),
            rules.resolve("ಅಜ್ಞಾತ ಹಬ್ಬ", &engine, 2026)
        );
        assert_eq!(
            Err(ResolveError::EphemerisUnavailable),
            rules.resolve("ಯುಗಾದಿ", &engine, 2026)
        );
    }

    fn real_sky() -> Ephemeris {
        Ephemeris::open(&EphemerisSource::Analytic, ObserverLocation::UDUPI).unwrap()
    }

    fn resolve_real(eph: &Ephemeris, name: &str, year: i32) -> String {
        let almanac = Almanac::new(eph, Ayanamsa::DEFAULT, SamplingClock::default());
        let engine = SearchEngine::new(Some(almanac), WindowConfig::default());
        let rules = FestivalRules::builtin().unwrap();
        match rules.resolve(name, &engine, year) {
            Ok(date) => date.to_string(),
            Err(e) => format!("{name} {year}: {e}"),
        }
    }

    #[test]
    fn real_sky_festivals() {
        let eph = real_sky();
        // Krishna 14 in force at the midnight closing the day
        assert_eq!("26-02-2025", resolve_real(&eph, "ಮಹಾ ಶಿವರಾತ್ರಿ", 2025));
        assert_eq!("15-02-2026", resolve_real(&eph, "ಮಹಾ ಶಿವರಾತ್ರಿ", 2026));
        // late in a year with an adhika Jyeshtha
        assert_eq!("09-11-2026", resolve_real(&eph, "ದೀಪಾವಳಿ", 2026));
        // Shravana full moon is Friday 28 August; the vrata is the Friday before
        assert_eq!("21-08-2026", resolve_real(&eph, "ವರಮಹಾಲಕ್ಷ್ಮಿ ವ್ರತ", 2026));
        let makara = resolve_real(&eph, "ಮಕರ ಸಂಕ್ರಾಂತಿ", 2026);
        assert!(makara == "14-01-2026" || makara == "15-01-2026", "{makara}");
    }
}
