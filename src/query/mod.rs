//! Structured calendar queries.
//!
//! Free text goes through [`parser::parse`] into [`QueryFields`], a bag of
//! whatever calendar elements were recognised. Strategies then pick the
//! fields they need and build one [`CalendarQuery`].

use std::fmt;

use serde::Deserialize;

use crate::date::Weekday;
use crate::names;
use crate::panchanga::Observation;

pub mod parser;

pub use parser::{normalize, parse};

/// Lunar fortnight.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize)]
pub enum Paksha {
    /// Waxing.
    #[serde(alias = "shukla")]
    Shukla,
    /// Waning.
    #[serde(alias = "krishna")]
    Krishna,
}

/// A lunar day named by fortnight and day within it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Tithi {
    pub paksha: Paksha,
    /// `1..=15`; Shukla 15 is the full moon, Krishna 15 the new moon.
    pub day: u8,
}

impl Tithi {
    pub fn new(paksha: Paksha, day: u8) -> Option<Self> {
        (1..=15).contains(&day).then_some(Self { paksha, day })
    }

    /// Builds a tithi from a possibly incomplete description.
    ///
    /// `30` is always the new moon, `16..=29` count on into the waning
    /// fortnight, and a bare `15` is the full moon. Any other number needs a
    /// fortnight.
    ///
    /// # Example
    ///
    /// ```
    /// use seva_calendar::query::{Paksha::*, Tithi};
    ///
    /// assert_eq!(Tithi::new(Krishna, 15), Tithi::normalize(None, 30));
    /// assert_eq!(Tithi::new(Shukla, 15), Tithi::normalize(None, 15));
    /// assert_eq!(Tithi::new(Krishna, 4), Tithi::normalize(Some(Krishna), 4));
    /// assert_eq!(Tithi::new(Krishna, 4), Tithi::normalize(None, 19));
    /// assert_eq!(None, Tithi::normalize(None, 4));
    /// ```
    pub fn normalize(paksha: Option<Paksha>, num: u8) -> Option<Self> {
        match (paksha, num) {
            (_, 30) => Self::new(Paksha::Krishna, 15),
            (_, 16..=29) => Self::new(Paksha::Krishna, num - 15),
            (None, 15) => Self::new(Paksha::Shukla, 15),
            (Some(paksha), _) => Self::new(paksha, num),
            (None, _) => None,
        }
    }

    /// Position in the lunar month, `1..=30`.
    pub fn index(&self) -> u8 {
        match self.paksha {
            Paksha::Shukla => self.day,
            Paksha::Krishna => self.day + 15,
        }
    }
}

impl fmt::Display for Tithi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.index() {
            30 => names::tithi(30),
            _ => names::tithi(self.day),
        };
        write!(f, "{:?} {}", self.paksha, name.unwrap_or("?"))
    }
}

/// Which occurrence of a weekday in a month.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Ordinal {
    /// 1-based.
    Nth(u8),
    Last,
}

/// One fully specified calendar question.
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarQuery {
    /// A day of a civil month.
    ExplicitDate { month: u8, day: u8 },
    /// The n-th (or last) given weekday of a civil month.
    WeekdayPattern {
        month: u8,
        weekday: Weekday,
        ordinal: Ordinal,
    },
    /// A tithi of a lunar month.
    LunarTithi {
        month: u8,
        tithi: Tithi,
        observation: Observation,
    },
    /// The day of a solar month the Moon is in a star.
    SolarStar { month: u8, star: u8 },
    /// The day of a solar month a tithi is in force.
    SolarTithi { month: u8, tithi: Tithi },
    /// The day of a lunar month the Moon is in a star.
    LunarStar { month: u8, star: u8 },
    /// The day of a civil month the Moon is in a star.
    CivilMonthStar { month: u8, star: u8 },
    /// The day of a civil month a tithi is in force.
    CivilMonthTithi { month: u8, tithi: Tithi },
    /// The n-th day of a solar month, counting its first day as 1.
    SolarDayNumber { month: u8, day_number: u32 },
    /// A festival looked up by name.
    FestivalRef { name: String },
}

/// Everything the parser recognised in one text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryFields {
    /// The normalized text.
    pub text: String,
    pub lunar_month: Option<u8>,
    pub solar_month: Option<u8>,
    pub civil_month: Option<u8>,
    pub star: Option<u8>,
    pub paksha: Option<Paksha>,
    /// `1..=15` or `30`, as named.
    pub tithi: Option<u8>,
    pub weekday: Option<Weekday>,
    pub ordinal: Option<Ordinal>,
    /// The first standalone number.
    pub day_number: Option<u32>,
    /// A digit run that could not be read as a number.
    pub malformed_number: Option<String>,
    /// The matched spelling of the first month of any kind.
    pub month_token: Option<String>,
}

impl QueryFields {
    /// The tithi named by the text.
    ///
    /// When the text names a fortnight but no tithi, a standalone number up
    /// to 15 stands for the tithi.
    pub fn tithi(&self) -> Option<Tithi> {
        match (self.tithi, self.paksha, self.day_number) {
            (Some(num), paksha, _) => Tithi::normalize(paksha, num),
            (None, Some(paksha), Some(n @ 1..=15)) => Tithi::new(paksha, n as u8),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tithi_index() {
        assert_eq!(5, Tithi::new(Paksha::Shukla, 5).unwrap().index());
        assert_eq!(20, Tithi::new(Paksha::Krishna, 5).unwrap().index());
        assert_eq!(30, Tithi::normalize(None, 30).unwrap().index());
        assert_eq!(30, Tithi::normalize(Some(Paksha::Shukla), 30).unwrap().index());
        assert_eq!(None, Tithi::new(Paksha::Shukla, 0));
        assert_eq!(None, Tithi::new(Paksha::Shukla, 16));
        assert_eq!(None, Tithi::normalize(Some(Paksha::Shukla), 31));
    }

    #[test]
    fn tithi_display() {
        assert_eq!("Shukla ಪಂಚಮಿ", Tithi::new(Paksha::Shukla, 5).unwrap().to_string());
        assert_eq!("Krishna ಅಮಾವಾಸ್ಯೆ", Tithi::normalize(None, 30).unwrap().to_string());
        assert_eq!("Shukla ಹುಣ್ಣಿಮೆ", Tithi::normalize(None, 15).unwrap().to_string());
    }

    #[test]
    fn tithi_from_fields() {
        let fields = QueryFields {
            paksha: Some(Paksha::Shukla),
            day_number: Some(5),
            ..Default::default()
        };
        assert_eq!(Tithi::new(Paksha::Shukla, 5), fields.tithi());
        let fields = QueryFields {
            paksha: Some(Paksha::Shukla),
            day_number: Some(25),
            ..Default::default()
        };
        assert_eq!(None, fields.tithi());
        let fields = QueryFields {
            tithi: Some(30),
            ..Default::default()
        };
        assert_eq!(Tithi::new(Paksha::Krishna, 15), fields.tithi());
    }

    #[test]
    fn paksha_from_json() {
        let p: Paksha = serde_json::from_str("\"Krishna\"").unwrap();
        assert_eq!(Paksha::Krishna, p);
        let p: Paksha = serde_json::from_str("\"shukla\"").unwrap();
        assert_eq!(Paksha::Shukla, p);
    }
}
