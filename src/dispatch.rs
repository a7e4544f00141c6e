//! Tries each way of reading a text in turn until one yields a date.
//!
//! A [`Strategy`] turns parsed fields into a [`CalendarQuery`] of one shape,
//! or declines. The [`Dispatcher`] runs the strategies in a fixed order and
//! keeps the first date found, tagged with the strategy that found it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};

use crate::date::Date;
use crate::error::ResolveError;
use crate::festival::{FestivalRules, festival_key};
use crate::fill_down::fill_down;
use crate::panchanga::Observation;
use crate::query::{CalendarQuery, QueryFields, parse};
use crate::search::SearchEngine;

/// Which strategy produced a date.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Classification {
    CivilDate,
    WeekdayPattern,
    Festival,
    LunarTithi,
    SolarStar,
    SolarTithi,
    LunarStar,
    CivilMonthStar,
    CivilMonthTithi,
    SolarDayNumber,
    /// No strategy produced a date.
    ManualCheck,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        use Classification::*;
        match self {
            CivilDate => "Civil Date",
            WeekdayPattern => "Weekday Pattern",
            Festival => "Festival",
            LunarTithi => "Lunar Tithi",
            SolarStar => "Solar Star",
            SolarTithi => "Solar + Tithi",
            LunarStar => "Lunar + Star",
            CivilMonthStar => "Civil Month + Star",
            CivilMonthTithi => "Civil Month + Tithi",
            SolarDayNumber => "Solar Day No.",
            ManualCheck => "Manual Check / Unknown Format",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One way of reading parsed text as a calendar query.
pub trait Strategy: fmt::Debug + Send + Sync {
    fn classification(&self) -> Classification;

    /// The query this strategy reads from `fields`, or
    /// [`ResolveError::Inapplicable`] when the fields do not fit it.
    fn interpret(&self, fields: &QueryFields) -> Result<CalendarQuery, ResolveError>;
}

#[derive(Debug)]
struct CivilDate;

impl Strategy for CivilDate {
    fn classification(&self) -> Classification {
        Classification::CivilDate
    }

    fn interpret(&self, f: &QueryFields) -> Result<CalendarQuery, ResolveError> {
        let month = f.civil_month.ok_or(ResolveError::Inapplicable)?;
        if f.weekday.is_some() || f.star.is_some() || f.tithi.is_some() || f.paksha.is_some() {
            return Err(ResolveError::Inapplicable);
        }
        if let Some(token) = &f.malformed_number {
            return Err(ResolveError::MalformedNumeric {
                token: token.clone(),
            });
        }
        let day = f.day_number.ok_or(ResolveError::Inapplicable)?;
        let day = u8::try_from(day).map_err(|_| ResolveError::MalformedNumeric {
            token: day.to_string(),
        })?;
        Ok(CalendarQuery::ExplicitDate { month, day })
    }
}

#[derive(Debug)]
struct WeekdayPattern;

impl Strategy for WeekdayPattern {
    fn classification(&self) -> Classification {
        Classification::WeekdayPattern
    }

    fn interpret(&self, f: &QueryFields) -> Result<CalendarQuery, ResolveError> {
        match (f.civil_month, f.weekday, f.ordinal) {
            (Some(month), Some(weekday), Some(ordinal)) => Ok(CalendarQuery::WeekdayPattern {
                month,
                weekday,
                ordinal,
            }),
            _ => Err(ResolveError::Inapplicable),
        }
    }
}

#[derive(Debug)]
struct FestivalLookup {
    rules: Arc<FestivalRules>,
}

impl Strategy for FestivalLookup {
    fn classification(&self) -> Classification {
        Classification::Festival
    }

    fn interpret(&self, f: &QueryFields) -> Result<CalendarQuery, ResolveError> {
        if !self.rules.recognizes(&f.text) {
            return Err(ResolveError::Inapplicable);
        }
        Ok(CalendarQuery::FestivalRef {
            name: festival_key(&f.text),
        })
    }
}

#[derive(Debug)]
struct LunarTithi;

impl Strategy for LunarTithi {
    fn classification(&self) -> Classification {
        Classification::LunarTithi
    }

    fn interpret(&self, f: &QueryFields) -> Result<CalendarQuery, ResolveError> {
        match (f.lunar_month, f.tithi()) {
            (Some(month), Some(tithi)) => Ok(CalendarQuery::LunarTithi {
                month,
                tithi,
                observation: Observation::Sunrise,
            }),
            _ => Err(ResolveError::Inapplicable),
        }
    }
}

#[derive(Debug)]
struct SolarStar;

impl Strategy for SolarStar {
    fn classification(&self) -> Classification {
        Classification::SolarStar
    }

    fn interpret(&self, f: &QueryFields) -> Result<CalendarQuery, ResolveError> {
        match (f.solar_month, f.star) {
            (Some(month), Some(star)) => Ok(CalendarQuery::SolarStar { month, star }),
            _ => Err(ResolveError::Inapplicable),
        }
    }
}

#[derive(Debug)]
struct SolarTithi;

impl Strategy for SolarTithi {
    fn classification(&self) -> Classification {
        Classification::SolarTithi
    }

    fn interpret(&self, f: &QueryFields) -> Result<CalendarQuery, ResolveError> {
        match (f.solar_month, f.tithi()) {
            (Some(month), Some(tithi)) => Ok(CalendarQuery::SolarTithi { month, tithi }),
            _ => Err(ResolveError::Inapplicable),
        }
    }
}

#[derive(Debug)]
struct LunarStar;

impl Strategy for LunarStar {
    fn classification(&self) -> Classification {
        Classification::LunarStar
    }

    fn interpret(&self, f: &QueryFields) -> Result<CalendarQuery, ResolveError> {
        match (f.lunar_month, f.star) {
            (Some(month), Some(star)) => Ok(CalendarQuery::LunarStar { month, star }),
            _ => Err(ResolveError::Inapplicable),
        }
    }
}

#[derive(Debug)]
struct CivilMonthStar;

impl Strategy for CivilMonthStar {
    fn classification(&self) -> Classification {
        Classification::CivilMonthStar
    }

    fn interpret(&self, f: &QueryFields) -> Result<CalendarQuery, ResolveError> {
        match (f.civil_month, f.star) {
            (Some(month), Some(star)) => Ok(CalendarQuery::CivilMonthStar { month, star }),
            _ => Err(ResolveError::Inapplicable),
        }
    }
}

#[derive(Debug)]
struct CivilMonthTithi;

impl Strategy for CivilMonthTithi {
    fn classification(&self) -> Classification {
        Classification::CivilMonthTithi
    }

    fn interpret(&self, f: &QueryFields) -> Result<CalendarQuery, ResolveError> {
        match (f.civil_month, f.tithi()) {
            (Some(month), Some(tithi)) => Ok(CalendarQuery::CivilMonthTithi { month, tithi }),
            _ => Err(ResolveError::Inapplicable),
        }
    }
}

#[derive(Debug)]
struct SolarDayNumber;

impl Strategy for SolarDayNumber {
    fn classification(&self) -> Classification {
        Classification::SolarDayNumber
    }

    fn interpret(&self, f: &QueryFields) -> Result<CalendarQuery, ResolveError> {
        match (f.solar_month, f.day_number) {
            (Some(month), Some(day_number)) => Ok(CalendarQuery::SolarDayNumber { month, day_number }),
            _ => Err(ResolveError::Inapplicable),
        }
    }
}

/// The outcome for one text.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The date, or why none was found.
    pub date: Result<Date, ResolveError>,
    pub classification: Classification,
}

/// A row to resolve.
#[derive(Debug, Clone, Deserialize)]
pub struct InputRow {
    #[serde(default)]
    pub name: String,
    pub text: String,
}

/// A resolved row, echoing its input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRow {
    pub name: String,
    pub original_input: String,
    pub processed_input: String,
    #[serde(serialize_with = "serialize_date")]
    pub calculated_date: Option<Date>,
    pub classification: Classification,
}

fn serialize_date<S: Serializer>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
    match date {
        Some(date) => date.serialize(serializer),
        None => serializer.serialize_str("Manual Check"),
    }
}

/// Runs strategies in priority order and remembers answers.
#[derive(Debug)]
pub struct Dispatcher<'e> {
    engine: SearchEngine<'e>,
    festivals: Arc<FestivalRules>,
    strategies: Vec<Box<dyn Strategy>>,
    cache: HashMap<(String, i32), Resolution>,
}

impl<'e> Dispatcher<'e> {
    /// A dispatcher with the standard strategy order: civil date, weekday
    /// pattern, festival, lunar tithi, solar star, solar tithi, lunar star,
    /// civil month star, civil month tithi, solar day number.
    pub fn new(engine: SearchEngine<'e>, festivals: FestivalRules) -> Self {
        let festivals = Arc::new(festivals);
        let strategies: Vec<Box<dyn Strategy>> = vec![
            Box::new(CivilDate),
            Box::new(WeekdayPattern),
            Box::new(FestivalLookup {
                rules: Arc::clone(&festivals),
            }),
            Box::new(LunarTithi),
            Box::new(SolarStar),
            Box::new(SolarTithi),
            Box::new(LunarStar),
            Box::new(CivilMonthStar),
            Box::new(CivilMonthTithi),
            Box::new(SolarDayNumber),
        ];
        Self {
            engine,
            festivals,
            strategies,
            cache: HashMap::new(),
        }
    }

    fn run(&self, query: &CalendarQuery, year: i32) -> Result<Date, ResolveError> {
        match query {
            CalendarQuery::FestivalRef { name } => self.festivals.resolve(name, &self.engine, year),
            _ => self.engine.resolve(query, year),
        }
    }

    fn dispatch(&self, fields: &QueryFields, year: i32) -> Resolution {
        let mut reason = ResolveError::Unrecognized;
        for strategy in &self.strategies {
            let query = match strategy.interpret(fields) {
                Ok(query) => query,
                Err(ResolveError::Inapplicable) => continue,
                Err(e) => {
                    reason = e;
                    continue;
                }
            };
            match self.run(&query, year) {
                Ok(date) => {
                    return Resolution {
                        date: Ok(date),
                        classification: strategy.classification(),
                    };
                }
                Err(e) => {
                    log::debug!("{} failed for {query:?}: {e}", strategy.classification());
                    reason = e;
                }
            }
        }
        Resolution {
            date: Err(reason),
            classification: Classification::ManualCheck,
        }
    }

    /// Resolves one already filled-down text for `year`.
    ///
    /// # Example
    ///
    /// ```
    /// use seva_calendar::dispatch::{Classification, Dispatcher};
    /// use seva_calendar::festival::FestivalRules;
    /// use seva_calendar::search::{SearchEngine, WindowConfig};
    ///
    /// let engine = SearchEngine::new(None, WindowConfig::default());
    /// let mut dispatcher = Dispatcher::new(engine, FestivalRules::default());
    /// let res = dispatcher.resolve("ಜನವರಿ-15", 2026);
    /// assert_eq!("15-01-2026", res.date.unwrap().to_string());
    /// assert_eq!(Classification::CivilDate, res.classification);
    /// ```
    pub fn resolve(&mut self, text: &str, year: i32) -> Resolution {
        let fields = parse(text);
        let key = (fields.text.clone(), year);
        if let Some(hit) = self.cache.get(&key) {
            return hit.clone();
        }
        let resolution = self.dispatch(&fields, year);
        log::debug!("{:?} ({year}) -> {resolution:?}", fields.text);
        self.cache.insert(key, resolution.clone());
        resolution
    }

    /// Fills rows down, then resolves each of them.
    pub fn resolve_rows(&mut self, rows: &[InputRow], year: i32) -> Vec<ResolvedRow> {
        let processed = fill_down(rows.iter().map(|row| row.text.as_str()));
        let resolved: Vec<ResolvedRow> = rows
            .iter()
            .zip(processed)
            .map(|(row, processed_input)| {
                let resolution = self.resolve(&processed_input, year);
                ResolvedRow {
                    name: row.name.clone(),
                    original_input: row.text.clone(),
                    processed_input,
                    calculated_date: resolution.date.ok(),
                    classification: resolution.classification,
                }
            })
            .collect();
        let manual = resolved
            .iter()
            .filter(|row| row.classification == Classification::ManualCheck)
            .count();
        log::info!(
            "resolved {} of {} rows for {year}, {manual} need a manual check",
            resolved.len() - manual,
            resolved.len()
        );
        resolved
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}
