//! Resolves loosely written Hindu-calendar observance descriptions into
//! Gregorian dates for a given year.
//!
//! A description like "ಮಾಘ ಶುದ್ಧ ಪಂಚಮಿ" (fifth day of the bright fortnight of
//! Magha) names a day by lunar month and tithi; others name a solar month and
//! a star, a festival, a civil date, or a weekday pattern. The
//! [`Dispatcher`](dispatch::Dispatcher) parses each text, tries the ways of
//! reading it in a fixed order and runs bounded day-by-day searches against
//! the positions of the Sun and the Moon.
//!
//! # Examples
//!
//! Basic usage with [`Date`]:
//!
//! ```
//! use seva_calendar::Date;
//!
//! let date = Date::from_gregorian(2026, 1, 23).unwrap();
//!
//! assert_eq!(5, date.day_of_week()); // Friday
//! assert_eq!("23-01-2026", date.to_string());
//! ```
//!
//! Resolving a sheet:
//!
//! ```
//! use seva_calendar::astro::{Ephemeris, EphemerisSource, ObserverLocation};
//! use seva_calendar::dispatch::{Classification, Dispatcher};
//! use seva_calendar::festival::FestivalRules;
//! use seva_calendar::panchanga::{Almanac, SamplingClock};
//! use seva_calendar::search::{SearchEngine, WindowConfig};
//! use seva_calendar::astro::Ayanamsa;
//!
//! let eph = Ephemeris::open(&EphemerisSource::Analytic, ObserverLocation::UDUPI).unwrap();
//! let almanac = Almanac::new(&eph, Ayanamsa::DEFAULT, SamplingClock::default());
//! let engine = SearchEngine::new(Some(almanac), WindowConfig::default());
//! let mut dispatcher = Dispatcher::new(engine, FestivalRules::builtin().unwrap());
//!
//! let res = dispatcher.resolve("ಮಾಘ ಶುದ್ಧ ಪಂಚಮಿ", 2026);
//! assert_eq!("23-01-2026", res.date.unwrap().to_string());
//! assert_eq!(Classification::LunarTithi, res.classification);
//! ```

pub mod astro;
pub mod config;
pub mod date;
pub mod dispatch;
pub mod error;
pub mod festival;
pub mod fill_down;
pub mod names;
pub mod panchanga;
pub mod query;
pub mod search;
pub mod time_scales;

pub use date::{Date, Weekday, YearType};
pub use error::ResolveError;
