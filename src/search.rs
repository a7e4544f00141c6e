//! Bounded day-by-day searches for the civil date answering a query.
//!
//! Every search walks a fixed number of days from an anchor placed a little
//! before the civil month in which the answer usually falls, so each one
//! terminates after at most a few dozen ephemeris reads.

use serde::Deserialize;

use crate::date::{self, Date, Weekday};
use crate::error::ResolveError;
use crate::panchanga::{Almanac, Observation};
use crate::query::{CalendarQuery, Ordinal, Tithi};

/// Sizes of the search windows.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    /// Days before the 1st of the civil month a lunar search starts.
    pub lunar_lead_days: i32,
    pub lunar_steps: u32,
    /// Days before the 14th of the civil month a solar search starts.
    pub solar_lead_days: i32,
    pub solar_steps: u32,
    /// How far before a reference tithi a weekday is looked for.
    pub weekday_lookback_days: i32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            lunar_lead_days: 15,
            lunar_steps: 110,
            solar_lead_days: 15,
            solar_steps: 60,
            weekday_lookback_days: 14,
        }
    }
}

impl WindowConfig {
    /// Rejects negative day counts.
    ///
    /// # Example
    ///
    /// ```
    /// use seva_calendar::search::WindowConfig;
    ///
    /// assert!(WindowConfig::default().validate().is_ok());
    /// let windows = WindowConfig { weekday_lookback_days: -1, ..Default::default() };
    /// assert_eq!("weekday_lookback_days", windows.validate().unwrap_err().field);
    /// ```
    pub fn validate(&self) -> Result<(), NegativeWindow> {
        [
            ("lunar_lead_days", self.lunar_lead_days),
            ("solar_lead_days", self.solar_lead_days),
            ("weekday_lookback_days", self.weekday_lookback_days),
        ]
        .into_iter()
        .find(|&(_, value)| value < 0)
        .map_or(Ok(()), |(field, value)| Err(NegativeWindow { field, value }))
    }
}

/// A window setting below zero.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("window setting `{field}` is negative ({value})")]
pub struct NegativeWindow {
    pub field: &'static str,
    pub value: i32,
}

/// An anchor date and the number of consecutive days examined from it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SearchWindow {
    pub anchor: Date,
    pub steps: u32,
}

impl SearchWindow {
    /// The examined days, in order.
    ///
    /// # Example
    ///
    /// ```
    /// use seva_calendar::Date;
    /// use seva_calendar::search::SearchWindow;
    ///
    /// let anchor = Date::from_gregorian(2026, 1, 30).unwrap();
    /// let days: Vec<_> = SearchWindow { anchor, steps: 3 }.days().map(|d| d.to_string()).collect();
    /// assert_eq!(vec!["30-01-2026", "31-01-2026", "01-02-2026"], days);
    /// ```
    pub fn days(&self) -> impl Iterator<Item = Date> {
        let anchor = self.anchor;
        (0..self.steps).map_while(move |i| anchor.checked_add_days(i32::try_from(i).ok()?))
    }

    fn not_found(&self) -> ResolveError {
        ResolveError::NotFound {
            start: self.anchor,
            steps: self.steps,
        }
    }
}

/// What must hold on a day of a solar month.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SolarEvent {
    Star(u8),
    Tithi(Tithi),
}

/// Civil month in which a symbolic month mostly falls, counted from
/// `offset` months after January.
fn civil_month_after(month: u8, offset: u8) -> i32 {
    i32::from((month + offset - 1) % 12 + 1)
}

/// Runs searches against an optional ephemeris.
///
/// Without one, only the purely civil searches work; every other search
/// fails with [`ResolveError::EphemerisUnavailable`].
#[derive(Debug, Clone)]
pub struct SearchEngine<'e> {
    almanac: Option<Almanac<'e>>,
    windows: WindowConfig,
}

impl<'e> SearchEngine<'e> {
    pub fn new(almanac: Option<Almanac<'e>>, windows: WindowConfig) -> Self {
        Self { almanac, windows }
    }

    fn almanac(&self) -> Result<&Almanac<'e>, ResolveError> {
        self.almanac
            .as_ref()
            .ok_or(ResolveError::EphemerisUnavailable)
    }

    /// Resolves any query except a festival reference.
    pub fn resolve(&self, query: &CalendarQuery, year: i32) -> Result<Date, ResolveError> {
        use CalendarQuery::*;
        match *query {
            ExplicitDate { month, day } => self.explicit_date(year, month, day),
            WeekdayPattern {
                month,
                weekday,
                ordinal,
            } => self.weekday_pattern(year, month, weekday, ordinal),
            LunarTithi {
                month,
                tithi,
                observation,
            } => self.lunar_tithi(month, tithi, observation, year),
            SolarStar { month, star } => self.solar_span(month, SolarEvent::Star(star), year),
            SolarTithi { month, tithi } => self.solar_span(month, SolarEvent::Tithi(tithi), year),
            LunarStar { month, star } => self.lunar_month_star(month, star, year),
            CivilMonthStar { month, star } => self.civil_month_star(year, month, star),
            CivilMonthTithi { month, tithi } => self.civil_month_tithi(year, month, tithi),
            SolarDayNumber { month, day_number } => self.solar_day_number(month, day_number, year),
            FestivalRef { .. } => Err(ResolveError::Inapplicable),
        }
    }

    /// The window for lunar month `month` (Chaitra = 1) of `year`.
    ///
    /// Starts `lunar_lead_days` before the 1st of the civil month two
    /// months on (Chaitra: March).
    pub fn lunar_window(&self, month: u8, year: i32) -> Result<SearchWindow, ResolveError> {
        let first = Date::first_of_month(year, civil_month_after(month, 2))
            .ok_or(ResolveError::Inapplicable)?;
        Ok(SearchWindow {
            anchor: first
                .checked_sub_days(self.windows.lunar_lead_days)
                .ok_or(ResolveError::Inapplicable)?,
            steps: self.windows.lunar_steps,
        })
    }

    /// The window for solar month `month` (Mesha = 1) of `year`.
    ///
    /// Starts `solar_lead_days` before the 14th of the civil month three
    /// months on (Mesha: April), around which the month begins.
    pub fn solar_window(&self, month: u8, year: i32) -> Result<SearchWindow, ResolveError> {
        let mid = Date::from_gregorian(year, civil_month_after(month, 3), 14)
            .ok_or(ResolveError::Inapplicable)?;
        Ok(SearchWindow {
            anchor: mid
                .checked_sub_days(self.windows.solar_lead_days)
                .ok_or(ResolveError::Inapplicable)?,
            steps: self.windows.solar_steps,
        })
    }

    /// The first day of the window whose tithi at `observation` is `tithi`
    /// and which lies in lunar month `month`.
    pub fn lunar_tithi(
        &self,
        month: u8,
        tithi: Tithi,
        observation: Observation,
        year: i32,
    ) -> Result<Date, ResolveError> {
        let almanac = self.almanac()?;
        let window = self.lunar_window(month, year)?;
        for day in window.days() {
            if almanac.tithi(day, observation)? == tithi.index()
                && almanac.lunar_month(day)? == month
            {
                return Ok(day);
            }
        }
        log::debug!("{tithi} of lunar month {month} not found in {window:?}");
        Err(window.not_found())
    }

    /// The first day of solar month `month` on which `event` holds at
    /// sunrise.
    pub fn solar_span(&self, month: u8, event: SolarEvent, year: i32) -> Result<Date, ResolveError> {
        let almanac = self.almanac()?;
        let window = self.solar_window(month, year)?;
        for day in window.days() {
            if almanac.solar_month(day, Observation::Sunrise)? != month {
                continue;
            }
            let hit = match event {
                SolarEvent::Star(star) => almanac.nakshatra(day, Observation::Sunrise)? == star,
                SolarEvent::Tithi(tithi) => {
                    almanac.tithi(day, Observation::Sunrise)? == tithi.index()
                }
            };
            if hit {
                return Ok(day);
            }
        }
        log::debug!("{event:?} not found in solar month {month} within {window:?}");
        Err(ResolveError::CheckManual)
    }

    /// The first day of lunar month `month` with the Moon in `star`.
    pub fn lunar_month_star(&self, month: u8, star: u8, year: i32) -> Result<Date, ResolveError> {
        let almanac = self.almanac()?;
        let window = self.lunar_window(month, year)?;
        for day in window.days() {
            if almanac.nakshatra(day, Observation::Sunrise)? == star
                && almanac.lunar_month(day)? == month
            {
                return Ok(day);
            }
        }
        Err(ResolveError::Inapplicable)
    }

    /// Day `day_number` of solar month `month`, its first day being day 1.
    ///
    /// The offset from the first day is not checked against the month's
    /// end.
    pub fn solar_day_number(
        &self,
        month: u8,
        day_number: u32,
        year: i32,
    ) -> Result<Date, ResolveError> {
        let offset = match i32::try_from(day_number) {
            Ok(n @ 1..=32) => n - 1,
            _ => {
                return Err(ResolveError::MalformedNumeric {
                    token: day_number.to_string(),
                });
            }
        };
        let almanac = self.almanac()?;
        let window = self.solar_window(month, year)?;
        for day in window.days() {
            if almanac.solar_month(day, Observation::Sunrise)? == month {
                return day.checked_add_days(offset).ok_or(ResolveError::Inapplicable);
            }
        }
        log::debug!("start of solar month {month} not found in {window:?}");
        Err(ResolveError::CheckManual)
    }

    /// The first day of a civil month with the Moon in `star` at sunrise.
    pub fn civil_month_star(&self, year: i32, month: u8, star: u8) -> Result<Date, ResolveError> {
        let almanac = self.almanac()?;
        self.scan_civil_month(year, month, |day| {
            Ok(almanac.nakshatra(day, Observation::Sunrise)? == star)
        })
    }

    /// The first day of a civil month with `tithi` in force at sunrise.
    pub fn civil_month_tithi(
        &self,
        year: i32,
        month: u8,
        tithi: Tithi,
    ) -> Result<Date, ResolveError> {
        let almanac = self.almanac()?;
        self.scan_civil_month(year, month, |day| {
            Ok(almanac.tithi(day, Observation::Sunrise)? == tithi.index())
        })
    }

    fn scan_civil_month(
        &self,
        year: i32,
        month: u8,
        mut matches: impl FnMut(Date) -> Result<bool, ResolveError>,
    ) -> Result<Date, ResolveError> {
        let first = Date::first_of_month(year, i32::from(month)).ok_or(ResolveError::Inapplicable)?;
        let window = SearchWindow {
            anchor: first,
            steps: date::days_in_month(year, i32::from(month)) as u32,
        };
        for day in window.days() {
            if matches(day)? {
                return Ok(day);
            }
        }
        Err(window.not_found())
    }

    /// The `ordinal`-th `weekday` of a civil month.
    ///
    /// # Example
    ///
    /// ```
    /// use seva_calendar::Weekday;
    /// use seva_calendar::query::Ordinal;
    /// use seva_calendar::search::{SearchEngine, WindowConfig};
    ///
    /// let engine = SearchEngine::new(None, WindowConfig::default());
    /// let date = engine.weekday_pattern(2026, 1, Weekday::Sunday, Ordinal::Nth(1)).unwrap();
    /// assert_eq!("04-01-2026", date.to_string());
    /// let date = engine.weekday_pattern(2026, 1, Weekday::Friday, Ordinal::Last).unwrap();
    /// assert_eq!("30-01-2026", date.to_string());
    /// ```
    pub fn weekday_pattern(
        &self,
        year: i32,
        month: u8,
        weekday: Weekday,
        ordinal: Ordinal,
    ) -> Result<Date, ResolveError> {
        let month = i32::from(month);
        let first = Date::first_of_month(year, month).ok_or(ResolveError::Inapplicable)?;
        let last = Date::last_of_month(year, month).ok_or(ResolveError::Inapplicable)?;
        let steps = (last - first + 1) as u32;
        let found = match ordinal {
            Ordinal::Nth(0) => return Err(ResolveError::Inapplicable),
            Ordinal::Nth(n) => (0..=last - first)
                .map(|i| first + i)
                .filter(|d| d.weekday() == weekday)
                .nth(usize::from(n) - 1),
            Ordinal::Last => (0..=last - first)
                .map(|i| last - i)
                .find(|d| d.weekday() == weekday),
        };
        found.ok_or(ResolveError::NotFound {
            start: first,
            steps,
        })
    }

    /// The nearest `weekday` strictly before the day `tithi` of lunar month
    /// `month` falls on.
    pub fn weekday_before_tithi(
        &self,
        year: i32,
        month: u8,
        tithi: Tithi,
        weekday: Weekday,
    ) -> Result<Date, ResolveError> {
        let reference = self.lunar_tithi(month, tithi, Observation::Sunrise, year)?;
        let lookback = self.windows.weekday_lookback_days;
        (1..=lookback)
            .filter_map(|offset| reference.checked_sub_days(offset))
            .find(|d| d.weekday() == weekday)
            .ok_or(ResolveError::NotFound {
                start: reference.checked_sub_days(lookback).unwrap_or(reference),
                steps: u32::try_from(lookback).unwrap_or(0),
            })
    }

    /// A day of a civil month.
    pub fn explicit_date(&self, year: i32, month: u8, day: u8) -> Result<Date, ResolveError> {
        Date::from_gregorian(year, i32::from(month), i32::from(day)).ok_or(
            ResolveError::MalformedNumeric {
                token: day.to_string(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astro::testing::LinearSky;
    use crate::astro::{Ayanamsa, Ephemeris, EphemerisSource, ObserverLocation};
    use crate::panchanga::SamplingClock;
    use crate::query::Paksha::*;

    fn date(y: i32, m: i32, d: i32) -> Date {
        Date::from_gregorian(y, m, d).unwrap()
    }

    /// New moon 6 hours before sunrise on 19 January 2026, with the Sun at
    /// sidereal 275° (Capricorn): a 30-day Magha from 19 January, Makara
    /// from 14 January, Kumbha from 14 February.
    fn magha_sky() -> LinearSky {
        let epoch = SamplingClock::default()
            .instant(date(2026, 1, 19), Observation::Sunrise)
            .0
            - 0.25;
        LinearSky::new_moon_at(epoch, 299.1)
    }

    /// The Moon keeps pace with the Sun, 3° ahead of it.
    fn stalled_sky() -> LinearSky {
        let sky = magha_sky();
        LinearSky {
            moon_at_epoch: sky.sun_at_epoch + 3.0,
            moon_rate: sky.sun_rate,
            ..sky
        }
    }

    fn ephemeris(sky: LinearSky) -> Ephemeris {
        Ephemeris::with_provider(Box::new(sky), ObserverLocation::UDUPI).unwrap()
    }

    fn engine(eph: &Ephemeris) -> SearchEngine<'_> {
        let almanac = Almanac::new(eph, Ayanamsa::DEFAULT, SamplingClock::default());
        SearchEngine::new(Some(almanac), WindowConfig::default())
    }

    fn tithi(paksha: crate::query::Paksha, day: u8) -> Tithi {
        Tithi::new(paksha, day).unwrap()
    }

    #[test]
    fn windows() {
        let engine = SearchEngine::new(None, WindowConfig::default());
        let w = engine.lunar_window(11, 2026).unwrap();
        assert_eq!((date(2025, 12, 17), 110), (w.anchor, w.steps));
        let w = engine.lunar_window(1, 2026).unwrap();
        assert_eq!(date(2026, 2, 14), w.anchor);
        let w = engine.solar_window(1, 2026).unwrap();
        assert_eq!((date(2026, 3, 30), 60), (w.anchor, w.steps));
        let w = engine.solar_window(10, 2026).unwrap();
        assert_eq!(date(2025, 12, 30), w.anchor);
    }

    #[test]
    fn lunar_tithi_checks_month() {
        let eph = ephemeris(magha_sky());
        let engine = engine(&eph);
        // 24 December is also Shukla 5, but of Pushya
        assert_eq!(
            Ok(date(2026, 1, 23)),
            engine.lunar_tithi(11, tithi(Shukla, 5), Observation::Sunrise, 2026)
        );
        assert_eq!(
            Ok(date(2026, 2, 17)),
            engine.lunar_tithi(11, tithi(Krishna, 15), Observation::Sunrise, 2026)
        );
        assert_eq!(
            Ok(date(2026, 1, 23)),
            engine.lunar_tithi(11, tithi(Shukla, 5), Observation::Midnight, 2026)
        );
    }

    #[test]
    fn midnight_reads_the_night_after_the_day() {
        // new moon at 18:30 on 19 January
        let epoch = SamplingClock::default()
            .instant(date(2026, 1, 19), Observation::Sunrise)
            .0
            + 0.5;
        let eph = ephemeris(LinearSky::new_moon_at(epoch, 299.1));
        let engine = engine(&eph);
        assert_eq!(
            Ok(date(2026, 1, 24)),
            engine.lunar_tithi(11, tithi(Shukla, 5), Observation::Sunrise, 2026)
        );
        assert_eq!(
            Ok(date(2026, 1, 23)),
            engine.lunar_tithi(11, tithi(Shukla, 5), Observation::Midnight, 2026)
        );
    }

    #[test]
    fn lunar_tithi_not_found() {
        let eph = ephemeris(stalled_sky());
        let engine = engine(&eph);
        assert_eq!(
            Err(ResolveError::NotFound {
                start: date(2025, 12, 17),
                steps: 110
            }),
            engine.lunar_tithi(11, tithi(Shukla, 5), Observation::Sunrise, 2026)
        );
    }

    #[test]
    fn solar_span() {
        let eph = ephemeris(magha_sky());
        let engine = engine(&eph);
        assert_eq!(
            Ok(date(2026, 1, 20)),
            engine.solar_span(10, SolarEvent::Star(22), 2026)
        );
        // 13 January is Krishna 10 too, but still in Dhanu
        assert_eq!(
            Ok(date(2026, 2, 12)),
            engine.solar_span(10, SolarEvent::Tithi(tithi(Krishna, 10)), 2026)
        );
        let eph = ephemeris(stalled_sky());
        assert_eq!(
            Err(ResolveError::CheckManual),
            self::engine(&eph).solar_span(10, SolarEvent::Star(1), 2026)
        );
    }

    #[test]
    fn lunar_month_star() {
        let eph = ephemeris(magha_sky());
        assert_eq!(Ok(date(2026, 1, 20)), engine(&eph).lunar_month_star(11, 22, 2026));
        let eph = ephemeris(stalled_sky());
        assert_eq!(
            Err(ResolveError::Inapplicable),
            engine(&eph).lunar_month_star(11, 1, 2026)
        );
    }

    #[test]
    fn solar_day_number() {
        let eph = ephemeris(magha_sky());
        let engine = engine(&eph);
        assert_eq!(Ok(date(2026, 1, 14)), engine.solar_day_number(10, 1, 2026));
        assert_eq!(Ok(date(2026, 1, 18)), engine.solar_day_number(10, 5, 2026));
        assert_eq!(Ok(date(2026, 2, 14)), engine.solar_day_number(11, 1, 2026));
        assert!(matches!(
            engine.solar_day_number(10, 0, 2026),
            Err(ResolveError::MalformedNumeric { .. })
        ));
    }

    #[test]
    fn civil_month_scans() {
        let eph = ephemeris(magha_sky());
        let engine = engine(&eph);
        assert_eq!(Ok(date(2026, 1, 20)), engine.civil_month_star(2026, 1, 22));
        assert_eq!(
            Ok(date(2026, 1, 23)),
            engine.civil_month_tithi(2026, 1, tithi(Shukla, 5))
        );
        let eph = ephemeris(stalled_sky());
        assert_eq!(
            Err(ResolveError::NotFound {
                start: date(2026, 2, 1),
                steps: 28
            }),
            self::engine(&eph).civil_month_star(2026, 2, 1)
        );
    }

    #[test]
    fn weekday_patterns() {
        let engine = SearchEngine::new(None, WindowConfig::default());
        let find = |m, w, o| engine.weekday_pattern(2026, m, w, o);
        assert_eq!(Ok(date(2026, 1, 4)), find(1, Weekday::Sunday, Ordinal::Nth(1)));
        assert_eq!(Ok(date(2026, 1, 30)), find(1, Weekday::Friday, Ordinal::Last));
        assert_eq!(Ok(date(2026, 2, 22)), find(2, Weekday::Sunday, Ordinal::Last));
        assert_eq!(Ok(date(2026, 2, 9)), find(2, Weekday::Monday, Ordinal::Nth(2)));
        assert_eq!(
            Err(ResolveError::NotFound {
                start: date(2026, 2, 1),
                steps: 28
            }),
            find(2, Weekday::Sunday, Ordinal::Nth(5))
        );
        assert_eq!(Err(ResolveError::Inapplicable), find(13, Weekday::Sunday, Ordinal::Nth(1)));
    }

    #[test]
    fn weekday_pattern_stays_in_month() {
        let engine = SearchEngine::new(None, WindowConfig::default());
        for month in 1..=12u8 {
            for iso in 1..=7 {
                let weekday = Weekday::from_iso(iso).unwrap();
                let first = engine
                    .weekday_pattern(2026, month, weekday, Ordinal::Nth(1))
                    .unwrap();
                let last = engine
                    .weekday_pattern(2026, month, weekday, Ordinal::Last)
                    .unwrap();
                assert_eq!((2026, i32::from(month)), (first.gregorian().0, first.gregorian().1));
                assert_eq!((2026, i32::from(month)), (last.gregorian().0, last.gregorian().1));
                assert!(first.gregorian().2 <= 7);
                assert!(last.gregorian().2 > date::days_in_month(2026, i32::from(month)) - 7);
            }
        }
    }

    #[test]
    fn weekday_before_tithi() {
        let eph = ephemeris(magha_sky());
        let engine = engine(&eph);
        // Magha full moon falls on Monday 2 February
        assert_eq!(
            Ok(date(2026, 1, 30)),
            engine.weekday_before_tithi(2026, 11, tithi(Shukla, 15), Weekday::Friday)
        );
        // the full moon's own weekday means the week before
        assert_eq!(
            Ok(date(2026, 1, 26)),
            engine.weekday_before_tithi(2026, 11, tithi(Shukla, 15), Weekday::Monday)
        );
        assert_eq!(
            Ok(date(2026, 2, 1)),
            engine.weekday_before_tithi(2026, 11, tithi(Shukla, 15), Weekday::Sunday)
        );
    }

    #[test]
    fn years_before_the_day_count_are_inapplicable() {
        let engine = SearchEngine::new(None, WindowConfig::default());
        // 1 December 4714 BC is JDN 7
        assert_eq!(Err(ResolveError::Inapplicable), engine.lunar_window(10, -4713));
        assert_eq!(Err(ResolveError::Inapplicable), engine.solar_window(8, -4713));
        assert_eq!(Err(ResolveError::Inapplicable), engine.lunar_window(1, -4713));
        let eph = ephemeris(magha_sky());
        assert_eq!(
            Err(ResolveError::Inapplicable),
            self::engine(&eph).lunar_tithi(10, tithi(Shukla, 5), Observation::Sunrise, -4713)
        );
        let window = SearchWindow {
            anchor: Date::from_jdn(u32::MAX - 2),
            steps: 10,
        };
        assert_eq!(3, window.days().count());
    }

    #[test]
    fn negative_windows_are_rejected() {
        let windows = WindowConfig {
            lunar_lead_days: -3,
            ..Default::default()
        };
        assert_eq!(
            Err(NegativeWindow {
                field: "lunar_lead_days",
                value: -3
            }),
            windows.validate()
        );
    }

    #[test]
    fn without_ephemeris() {
        let engine = SearchEngine::new(None, WindowConfig::default());
        let query = CalendarQuery::LunarTithi {
            month: 11,
            tithi: tithi(Shukla, 5),
            observation: Observation::Sunrise,
        };
        assert_eq!(Err(ResolveError::EphemerisUnavailable), engine.resolve(&query, 2026));
        let query = CalendarQuery::ExplicitDate { month: 1, day: 15 };
        assert_eq!(Ok(date(2026, 1, 15)), engine.resolve(&query, 2026));
        let query = CalendarQuery::ExplicitDate { month: 2, day: 30 };
        assert!(matches!(
            engine.resolve(&query, 2026),
            Err(ResolveError::MalformedNumeric { .. })
        ));
    }

    #[test]
    fn ephemeris_failure_is_an_error_not_a_panic() {
        let sky = LinearSky {
            span: 5.0,
            ..magha_sky()
        };
        let eph = ephemeris(sky);
        let result = engine(&eph).lunar_tithi(11, tithi(Shukla, 5), Observation::Sunrise, 2026);
        assert!(matches!(result, Err(ResolveError::Ephemeris(_))));
    }

    #[test]
    fn scenario_magha_shukla_panchami_2026() {
        let eph = Ephemeris::open(&EphemerisSource::Analytic, ObserverLocation::UDUPI).unwrap();
        let engine = engine(&eph);
        let query = CalendarQuery::LunarTithi {
            month: 11,
            tithi: tithi(Shukla, 5),
            observation: Observation::Sunrise,
        };
        let first = engine.resolve(&query, 2026).unwrap();
        assert_eq!(date(2026, 1, 23), first);
        assert_eq!(Ok(first), engine.resolve(&query, 2026));
    }
}
