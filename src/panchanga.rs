//! Lunar days, stars and months.
//!
//! The pure functions here turn a pair of longitudes into the traditional
//! calendar quantities. [`Almanac`] binds them to an [`Ephemeris`] and to the
//! local clock at which each quantity is read off.

use serde::Deserialize;

use crate::astro::{Ayanamsa, Ephemeris, EphemerisError, normalize_degrees};
use crate::date::Date;
use crate::time_scales::Ut;

/// Width of one tithi in degrees of Moon–Sun separation.
pub const TITHI_SPAN: f64 = 12.0;
/// Width of one nakshatra, 13°20′.
pub const NAKSHATRA_SPAN: f64 = 360.0 / 27.0;

/// Lunar day `1..=30` from tropical (or equally offset sidereal) longitudes.
///
/// # Example
///
/// ```
/// use seva_calendar::panchanga::tithi_index;
///
/// assert_eq!(1, tithi_index(100.0, 105.0));
/// assert_eq!(15, tithi_index(100.0, 280.0 - 0.1));
/// assert_eq!(30, tithi_index(100.0, 99.9));
/// ```
pub fn tithi_index(sun: f64, moon: f64) -> u8 {
    let angle = normalize_degrees(moon - sun);
    ((angle / TITHI_SPAN) as u8 + 1).min(30)
}

/// Nakshatra `1..=27` (Ashwini first) of a sidereal longitude.
pub fn nakshatra_index(sidereal_lon: f64) -> u8 {
    ((normalize_degrees(sidereal_lon) / NAKSHATRA_SPAN) as u8 + 1).min(27)
}

/// Zodiac sign `0..=11` (Aries first) of a sidereal longitude.
pub fn zodiac_index(sidereal_lon: f64) -> u8 {
    ((normalize_degrees(sidereal_lon) / 30.0) as u8).min(11)
}

/// Lunar month `1..=12` (Chaitra first) opened by a new moon with the Sun in
/// the sidereal sign `zodiac`.
///
/// The month takes its name from the sign two ahead of the one the Sun
/// occupies at the opening conjunction: a new moon in Pisces opens Chaitra.
///
/// # Example
///
/// ```
/// use seva_calendar::panchanga::lunar_month_from_sign;
///
/// assert_eq!(1, lunar_month_from_sign(11)); // Pisces: Chaitra
/// assert_eq!(11, lunar_month_from_sign(9)); // Capricorn: Magha
/// assert_eq!(12, lunar_month_from_sign(10)); // Aquarius: Phalguna
/// ```
pub fn lunar_month_from_sign(zodiac: u8) -> u8 {
    match (zodiac + 2) % 12 {
        0 => 12,
        m => m,
    }
}

/// The moment of a day at which a quantity is read.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Observation {
    /// Local sunrise, as a fixed clock hour.
    #[default]
    Sunrise,
    /// Local midnight closing the day, the middle of its night.
    Midnight,
}

/// Local clock hours for each [`Observation`], plus the late-morning
/// instant the lunar month is read at.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SamplingClock {
    /// Minutes east of UTC.
    pub timezone_offset_minutes: i32,
    pub sunrise_hour: f64,
    /// Counted from the start of the day, so `24.0` is the midnight that
    /// ends it.
    pub midnight_hour: f64,
    pub reference_hour: f64,
}

impl SamplingClock {
    pub fn instant(&self, date: Date, observation: Observation) -> Ut {
        let hour = match observation {
            Observation::Sunrise => self.sunrise_hour,
            Observation::Midnight => self.midnight_hour,
        };
        Ut::at_local(date, hour, self.timezone_offset_minutes)
    }

    pub fn reference(&self, date: Date) -> Ut {
        Ut::at_local(date, self.reference_hour, self.timezone_offset_minutes)
    }
}

impl Default for SamplingClock {
    /// Indian standard time; sunrise 06:30, reference 10:30, midnight at
    /// the end of the day.
    fn default() -> Self {
        Self {
            timezone_offset_minutes: 330,
            sunrise_hour: 6.5,
            midnight_hour: 24.0,
            reference_hour: 10.5,
        }
    }
}

/// Calendar quantities of civil days, read from an ephemeris.
#[derive(Debug, Copy, Clone)]
pub struct Almanac<'e> {
    ephemeris: &'e Ephemeris,
    ayanamsa: Ayanamsa,
    clock: SamplingClock,
}

impl<'e> Almanac<'e> {
    pub fn new(ephemeris: &'e Ephemeris, ayanamsa: Ayanamsa, clock: SamplingClock) -> Self {
        Self {
            ephemeris,
            ayanamsa,
            clock,
        }
    }

    /// Tithi `1..=30` in force at the observation instant of `date`.
    pub fn tithi(&self, date: Date, observation: Observation) -> Result<u8, EphemerisError> {
        let p = self.ephemeris.positions(self.clock.instant(date, observation))?;
        Ok(tithi_index(p.sun, p.moon))
    }

    /// Nakshatra `1..=27` of the Moon at the observation instant of `date`.
    pub fn nakshatra(&self, date: Date, observation: Observation) -> Result<u8, EphemerisError> {
        let p = self.ephemeris.positions(self.clock.instant(date, observation))?;
        Ok(nakshatra_index(self.ayanamsa.sidereal(p.moon)))
    }

    /// Solar month `1..=12` (Mesha first) at the observation instant of `date`.
    pub fn solar_month(&self, date: Date, observation: Observation) -> Result<u8, EphemerisError> {
        let p = self.ephemeris.positions(self.clock.instant(date, observation))?;
        Ok(zodiac_index(self.ayanamsa.sidereal(p.sun)) + 1)
    }

    /// Lunar month `1..=12` (Chaitra first) that `date` belongs to.
    ///
    /// The preceding new moon is estimated by walking back one day per
    /// tithi elapsed at the reference instant; the Sun's sign at that moment
    /// names the month.
    pub fn lunar_month(&self, date: Date) -> Result<u8, EphemerisError> {
        let reference = self.clock.reference(date);
        let p = self.ephemeris.positions(reference)?;
        let days_since_new_moon = normalize_degrees(p.moon - p.sun) / TITHI_SPAN;
        let new_moon = self
            .ephemeris
            .positions(Ut(reference.0 - days_since_new_moon))?;
        let month = lunar_month_from_sign(zodiac_index(self.ayanamsa.sidereal(new_moon.sun)));
        log::trace!("lunar month of {date}: {month} ({days_since_new_moon:.2} days after new moon)");
        Ok(month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astro::testing::LinearSky;
    use crate::astro::{EphemerisSource, ObserverLocation};

    #[test]
    fn tithi_boundaries() {
        assert_eq!(1, tithi_index(0.0, 0.0));
        assert_eq!(2, tithi_index(0.0, 12.0));
        assert_eq!(15, tithi_index(0.0, 179.9));
        assert_eq!(16, tithi_index(0.0, 180.0));
        assert_eq!(30, tithi_index(10.0, 359.0));
        for i in 0..360 {
            let t = tithi_index(123.0, 123.0 + i as f64 + 0.5);
            assert!((1..=30).contains(&t));
        }
    }

    #[test]
    fn star_and_sign_boundaries() {
        assert_eq!(1, nakshatra_index(0.0));
        assert_eq!(2, nakshatra_index(NAKSHATRA_SPAN));
        assert_eq!(27, nakshatra_index(359.99));
        assert_eq!(0, zodiac_index(29.99));
        assert_eq!(1, zodiac_index(30.0));
        assert_eq!(11, zodiac_index(359.99));
    }

    #[test]
    fn month_from_every_sign() {
        let months: Vec<u8> = (0..12).map(lunar_month_from_sign).collect();
        assert_eq!(vec![2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 1], months);
    }

    #[test]
    fn sampling_clock() {
        let clock = SamplingClock::default();
        let date = Date::from_gregorian(2026, 1, 23).unwrap();
        let sunrise = clock.instant(date, Observation::Sunrise);
        let midnight = clock.instant(date, Observation::Midnight);
        assert!((midnight.0 - sunrise.0 - 17.5 / 24.0).abs() < 1e-9);
        let next = clock.instant(date + 1, Observation::Sunrise);
        assert!(midnight.0 < next.0 && next.0 - midnight.0 < 0.3);
        // 06:30 IST = 01:00 UTC
        assert!((sunrise.0 - (date.jd_midnight() + 1.0 / 24.0)).abs() < 1e-9);
        assert!((clock.reference(date).0 - sunrise.0 - 4.0 / 24.0).abs() < 1e-9);
    }

    #[test]
    fn linear_sky_quantities() {
        let date = Date::from_gregorian(2026, 1, 10).unwrap();
        let clock = SamplingClock::default();
        // conjunction six hours before sunrise, Sun at sidereal 280°
        let epoch = clock.instant(date, Observation::Sunrise).0;
        let sky = LinearSky::new_moon_at(epoch - 0.25, 304.1);
        let eph = Ephemeris::with_provider(Box::new(sky), ObserverLocation::UDUPI).unwrap();
        let almanac = Almanac::new(&eph, Ayanamsa::DEFAULT, clock);
        assert_eq!(1, almanac.tithi(date, Observation::Sunrise).unwrap());
        assert_eq!(5, almanac.tithi(date + 4, Observation::Sunrise).unwrap());
        assert_eq!(30, almanac.tithi(date - 1, Observation::Sunrise).unwrap());
        assert_eq!(10, almanac.solar_month(date, Observation::Sunrise).unwrap());
        assert_eq!(11, almanac.lunar_month(date).unwrap());
        assert_eq!(11, almanac.lunar_month(date + 20).unwrap());
        // Moon at sidereal 283.2°: Shravana
        let star = almanac.nakshatra(date, Observation::Sunrise).unwrap();
        assert_eq!(22, star);
    }

    #[test]
    fn magha_2026_real_sky() {
        let eph = Ephemeris::open(&EphemerisSource::Analytic, ObserverLocation::UDUPI).unwrap();
        let almanac = Almanac::new(&eph, Ayanamsa::DEFAULT, SamplingClock::default());
        let date = Date::from_gregorian(2026, 1, 23).unwrap();
        assert_eq!(5, almanac.tithi(date, Observation::Sunrise).unwrap());
        assert_eq!(4, almanac.tithi(date - 1, Observation::Sunrise).unwrap());
        assert_eq!(11, almanac.lunar_month(date).unwrap());
        assert_eq!(10, almanac.solar_month(date, Observation::Sunrise).unwrap());
    }
}
