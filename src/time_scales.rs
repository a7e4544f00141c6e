//! Deals with different time scales, specifically, conversion from UT (the
//! civil clock the observance sheets are written in) into TT, the scale the
//! analytic Sun and Moon theories run on.
//!
//! Only conversions necessary for other computations in this crate are
//! included.

use crate::date::Date;

/// [Terrestrial time](https://en.wikipedia.org/wiki/Terrestrial_Time),
/// represented in Julian date (JD).
///
/// Note: TT differs no more than centiseconds from TDB during thousands of
/// years, so the ephemeris code treats them numerically the same.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tt(pub f64);

impl From<Tai> for Tt {
    fn from(tai: Tai) -> Tt {
        Tt(tai.0 + 32.184 / 86400.0)
    }
}

impl From<Ut> for Tt {
    fn from(ut: Ut) -> Tt {
        Tt(ut.0 + ut.delta_t() / 86400.0)
    }
}

/// [International atomic time](https://en.wikipedia.org/wiki/International_Atomic_Time),
/// represented in Julian date (JD).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tai(pub f64);

impl From<Tt> for Tai {
    fn from(tt: Tt) -> Tai {
        Tai(tt.0 - 32.184 / 86400.0)
    }
}

/// [Universal time](https://en.wikipedia.org/wiki/Universal_Time), the actual
/// civil time used for determining the actual date at a given time point.
///
/// This can be either UTC (coordinated universal time, based on TAI with leap
/// seconds) or UT1 (mean solar time on the Prime Meridian) depending on the
/// year. Specifically, UTC from 1972-01-01T00:00Z to the latest known leap
/// second, UT1 otherwise.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Ut(pub f64);

impl Ut {
    /// The instant at `local_hour` (hours after local midnight) on `date`, in
    /// a timezone ahead (east) of UTC by `tz_offset_minutes` minutes.
    ///
    /// # Example
    ///
    /// ```
    /// use seva_calendar::Date;
    /// use seva_calendar::time_scales::Ut;
    ///
    /// // 06:30 IST is 01:00 UTC
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// let ut = Ut::at_local(date, 6.5, 330);
    /// assert!((ut.0 - 2451544.541_666_7).abs() < 1e-6);
    /// ```
    pub fn at_local(date: Date, local_hour: f64, tz_offset_minutes: i32) -> Self {
        Ut(date.jd_midnight() + (local_hour * 60.0 - tz_offset_minutes as f64) / 1440.0)
    }

    /// Returns the date at the time point in timezone ahead (east) of UTC by
    /// `tz_offset_minutes` minutes.
    ///
    /// For Indian standard time (UTC+5:30), `tz_offset_minutes` should be +330.
    ///
    /// # Example
    ///
    /// ```
    /// use seva_calendar::time_scales::Ut;
    /// let ut = Ut(2451544.3);
    /// assert_eq!((1999, 12, 31), ut.date_in_timezone(0).gregorian());
    /// assert_eq!((2000, 1, 1), ut.date_in_timezone(330).gregorian());
    /// ```
    pub fn date_in_timezone(&self, tz_offset_minutes: i32) -> Date {
        let jdn = (self.0 + tz_offset_minutes as f64 / 1440.0).round() as u32;
        Date::from_jdn(jdn)
    }

    /// ΔT = TT − UT in seconds.
    ///
    /// Exact (from the leap-second table) while UTC is defined and the table
    /// is current, extrapolated with a smooth long-term model otherwise.
    pub fn delta_t(&self) -> f64 {
        let data = &*leap_seconds::DATA;
        if self.0 < data.starts {
            return leap_seconds::estimate(self.0) + data.c1;
        } else if self.0 > data.expires {
            return leap_seconds::estimate(self.0) + data.c2;
        }
        let tai_minus_utc = match data.leap_seconds.partition_point(|ls| ls.utc <= self.0) {
            0 => 10,
            i => data.leap_seconds[i - 1].tai_minus_utc,
        };
        tai_minus_utc as f64 + 32.184
    }
}

mod leap_seconds {
    use crate::date::Date;

    /// Last days of UTC months followed by a positive leap second.
    pub const DATES: &[(i32, i32, i32)] = &[
        (1972, 6, 30),
        (1972, 12, 31),
        (1973, 12, 31),
        (1974, 12, 31),
        (1975, 12, 31),
        (1976, 12, 31),
        (1977, 12, 31),
        (1978, 12, 31),
        (1979, 12, 31),
        (1981, 6, 30),
        (1982, 6, 30),
        (1983, 6, 30),
        (1985, 6, 30),
        (1987, 12, 31),
        (1989, 12, 31),
        (1990, 12, 31),
        (1992, 6, 30),
        (1993, 6, 30),
        (1994, 6, 30),
        (1995, 12, 31),
        (1997, 6, 30),
        (1998, 12, 31),
        (2005, 12, 31),
        (2008, 12, 31),
        (2012, 6, 30),
        (2015, 6, 30),
        (2016, 12, 31),
    ];
    pub const DATE_STARTS: (i32, i32, i32) = (1972, 1, 1);
    pub const DATE_EXPIRES: (i32, i32, i32) = (2025, 12, 31);

    #[derive(Debug, Clone)]
    pub struct Data {
        /// JD (UTC) of the start of the UTC leap-second era
        pub starts: f64,
        pub leap_seconds: Vec<LeapSecond>,
        /// JD (UTC) after which no leap second is announced
        pub expires: f64,
        /// offsets keeping the extrapolation continuous at both ends
        pub c1: f64,
        pub c2: f64,
    }
    #[derive(Debug, Clone)]
    pub struct LeapSecond {
        /// JD (UTC) from which `tai_minus_utc` applies
        pub utc: f64,
        pub tai_minus_utc: i32,
    }

    fn midnight_after((y, m, d): (i32, i32, i32)) -> f64 {
        Date::from_gregorian(y, m, d)
            .map(|date| date.jd_midnight() + 1.0)
            .unwrap_or(f64::NAN)
    }

    fn compute() -> Data {
        let leap_seconds: Vec<_> = (11..)
            .zip(DATES)
            .map(|(tai_minus_utc, &date)| LeapSecond {
                utc: midnight_after(date),
                tai_minus_utc,
            })
            .collect();
        let starts = midnight_after(DATE_STARTS) - 1.0;
        let expires = midnight_after(DATE_EXPIRES);
        let final_offset = 10 + DATES.len() as i32;
        Data {
            starts,
            leap_seconds,
            expires,
            c1: 10.0 + 32.184 - estimate(starts),
            c2: final_offset as f64 + 32.184 - estimate(expires),
        }
    }

    lazy_static::lazy_static! {
        pub static ref DATA: Data = compute();
    }

    /// Long-term parabolic ΔT model with a decadal fluctuation term, good to
    /// within a minute or so over the past few centuries once anchored by the
    /// continuity offsets.
    pub fn estimate(jd: f64) -> f64 {
        use std::f64::consts::PI;
        let y = (jd - 2451544.5) / 365.2425 + 2000.0;
        let t = (y - 1825.0) / 100.0;
        31.4115 * t * t + 284.8435805251424 * (2.0 * PI * (t + 0.75) / 14.0).cos()
    }
}
