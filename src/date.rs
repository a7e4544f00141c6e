//! Calendar-independant date.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize, Serializer};

/// A calendar-independant date.
///
/// Supported range begins from January 1, 4713 BC, proleptic Julian calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    jdn: u32,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub fn from_jdn(jdn: u32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> u32 {
        self.jdn
    }

    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc.
    ///
    /// Returns `None` if `month` or `day` does not name a real day of that
    /// year (e.g. February 30), or if the result is out of supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use seva_calendar::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// assert_eq!(None, Date::from_gregorian(2026, 2, 29));
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Option<Self> {
        if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
            return None;
        }
        let (y, m, d) = (i64::from(year), i64::from(month), i64::from(day));
        u32::try_from(
            (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
                - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
                + d
                - 32075,
        )
        .map(Self::from_jdn)
        .ok()
    }
    /// Represents the date in Gregorian calendar.
    ///
    /// Returns in `(year, month, day)` format.
    ///
    /// # Example
    ///
    /// ```
    /// use seva_calendar::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, i32, i32) {
        let jdn = i64::from(self.jdn);
        let f = jdn + 1401 + (((4 * jdn + 274277) / 146097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        (year as i32, month as i32, day as i32)
    }
    /// The date `days` later, or `None` outside the supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use seva_calendar::Date;
    ///
    /// let date = Date::from_jdn(10);
    /// assert_eq!(Some(Date::from_jdn(25)), date.checked_add_days(15));
    /// assert_eq!(None, date.checked_add_days(-15));
    /// assert_eq!(None, Date::from_jdn(u32::MAX).checked_add_days(1));
    /// ```
    pub fn checked_add_days(self, days: i32) -> Option<Self> {
        self.jdn.checked_add_signed(days).map(Self::from_jdn)
    }
    /// The date `days` earlier, or `None` outside the supported range.
    pub fn checked_sub_days(self, days: i32) -> Option<Self> {
        self.checked_add_days(days.checked_neg()?)
    }

    /// Returns the day of week of the date, in ISO-8601 numbering (i.e.
    /// `1..=7` for Monday through Sunday)
    ///
    /// # Example
    ///
    /// ```
    /// use seva_calendar::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(6, date.day_of_week()); // Saturday
    /// ```
    pub fn day_of_week(&self) -> i32 {
        (self.jdn % 7 + 1) as i32
    }
    /// Returns the day of week as a [`Weekday`].
    pub fn weekday(&self) -> Weekday {
        Weekday::from_iso(self.day_of_week()).unwrap_or(Weekday::Monday)
    }

    /// Julian date of 00:00 UT on this day.
    pub fn jd_midnight(&self) -> f64 {
        self.jdn as f64 - 0.5
    }

    /// The first day of the given Gregorian month.
    pub fn first_of_month(year: i32, month: i32) -> Option<Self> {
        Self::from_gregorian(year, month, 1)
    }
    /// The last day of the given Gregorian month.
    pub fn last_of_month(year: i32, month: i32) -> Option<Self> {
        Self::from_gregorian(year, month, days_in_month(year, month))
    }
}

/// Dates are written day first, the way the observance sheets write them.
///
/// ```
/// use seva_calendar::Date;
///
/// let date = Date::from_gregorian(2026, 1, 23).unwrap();
/// assert_eq!("23-01-2026", date.to_string());
/// ```
impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (y, m, d) = self.gregorian();
        write!(f, "{:02}-{:02}-{:04}", d, m, y)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// # Panics
///
/// Panics when the result leaves the supported range; see
/// [`Date::checked_add_days`].
impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(if rhs >= 0 {
            self.jdn + rhs as u32
        } else {
            self.jdn - rhs.wrapping_neg() as u32
        })
    }
}
impl Sub<i32> for Date {
    type Output = Date;
    fn sub(self, rhs: i32) -> Self::Output {
        self + rhs.wrapping_neg()
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn as i32 - rhs.jdn as i32
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

/// Number of days in a Gregorian month, `0` if `month` is not in `1..=12`.
pub fn days_in_month(year: i32, month: i32) -> i32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => 28 + YearType::from_gregorian(year).is_leap() as i32,
        _ => 0,
    }
}

/// Day of the week, Monday first as in ISO 8601.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(alias = "monday")]
    Monday,
    #[serde(alias = "tuesday")]
    Tuesday,
    #[serde(alias = "wednesday")]
    Wednesday,
    #[serde(alias = "thursday")]
    Thursday,
    #[serde(alias = "friday")]
    Friday,
    #[serde(alias = "saturday")]
    Saturday,
    #[serde(alias = "sunday")]
    Sunday,
}

impl Weekday {
    /// From ISO numbering, `1` (Monday) to `7` (Sunday).
    pub fn from_iso(num: i32) -> Option<Self> {
        use Weekday::*;
        Some(match num {
            1 => Monday,
            2 => Tuesday,
            3 => Wednesday,
            4 => Thursday,
            5 => Friday,
            6 => Saturday,
            7 => Sunday,
            _ => return None,
        })
    }
}
