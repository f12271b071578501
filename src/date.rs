//! Calendar-independant date.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Serialize, Serializer};

/// A calendar-independant date, counted in Julian day numbers.
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

    /// Creates a `Date` from a proleptic Gregorian calendar date.
    ///
    /// Returns `None` if the fields do not name a real day, or if the result
    /// is out of supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use shuowang::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// assert!(Date::from_gregorian(2023, 2, 29).is_none());
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Option<Self> {
        if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
            return None;
        }
        let (y, m, d) = (year, month, day);
        u32::try_from(
            (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
                - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
                + d
                - 32075,
        )
        .map(Self::from_jdn)
        .ok()
    }
    /// Represents the date in Gregorian calendar, as `(year, month, day)`.
    ///
    /// # Example
    ///
    /// ```
    /// use shuowang::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, i32, i32) {
        let jdn = i32::try_from(self.jdn).expect("jdn >= 2**31 not supported");
        let f = jdn + 1401 + (((4 * jdn + 274277) / 146097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        (year, month, day)
    }
    /// Formats the date as an ISO 8601 calendar date (`YYYY-MM-DD`).
    ///
    /// # Example
    ///
    /// ```
    /// use shuowang::Date;
    ///
    /// let date = Date::from_gregorian(2023, 1, 22).unwrap();
    /// assert_eq!("2023-01-22", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (y, m, d) = self.gregorian();
        write!(f, "{:04}-{:02}-{:02}", y, m, d)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(self.jdn.saturating_add_signed(rhs))
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

fn days_in_month(year: i32, month: i32) -> i32 {
    match month {
        2 => 28 + YearType::from_gregorian(year).is_leap() as i32,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_gregorian() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(2440588, date.jdn());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(2459466, date.jdn());
    }

    #[test]
    fn rejects_impossible_days() {
        assert_eq!(None, Date::from_gregorian(2023, 13, 1));
        assert_eq!(None, Date::from_gregorian(2023, 4, 31));
        assert_eq!(None, Date::from_gregorian(1900, 2, 29));
        assert!(Date::from_gregorian(2000, 2, 29).is_some());
    }

    #[test]
    fn to_gregorian() {
        let date = Date::from_jdn(2440588);
        assert_eq!((1970, 1, 1), date.gregorian());
        let date = Date::from_jdn(2459466);
        assert_eq!((2021, 9, 8), date.gregorian());
        let date = Date::from_jdn(2451545);
        assert_eq!((2000, 1, 1), date.gregorian());
    }

    #[test]
    fn arithmetic() {
        let date = Date::from_gregorian(2023, 12, 31).unwrap();
        assert_eq!("2024-01-01", (date + 1).iso_gregorian());
        assert_eq!("2023-12-17", (date + -14).iso_gregorian());
        assert_eq!(14, date - (date + -14));
    }

    #[test]
    fn iso_format() {
        assert_eq!(
            "2021-09-08",
            Date::from_gregorian(2021, 9, 8).unwrap().iso_gregorian()
        );
        assert_eq!(
            "0987-03-04",
            Date::from_gregorian(987, 3, 4).unwrap().to_string()
        );
    }

    #[test]
    fn serializes_as_iso_string() {
        let date = Date::from_gregorian(2024, 2, 10).unwrap();
        assert_eq!("\"2024-02-10\"", serde_json::to_string(&date).unwrap());
    }
}
