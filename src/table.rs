//! The table of 朔 (1st) and 望 (15th) days of a lunar year.
//!
//! [`build`] walks lunar months 1 through 12, resolving the 1st and 15th day
//! of each, plus those of the leap month when the month repeats. Each day gets
//! a label such as `癸卯年閏二月十五`.
//!
//! # Example
//!
//! ```
//! use shuowang::chinese::ChineseCalendar;
//! use shuowang::table;
//!
//! let entries = table::build(&ChineseCalendar::default(), 2024).unwrap();
//!
//! assert_eq!(24, entries.len());
//! assert_eq!("2024-02-10", entries[0].date.iso_gregorian());
//! assert_eq!("甲辰年正月初一", entries[0].label);
//! ```

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::chinese::{self, LunarCalendar, LunarDate, Month};
use crate::date::Date;
use crate::error::ConversionError;

/// A Gregorian date with its traditional lunar label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LunarDateEntry {
    /// Serialized as `YYYY-MM-DD`.
    pub date: Date,
    #[serde(rename = "lunar")]
    pub label: String,
}

/// The parts of a label: `{year}年{month}{day}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Sexagenary year name, e.g. `癸卯`.
    pub year: String,
    /// Normalized month name, e.g. `閏二月`.
    pub month: String,
    /// Day name, e.g. `十五`.
    pub day: String,
}

impl Label {
    /// Labels `lunar`, naming the year and month after `head`, the lunar
    /// date of the month's first day.
    pub fn new(head: &LunarDate, lunar: &LunarDate) -> Self {
        Label {
            year: chinese::fmt::sexagenary_year(head.year),
            month: chinese::fmt::normalize_month(&head.month_name()),
            day: lunar.day_name(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}年{}{}", self.year, self.month, self.day)
    }
}

/// Builds the table for lunar year `year`: 24 entries, or 26 when the year
/// has a leap month.
///
/// Entries follow lunar month order, a leap month right after the month it
/// repeats. The first conversion failure aborts the whole table.
pub fn build<C>(calendar: &C, year: i32) -> Result<Vec<LunarDateEntry>, ConversionError>
where
    C: LunarCalendar + ?Sized,
{
    let mut entries = Vec::with_capacity(26);
    for num in 1..=12 {
        let [first, fifteenth] = month_entries(calendar, year, Month::Common(num))?;
        let is_leap = calendar.is_leap_month(first.date, num)?;
        entries.push(first);
        entries.push(fifteenth);
        if is_leap {
            debug!(year, month = num, "leap month");
            entries.extend(month_entries(calendar, year, Month::Leap(num))?);
        }
    }
    Ok(entries)
}

/// Entries for the 1st and 15th day of `month`.
fn month_entries<C>(
    calendar: &C,
    year: i32,
    month: Month,
) -> Result<[LunarDateEntry; 2], ConversionError>
where
    C: LunarCalendar + ?Sized,
{
    let first = calendar.resolve_gregorian(year, month, 1)?;
    let fifteenth = calendar.resolve_gregorian(year, month, 15)?;
    let first_lunar = calendar.lunar_date(first)?;
    let fifteenth_lunar = calendar.lunar_date(fifteenth)?;
    debug!(year, %month, %first, %fifteenth, "resolved month");

    Ok([
        LunarDateEntry {
            date: first,
            label: Label::new(&first_lunar, &first_lunar).to_string(),
        },
        LunarDateEntry {
            date: fifteenth,
            label: Label::new(&first_lunar, &fifteenth_lunar).to_string(),
        },
    ])
}
