//! Error types for lunar calendar conversion.

use crate::chinese::Month;

/// Error returned when the lunar calendar cannot resolve a date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Returned when the lunar year lies outside the computable range.
    #[error("lunar year {year} is not supported")]
    UnsupportedYear {
        /// The rejected year.
        year: i32,
    },

    /// Returned when a Gregorian date lies outside the computable range.
    #[error("date {date} is not supported")]
    UnsupportedDate {
        /// The rejected date, as `YYYY-MM-DD`.
        date: String,
    },

    /// Returned when the requested month does not occur in the year, e.g. a
    /// leap month in a year without one.
    #[error("lunar year {year} has no month {month}")]
    NoSuchMonth {
        /// Lunar year searched.
        year: i32,
        /// Month requested.
        month: Month,
    },

    /// Returned when the day is past the end of the month.
    #[error("{month} of lunar year {year} has {length} days, got day {day}")]
    NoSuchDay {
        /// Lunar year searched.
        year: i32,
        /// Month searched.
        month: Month,
        /// Day requested.
        day: u32,
        /// Number of days in the month.
        length: u32,
    },

    /// Returned when the UTC offset is not within a day of UTC.
    #[error("UTC offset must be within ±1439 minutes, got {minutes}")]
    InvalidOffset {
        /// The rejected offset.
        minutes: i32,
    },

    /// Returned when the computed ephemeris does not yield 12 or 13 months
    /// between two winter solstices.
    #[error("{months} months between winter solstices of annus {annus}")]
    InconsistentEphemeris {
        /// The 歲 being laid out.
        annus: i32,
        /// The number of months found.
        months: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_unsupported_year() {
        let e = ConversionError::UnsupportedYear { year: 1800 };
        assert_eq!(e.to_string(), "lunar year 1800 is not supported");
    }

    #[test]
    fn error_no_such_month() {
        let e = ConversionError::NoSuchMonth {
            year: 2024,
            month: Month::Leap(6),
        };
        assert_eq!(e.to_string(), "lunar year 2024 has no month 闰六月");
    }

    #[test]
    fn error_no_such_day() {
        let e = ConversionError::NoSuchDay {
            year: 2023,
            month: Month::Common(1),
            day: 30,
            length: 29,
        };
        assert_eq!(
            e.to_string(),
            "正月 of lunar year 2023 has 29 days, got day 30"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<ConversionError>();
    }
}
