//! The 1st (朔) and 15th (望) days of every month of a Chinese lunar year,
//! labelled in traditional form and served as JSON over HTTP.
//!
//! New moons and solar terms are computed from closed-form astronomy and laid
//! out into the modern Chinese lunisolar calendar for lunar years 1900–2100.
//! Dates are divided in a fixed civil offset, Beijing time by default.
//!
//! # Examples
//!
//! Basic usage with [`Date`]:
//!
//! ```
//! use shuowang::Date;
//!
//! let date = Date::from_gregorian(2000, 1, 1).unwrap();
//!
//! assert_eq!(2451545, date.jdn());
//! assert_eq!("2000-01-01", date.to_string());
//! ```
//!
//! Chinese lunisolar calendar:
//!
//! ```
//! use shuowang::Date;
//! use shuowang::chinese::{Annus, LunarDate, Month::*, BEIJING_OFFSET_MINUTES};
//!
//! let date = Date::from_gregorian(2000, 1, 1).unwrap();
//! let annus = Annus::from_date(date, BEIJING_OFFSET_MINUTES).unwrap();
//!
//! assert_eq!(Ok(LunarDate { year: 1999, month: Common(11), day: 25 }), annus.ymd_for(date));
//! ```
//!
//! The table of a lunar year:
//!
//! ```
//! use shuowang::chinese::ChineseCalendar;
//!
//! let entries = shuowang::table::build(&ChineseCalendar::default(), 2023).unwrap();
//!
//! assert_eq!(26, entries.len());
//! assert_eq!("癸卯年閏二月十五", entries[5].label);
//! ```

pub mod chinese;
pub mod date;
pub mod error;
pub mod server;
pub mod table;
pub mod time_scales;

pub use date::{Date, YearType};
pub use error::ConversionError;
pub use table::LunarDateEntry;
