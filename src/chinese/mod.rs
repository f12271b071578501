//! Chinese calendar
//!
//! Note: 為方便處理諸多術語，本模塊文檔用中文。
//!
//! 本程序以即時推算的朔與節氣編排夏曆，見 [`ephemeris`]。日期依固定的民用時區劃分，預設為北京時間（UTC+8）。

use std::fmt::{self as std_fmt, Display};
use std::ops::RangeInclusive;

use crate::date::Date;
use crate::error::ConversionError;
use crate::time_scales::{Tdb, Ut};

pub mod ephemeris;
pub mod fmt;

/// 支持的農曆年。每年須用到本歲及次歲的曆表，見 [`ephemeris::SUPPORTED_ANNI`]。
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1900..=2100;

/// 北京時間與 UTC 相差的分鐘數
pub const BEIJING_OFFSET_MINUTES: i32 = 480;

/// 「歲」，相鄰兩冬至間的時段，或自冬至所在月（十一月）至下一冬至所在月前月（十月或閏十月）的時段。
///
/// 注意：「歲」與「年」在曆法上不同，年以正月為首，但曆法編算須以兩冬至間的「歲」為基礎，本程序亦以「歲」編排，並依日期計算所在「年」。
///
/// # 用例
///
/// ```
/// use shuowang::Date;
/// use shuowang::chinese::{Annus, LunarDate, Month::*, BEIJING_OFFSET_MINUTES};
///
/// let date = Date::from_gregorian(2000, 1, 1).unwrap();
/// let annus = Annus::from_date(date, BEIJING_OFFSET_MINUTES).unwrap();
///
/// assert_eq!(Ok(LunarDate { year: 1999, month: Common(11), day: 25 }), annus.ymd_for(date));
/// ```
#[derive(Debug, Clone)]
pub struct Annus {
    /// 序號，為該歲大部分時段所在的公元年
    pub annus: i32,
    /// 全部月首，包括次一歲首月用以標記本歲最末日
    pub months: Vec<NewMoon>,
}
/// 月首信息
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct NewMoon {
    /// 月名
    pub month: Month,
    /// 月首所在日期
    pub date: Date,
}
/// 月名，`Common` 為平月，`Leap` 為閏月。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Month {
    Common(u32),
    Leap(u32),
}
impl Month {
    /// 取得月序號，無論平閏。
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// 閏月為 `true`，平月為 `false`
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
    /// 取得月名的文本形式，十一、十二月稱「冬月」「腊月」。
    pub fn name(&self) -> String {
        fmt::month(*self)
    }
}
impl Display for Month {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        f.write_str(&self.name())
    }
}

/// 農曆日期，`year` 為該日所在農曆年，以其正月所在公元年表示。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct LunarDate {
    pub year: i32,
    pub month: Month,
    pub day: u32,
}
impl LunarDate {
    /// 月名，如「闰二月」「腊月」。
    pub fn month_name(&self) -> String {
        self.month.name()
    }
    /// 日名，如「初一」「十五」。
    pub fn day_name(&self) -> String {
        fmt::day(self.day)
    }
}

impl Annus {
    /// 取得與公元 `annus` 年對應的歲，日期按東於 UTC `utc_offset_minutes` 分鐘的時區劃分。
    ///
    /// 若不能推算該歲則回報 [`ConversionError::UnsupportedYear`]。
    ///
    /// # 用例
    ///
    /// ```
    /// use shuowang::chinese::{Annus, BEIJING_OFFSET_MINUTES};
    ///
    /// let annus = Annus::new(2000, BEIJING_OFFSET_MINUTES).unwrap();
    /// assert_eq!(13, annus.months.len());
    /// ```
    pub fn new(annus: i32, utc_offset_minutes: i32) -> Result<Self, ConversionError> {
        use Month::*;

        let ephemeris = ephemeris::Annus::compute(annus)
            .ok_or(ConversionError::UnsupportedYear { year: annus })?;
        let to_date = |tdb: Tdb| civil_date(tdb, utc_offset_minutes);
        let new_moon_dates: Vec<_> = ephemeris.new_moon.iter().copied().map(to_date).collect();
        let ws = to_date(ephemeris.solar_term[0]);
        let ws_next = to_date(ephemeris.solar_term[24]);
        // 冬至所在月即十一月，朔與冬至同日者亦然
        let m11_idx = new_moon_dates.partition_point(|date| date <= &ws) - 1;
        let m11n_idx = new_moon_dates.partition_point(|date| date <= &ws_next) - 1;
        let mut needs_leap = match m11n_idx - m11_idx {
            12 => false,
            13 => true,
            n => {
                return Err(ConversionError::InconsistentEphemeris { annus, months: n });
            }
        };

        let mut months = Vec::with_capacity(m11n_idx - m11_idx + 1);
        let mut month = 10;
        let mut term = 0;
        for i in m11_idx..=m11n_idx {
            // 無中氣之月為閏月
            if needs_leap && new_moon_dates[i + 1] <= to_date(ephemeris.solar_term[term]) {
                months.push(NewMoon {
                    month: Leap(month),
                    date: new_moon_dates[i],
                });
                needs_leap = false;
                continue;
            }
            month = month % 12 + 1;
            months.push(NewMoon {
                month: Common(month),
                date: new_moon_dates[i],
            });
            term += 2;
        }
        if needs_leap {
            return Err(ConversionError::InconsistentEphemeris {
                annus,
                months: months.len(),
            });
        }

        Ok(Annus { annus, months })
    }
    /// 依特定日期取得其所在歲。
    ///
    /// 若不能推算該歲則回報 [`ConversionError::UnsupportedDate`]。
    ///
    /// # 用例
    ///
    /// ```
    /// use shuowang::Date;
    /// use shuowang::chinese::{Annus, BEIJING_OFFSET_MINUTES};
    ///
    /// let date = Date::from_gregorian(1999, 12, 31).unwrap();
    /// let annus = Annus::from_date(date, BEIJING_OFFSET_MINUTES).unwrap();
    ///
    /// assert_eq!(2000, annus.annus);
    /// ```
    pub fn from_date(date: Date, utc_offset_minutes: i32) -> Result<Self, ConversionError> {
        let mut y = date.gregorian().0;
        loop {
            let annus = Self::new(y, utc_offset_minutes).map_err(|_| {
                ConversionError::UnsupportedDate {
                    date: date.iso_gregorian(),
                }
            })?;

            if annus.ymd_for(date).is_ok() {
                return Ok(annus);
            }

            y += if date < annus.months[0].date { -1 } else { 1 };
        }
    }

    /// 取得給定日期在該歲的年月日。
    ///
    /// 若所給日期不在該歲，則回報 `Err` 並指出該日期在該歲之前還是之後。
    ///
    /// # 用例
    ///
    /// ```
    /// use shuowang::Date;
    /// use shuowang::chinese::{Annus, LunarDate, Month::*, OtherAnnus, BEIJING_OFFSET_MINUTES};
    ///
    /// let annus = Annus::new(2017, BEIJING_OFFSET_MINUTES).unwrap();
    ///
    /// let date = Date::from_gregorian(2017, 7, 23).unwrap();
    /// assert_eq!(Ok(LunarDate { year: 2017, month: Leap(6), day: 1 }), annus.ymd_for(date));
    ///
    /// let date = Date::from_gregorian(2017, 12, 18).unwrap();
    /// assert_eq!(Err(OtherAnnus::After), annus.ymd_for(date));
    /// ```
    pub fn ymd_for(&self, date: Date) -> Result<LunarDate, OtherAnnus> {
        let (first, rest) = self.months.split_first().ok_or(OtherAnnus::After)?;
        let end = rest.last().map_or(first.date, |m| m.date);

        if date < first.date {
            return Err(OtherAnnus::Before);
        } else if date >= end {
            return Err(OtherAnnus::After);
        }

        let idx = self.months.partition_point(|m| m.date <= date) - 1;
        let m = &self.months[idx];
        let day = (date - m.date + 1) as u32;
        let year = if m.month.num() >= 11 {
            self.annus - 1
        } else {
            self.annus
        };
        Ok(LunarDate {
            year,
            month: m.month,
            day,
        })
    }
}

/// 表示給定日期不在該歲，並指出其在前還是在後。
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OtherAnnus {
    Before,
    After,
}

/// 農曆年，自正月初一至次年正月初一前日。
///
/// 十一月以後的月份屬於次一歲，故須合併兩歲的月首。
///
/// # 用例
///
/// ```
/// use shuowang::chinese::{LunarYear, Month::*, BEIJING_OFFSET_MINUTES};
///
/// let year = LunarYear::new(2023, BEIJING_OFFSET_MINUTES).unwrap();
/// assert_eq!(Some(2), year.leap_month());
/// assert_eq!("2023-03-22", year.date_of(Leap(2), 1).unwrap().iso_gregorian());
/// ```
#[derive(Debug, Clone)]
pub struct LunarYear {
    /// 正月所在公元年
    pub year: i32,
    /// 全部月首，包括次年正月用以標記本年最末日
    pub months: Vec<NewMoon>,
}

impl LunarYear {
    /// 取得農曆 `year` 年，日期按東於 UTC `utc_offset_minutes` 分鐘的時區劃分。
    ///
    /// 不在 [`SUPPORTED_YEARS`] 內則回報 [`ConversionError::UnsupportedYear`]。
    pub fn new(year: i32, utc_offset_minutes: i32) -> Result<Self, ConversionError> {
        if !SUPPORTED_YEARS.contains(&year) {
            return Err(ConversionError::UnsupportedYear { year });
        }
        let current = Annus::new(year, utc_offset_minutes)?;
        let next = Annus::new(year + 1, utc_offset_minutes)?;

        let first_month = |annus: &Annus| {
            annus
                .months
                .iter()
                .position(|m| m.month == Month::Common(1))
                .ok_or(ConversionError::InconsistentEphemeris {
                    annus: annus.annus,
                    months: annus.months.len(),
                })
        };
        let begin = first_month(&current)?;
        let end = first_month(&next)?;

        // 本歲末項即次歲首項（十一月），故略去
        let mut months = current.months[begin..current.months.len() - 1].to_vec();
        months.extend_from_slice(&next.months[..=end]);
        Ok(LunarYear { year, months })
    }

    /// 該年閏月的月序號，無閏月則為 `None`。
    pub fn leap_month(&self) -> Option<u32> {
        self.months
            .iter()
            .find(|m| m.month.is_leap())
            .map(|m| m.month.num())
    }

    /// 取得該年某月某日的公曆日期。
    ///
    /// 若該年無此月（如並無該閏月），或該月無此日，則回報 `Err`。
    pub fn date_of(&self, month: Month, day: u32) -> Result<Date, ConversionError> {
        let idx = self
            .months
            .iter()
            .take(self.months.len().saturating_sub(1))
            .position(|m| m.month == month)
            .ok_or(ConversionError::NoSuchMonth {
                year: self.year,
                month,
            })?;
        let begin = self.months[idx].date;
        let length = (self.months[idx + 1].date - begin) as u32;
        if day == 0 || day > length {
            return Err(ConversionError::NoSuchDay {
                year: self.year,
                month,
                day,
                length,
            });
        }
        Ok(begin + (day as i32 - 1))
    }
}

/// 農曆與公曆互換所需的操作。
///
/// [`ChineseCalendar`] 為依天文推算的實現；測試中可代以固定數據。
pub trait LunarCalendar {
    /// 取得農曆 `year` 年 `month` 月第 `day` 日的公曆日期。
    fn resolve_gregorian(&self, year: i32, month: Month, day: u32)
    -> Result<Date, ConversionError>;

    /// 取得公曆日期所對應的農曆日期。
    fn lunar_date(&self, date: Date) -> Result<LunarDate, ConversionError>;

    /// 農曆 `year` 年閏月的月序號，無閏月則為 `None`。
    fn leap_month(&self, year: i32) -> Result<Option<u32>, ConversionError>;

    /// 判斷 `date` 所在農曆年是否以第 `month` 月為閏月。
    fn is_leap_month(&self, date: Date, month: u32) -> Result<bool, ConversionError> {
        let year = self.lunar_date(date)?.year;
        Ok(self.leap_month(year)? == Some(month))
    }
}

/// 依天文推算的夏曆，日期按固定民用時區劃分。
///
/// # 用例
///
/// ```
/// use shuowang::Date;
/// use shuowang::chinese::{ChineseCalendar, LunarCalendar, Month::*};
///
/// let calendar = ChineseCalendar::default();
/// let date = calendar.resolve_gregorian(2024, Common(1), 15).unwrap();
/// assert_eq!("2024-02-24", date.iso_gregorian());
///
/// let lunar = calendar.lunar_date(Date::from_gregorian(2023, 9, 29).unwrap()).unwrap();
/// assert_eq!(("八月", "十五"), (lunar.month_name().as_str(), lunar.day_name().as_str()));
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ChineseCalendar {
    utc_offset_minutes: i32,
}

impl ChineseCalendar {
    /// 以東於 UTC `utc_offset_minutes` 分鐘的時區劃分日期。
    ///
    /// 時差須在一日之內，否則回報 [`ConversionError::InvalidOffset`]。
    pub fn new(utc_offset_minutes: i32) -> Result<Self, ConversionError> {
        if utc_offset_minutes.abs() >= 1440 {
            return Err(ConversionError::InvalidOffset {
                minutes: utc_offset_minutes,
            });
        }
        Ok(ChineseCalendar { utc_offset_minutes })
    }
    pub fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }
}

impl Default for ChineseCalendar {
    fn default() -> Self {
        ChineseCalendar {
            utc_offset_minutes: BEIJING_OFFSET_MINUTES,
        }
    }
}

impl LunarCalendar for ChineseCalendar {
    fn resolve_gregorian(
        &self,
        year: i32,
        month: Month,
        day: u32,
    ) -> Result<Date, ConversionError> {
        LunarYear::new(year, self.utc_offset_minutes)?.date_of(month, day)
    }

    fn lunar_date(&self, date: Date) -> Result<LunarDate, ConversionError> {
        let annus = Annus::from_date(date, self.utc_offset_minutes)?;
        annus
            .ymd_for(date)
            .map_err(|_| ConversionError::UnsupportedDate {
                date: date.iso_gregorian(),
            })
    }

    fn leap_month(&self, year: i32) -> Result<Option<u32>, ConversionError> {
        Ok(LunarYear::new(year, self.utc_offset_minutes)?.leap_month())
    }
}

/// 將給定曆表時間轉為東於 UTC `utc_offset_minutes` 分鐘之時區的日期。
pub fn civil_date(tdb: Tdb, utc_offset_minutes: i32) -> Date {
    Ut::convert(tdb).date_in_timezone(utc_offset_minutes)
}
