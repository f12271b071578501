//! Deals with different time scales, specifically, conversion from TDB/TT into
//! UT (UTC or UT1), and from UT into civil dates at a fixed UTC offset.
//!
//! Only conversions necessary for the lunisolar calendar are included.

use crate::date::Date;

/// [Barycentric dynamic time](https://en.wikipedia.org/wiki/Barycentric_Dynamical_Time),
/// represented in Julian date (JD).
///
/// The computed ephemeris is expressed in this time scale, and should be
/// converted to UT when calculating dates.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tdb(pub f64);

/// [Terristrial time](https://en.wikipedia.org/wiki/Terrestrial_Time),
/// represented in Julian date (JD).
///
/// Note: Because TT differs no more than centisenconds from TDB during
/// thousands of years, they are treated numerically the same in this crate for
/// calendar calculation.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tt(pub f64);

impl From<Tdb> for Tt {
    fn from(tdb: Tdb) -> Tt {
        Tt(tdb.0)
    }
}

impl From<Tai> for Tt {
    fn from(tai: Tai) -> Tt {
        Tt(tai.0 + 32.184 / 86400.0)
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

impl From<Tdb> for Tai {
    fn from(tdb: Tdb) -> Tai {
        Tt::from(tdb).into()
    }
}

/// [Universal time](https://en.wikipedia.org/wiki/Universal_Time), the actual
/// civil time used for determining the actual date at a given time point.
///
/// This is UTC (based on TAI with leap seconds) from 1972-01-01T00:00Z to the
/// expiry of the bundled leap second table, and UT1 (mean solar time on the
/// Prime Meridian) on either side of it.
///
/// Outside the table, TAI − UT1 follows the long-term parabolic ΔT trend,
/// shifted so that it joins the table without a jump at both edges.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Ut(pub f64);

impl Ut {
    /// Converts a TAI (or other time scale easily convertible to TAI) into UT.
    ///
    /// # Example
    ///
    /// ```
    /// use shuowang::time_scales::{Tdb, Ut};
    /// let tdb = Tdb(2451543.166666667);
    /// let ut = Ut::convert(tdb);
    /// assert_eq!((1999, 12, 30), ut.date_in_timezone(0).gregorian());
    /// ```
    pub fn convert<T>(time: T) -> Self
    where
        T: Into<Tai>,
    {
        let tai = time.into();
        let data = leap_seconds::data();

        if tai < data.starts {
            let diff = leap_seconds::estimate(tai) + data.c1;
            return Ut(tai.0 - diff / 86400.0); // UT1
        } else if tai > data.expires {
            let diff = leap_seconds::estimate(tai) + data.c2;
            return Ut(tai.0 - diff / 86400.0); // UT1
        }

        let ls = match data.leap_seconds.partition_point(|ls| ls.tai <= tai) {
            0 => return Ut(tai.0 - 10.0 / 86400.0),
            i => &data.leap_seconds[i - 1],
        };
        let leap = (tai.0 - ls.tai.0).min(2.0) / 2.0;
        Ut(tai.0 - (ls.delta_secs as f64 + leap) / 86400.0)
    }
    /// Returns the date at the time point in timezone ahead (east) of UTC by
    /// `tz_offset_minutes` minutes.
    ///
    /// For Beijing time (UTC+8), `tz_offset_minutes` should be +480.
    ///
    /// # Example
    ///
    /// ```
    /// use shuowang::time_scales::Ut;
    /// // 2023-01-21T20:53Z, the new moon starting the year of 癸卯
    /// let ut = Ut(2459966.370139);
    /// assert_eq!((2023, 1, 21), ut.date_in_timezone(0).gregorian());
    /// assert_eq!((2023, 1, 22), ut.date_in_timezone(480).gregorian());
    /// ```
    pub fn date_in_timezone(&self, tz_offset_minutes: i32) -> Date {
        let jdn = (self.0 + tz_offset_minutes as f64 / 1440.0).round() as u32;
        Date::from_jdn(jdn)
    }
}

mod leap_seconds {
    use std::sync::LazyLock;

    use super::{Tai, Tt};
    use crate::date::Date;

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
    pub const DATE_EXPIRES: (i32, i32, i32) = (2025, 12, 31);

    #[derive(Debug, Clone)]
    pub struct Data {
        pub starts: Tai,
        pub leap_seconds: Vec<LeapSecond>,
        pub expires: Tai,
        /// Offset joining the ΔT trend to TAI − UTC = 10 s at `starts`.
        pub c1: f64,
        /// Offset joining the ΔT trend to the last TAI − UTC at `expires`.
        pub c2: f64,
    }
    #[derive(Debug, Clone)]
    pub struct LeapSecond {
        pub tai: Tai,
        pub delta_secs: i32,
    }

    static COMPUTED: LazyLock<Data> = LazyLock::new(compute);

    pub fn data() -> &'static Data {
        &COMPUTED
    }

    fn jdn_of((y, m, d): (i32, i32, i32)) -> u32 {
        Date::from_gregorian(y, m, d)
            .unwrap_or_else(|| panic!("date not recognized: {:?}", (y, m, d)))
            .jdn()
    }

    fn compute() -> Data {
        let starts = Tai(jdn_of((1972, 1, 1)) as f64 - 0.5 + 10.0 / 86400.0);
        let leap_seconds = (10..)
            .zip(DATES)
            .map(|(delta_secs, &ymd)| LeapSecond {
                tai: Tai(jdn_of(ymd) as f64 + (43199 + delta_secs) as f64 / 86400.0),
                delta_secs,
            })
            .collect();
        let expires =
            Tai(jdn_of(DATE_EXPIRES) as f64 + (43199 + 10 + DATES.len()) as f64 / 86400.0);
        Data {
            starts,
            leap_seconds,
            expires,
            c1: 10.0 - estimate(starts),
            c2: (DATES.len() + 10) as f64 - estimate(expires),
        }
    }

    /// Long-term ΔT trend in seconds, a parabola with a slow periodic term.
    pub fn estimate<T: Into<Tt>>(tt: T) -> f64 {
        use std::f64::consts::PI;
        let tt = tt.into();
        let y = (tt.0 - 2451544.5) / 365.2425 + 2000.0;
        let t = (y - 1825.0) / 100.0;
        31.4115 * t * t + 284.8435805251424 * (2.0 * PI * (t + 0.75) / 14.0).cos()
    }
}
