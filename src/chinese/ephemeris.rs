//! 朔與節氣曆表，以解析公式即時推算。
//!
//! - 朔：平朔加月球、太陽近點角等週期改正及十四項行星攝動改正，見 [`new_moon`]。
//! - 太陽視黃經：平黃經加中心差，再計光行差與黃經章動，精度約 0.01°，見 [`solar_longitude`]。
//! - 節氣：以牛頓法反解太陽視黃經，見 [`solar_term`]。
//!
//! 所得時刻皆為曆書時（以 [`Tdb`] 表示），須經 [`Ut`](crate::time_scales::Ut) 換算方得民用日期。

use std::ops::RangeInclusive;

use crate::date::Date;
use crate::time_scales::Tdb;

/// 可推算的歲。範圍外之歲雖可計算，但 ΔT 外推誤差漸大，且曆法規則亦不同，故不予支持。
pub const SUPPORTED_ANNI: RangeInclusive<i32> = 1900..=2101;

/// 回歸年日數
const TROPICAL_YEAR: f64 = 365.2422;
/// 朔望月日數
const SYNODIC_MONTH: f64 = 29.530588861;
/// 第 0 朔（2000 年 1 月 6 日）的平朔時刻
const EPOCH_NEW_MOON: f64 = 2451550.09766;

/// 保存一歲的曆表數據
#[derive(Debug, Clone)]
pub struct Annus {
    /// 序號，為該歲大部分時段所在公元年
    pub annus: i32,
    /// 從冬至開始的各節氣時刻，亦含次歲冬至以便計算末日
    pub solar_term: [Tdb; 25],
    /// 從冬至前一朔之前開始的連續十六個朔，足以涵蓋至次歲冬至後一朔
    pub new_moon: Vec<Tdb>,
}

impl Annus {
    /// 推算公元 `annus` 年對應的歳的曆表。
    ///
    /// 不在 [`SUPPORTED_ANNI`] 內則返回 `None`。
    ///
    /// # 用例
    ///
    /// ```
    /// use shuowang::chinese::ephemeris::Annus;
    ///
    /// let annus = Annus::compute(2023).unwrap();
    /// assert_eq!(25, annus.solar_term.len());
    /// assert!(Annus::compute(1800).is_none());
    /// ```
    pub fn compute(annus: i32) -> Option<Self> {
        if !SUPPORTED_ANNI.contains(&annus) {
            return None;
        }
        let solstice_guess = Date::from_gregorian(annus - 1, 12, 22)?.jdn() as f64;
        let mut solar_term = [Tdb(0.0); 25];
        for (i, term) in solar_term.iter_mut().enumerate() {
            let longitude = (270.0 + 15.0 * i as f64) % 360.0;
            let guess = Tdb(solstice_guess + TROPICAL_YEAR * i as f64 / 24.0);
            *term = self::solar_term(longitude, guess);
        }

        let k0 = ((solar_term[0].0 - EPOCH_NEW_MOON) / SYNODIC_MONTH).floor() as i32 - 1;
        let new_moon = (k0..k0 + 16).map(self::new_moon).collect();

        Some(Annus {
            annus,
            solar_term,
            new_moon,
        })
    }
}

/// 將角度規約至 `[-180, 180)`。
fn normalize_pm180(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

fn sin_deg(deg: f64) -> f64 {
    deg.to_radians().sin()
}

/// 第 `k` 朔的時刻，`k = 0` 為 2000 年 1 月 6 日之朔，負數為其前各朔。
///
/// # 用例
///
/// ```
/// use shuowang::chinese::ephemeris::new_moon;
///
/// // 2000-01-06T18:14 TT
/// assert!((new_moon(0).0 - 2451550.26).abs() < 0.01);
/// ```
pub fn new_moon(k: i32) -> Tdb {
    let k = k as f64;
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let jde = EPOCH_NEW_MOON + SYNODIC_MONTH * k + 0.00015437 * t2 - 0.000000150 * t3
        + 0.00000000073 * t4;

    let e = 1.0 - 0.002516 * t - 0.0000074 * t2;
    let m = 2.5534 + 29.10535670 * k - 0.0000014 * t2 - 0.00000011 * t3;
    let mp = 201.5643 + 385.81693528 * k + 0.0107582 * t2 + 0.00001238 * t3 - 0.000000058 * t4;
    let f = 160.7108 + 390.67050284 * k - 0.0016118 * t2 - 0.00000227 * t3 + 0.000000011 * t4;
    let om = 124.7746 - 1.56375588 * k + 0.0020672 * t2 + 0.00000215 * t3;

    let periodic = -0.40720 * sin_deg(mp) + 0.17241 * e * sin_deg(m)
        + 0.01608 * sin_deg(2.0 * mp)
        + 0.01039 * sin_deg(2.0 * f)
        + 0.00739 * e * sin_deg(mp - m)
        - 0.00514 * e * sin_deg(mp + m)
        + 0.00208 * e * e * sin_deg(2.0 * m)
        - 0.00111 * sin_deg(mp - 2.0 * f)
        - 0.00057 * sin_deg(mp + 2.0 * f)
        + 0.00056 * e * sin_deg(2.0 * mp + m)
        - 0.00042 * sin_deg(3.0 * mp)
        + 0.00042 * e * sin_deg(m + 2.0 * f)
        + 0.00038 * e * sin_deg(m - 2.0 * f)
        - 0.00024 * e * sin_deg(2.0 * mp - m)
        - 0.00017 * sin_deg(om)
        - 0.00007 * sin_deg(mp + 2.0 * m)
        + 0.00004 * sin_deg(2.0 * mp - 2.0 * f)
        + 0.00004 * sin_deg(3.0 * m)
        + 0.00003 * sin_deg(mp + m - 2.0 * f)
        + 0.00003 * sin_deg(2.0 * mp + 2.0 * f)
        - 0.00003 * sin_deg(mp + m + 2.0 * f)
        + 0.00003 * sin_deg(mp - m + 2.0 * f)
        - 0.00002 * sin_deg(mp - m - 2.0 * f)
        - 0.00002 * sin_deg(3.0 * mp + m)
        + 0.00002 * sin_deg(4.0 * mp);

    // 行星攝動，(係數, 常數項, k 的係數)；首項另含 T² 項
    const PLANETARY: [(f64, f64, f64); 14] = [
        (0.000325, 299.77, 0.107408),
        (0.000165, 251.88, 0.016321),
        (0.000164, 251.83, 26.651886),
        (0.000126, 349.42, 36.412478),
        (0.000110, 84.66, 18.206239),
        (0.000062, 141.74, 53.303771),
        (0.000060, 207.14, 2.453732),
        (0.000056, 154.84, 7.306860),
        (0.000047, 34.52, 27.261239),
        (0.000042, 207.19, 0.121824),
        (0.000040, 291.34, 1.844379),
        (0.000037, 161.72, 24.198154),
        (0.000035, 239.56, 25.513099),
        (0.000023, 331.55, 3.592518),
    ];
    let planetary: f64 = PLANETARY
        .iter()
        .enumerate()
        .map(|(i, &(coeff, a0, a1))| {
            let a = a0 + a1 * k - if i == 0 { 0.009173 * t2 } else { 0.0 };
            coeff * sin_deg(a)
        })
        .sum();

    Tdb(jde + periodic + planetary)
}

/// 太陽視黃經，單位為度，範圍 `[0, 360)`。
///
/// # 用例
///
/// ```
/// use shuowang::chinese::ephemeris::solar_longitude;
/// use shuowang::time_scales::Tdb;
///
/// // 1992-10-13T00:00 TT
/// assert!((solar_longitude(Tdb(2448908.5)) - 199.909).abs() < 0.01);
/// ```
pub fn solar_longitude(time: Tdb) -> f64 {
    let t = (time.0 - 2451545.0) / 36525.0;
    let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
    let m = 357.52911 + 35999.05029 * t - 0.0001537 * t * t;
    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * sin_deg(m)
        + (0.019993 - 0.000101 * t) * sin_deg(2.0 * m)
        + 0.000289 * sin_deg(3.0 * m);
    let om = 125.04 - 1934.136 * t;
    (l0 + c - 0.00569 - 0.00478 * sin_deg(om)).rem_euclid(360.0)
}

/// 求太陽視黃經達 `longitude` 度的時刻，自 `guess` 起迭代，`guess` 須在所求時刻前後數日內。
///
/// # 用例
///
/// ```
/// use shuowang::chinese::ephemeris::{solar_longitude, solar_term};
/// use shuowang::time_scales::Tdb;
///
/// // 2023 年春分
/// let t = solar_term(0.0, Tdb(2460024.5));
/// assert!(solar_longitude(t) < 1e-6 || solar_longitude(t) > 360.0 - 1e-6);
/// ```
pub fn solar_term(longitude: f64, guess: Tdb) -> Tdb {
    const MAX_ITERATIONS: usize = 20;
    let mut jd = guess.0;
    for _ in 0..MAX_ITERATIONS {
        let diff = normalize_pm180(longitude - solar_longitude(Tdb(jd)));
        jd += diff * TROPICAL_YEAR / 360.0;
        if diff.abs() < 1e-8 {
            break;
        }
    }
    Tdb(jd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_scales::Ut;

    fn cst(tdb: Tdb) -> String {
        Ut::convert(tdb).date_in_timezone(480).iso_gregorian()
    }

    #[test]
    fn new_moons() {
        // 春節之朔，及 2024 年臘月之朔
        for (k, std) in [
            (211, "2017-01-28"),
            (248, "2020-01-25"),
            (285, "2023-01-22"),
            (297, "2024-01-11"),
            (298, "2024-02-10"),
        ] {
            assert_eq!(std, cst(new_moon(k)), "k = {k}");
        }
    }

    #[test]
    fn winter_solstices() {
        for (annus, std) in [
            (2017, "2016-12-21"),
            (2023, "2022-12-22"),
            (2024, "2023-12-22"),
        ] {
            let annus = Annus::compute(annus).unwrap();
            assert_eq!(std, cst(annus.solar_term[0]));
        }
    }

    #[test]
    fn solar_terms_are_ordered() {
        let annus = Annus::compute(2023).unwrap();
        for pair in annus.solar_term.windows(2) {
            let days = pair[1].0 - pair[0].0;
            assert!((14.5..16.0).contains(&days), "{days}");
        }
        let year = annus.solar_term[24].0 - annus.solar_term[0].0;
        assert!((year - TROPICAL_YEAR).abs() < 0.01);
    }

    #[test]
    fn new_moons_bracket_solstices() {
        for y in [1900, 1984, 2023, 2101] {
            let annus = Annus::compute(y).unwrap();
            assert!(annus.new_moon[0] < annus.solar_term[0]);
            assert!(annus.new_moon.last().unwrap() > &annus.solar_term[24]);
            for pair in annus.new_moon.windows(2) {
                let days = pair[1].0 - pair[0].0;
                assert!((29.2..29.9).contains(&days), "{days}");
            }
        }
    }

    #[test]
    fn unsupported() {
        assert!(Annus::compute(1899).is_none());
        assert!(Annus::compute(2102).is_none());
    }

    #[test]
    fn angles() {
        assert_eq!(-10.0, normalize_pm180(350.0));
        assert_eq!(10.0, normalize_pm180(-350.0));
        assert_eq!(-180.0, normalize_pm180(180.0));
    }
}
