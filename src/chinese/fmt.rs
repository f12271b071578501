//! 格式化日期相關功能

/// 漢數字，第 `1..=9` 項分別為「一」到「九」。為便於格式化日期，第 0 項為「十」。
pub const NUM_CHINESE: &[&str] = &["十", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// 天干，自甲起
static STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
/// 地支，自子起
static BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];
/// 甲子年，作為六十年循環的起點
const SEXAGENARY_EPOCH: i32 = 1984;

/// 月名替換規則：冬月、腊月改稱十一月、十二月，簡體「闰」改作「閏」。
static MONTH_NAME_RULES: [(char, &str); 3] = [('腊', "十二"), ('冬', "十一"), ('闰', "閏")];

/// 取得所給年份的干支年名。
///
/// 以 1984 年（甲子）為起點，年份在其前亦可。
///
/// # 用例
///
/// ```
/// use shuowang::chinese::fmt;
///
/// assert_eq!("甲子", fmt::sexagenary_year(1984));
/// assert_eq!("癸亥", fmt::sexagenary_year(1983));
/// assert_eq!("癸卯", fmt::sexagenary_year(2023));
/// ```
pub fn sexagenary_year(year: i32) -> String {
    let offset = sexagenary_offset(year);
    STEMS[offset % 10].to_owned() + BRANCHES[offset % 12]
}

/// 所給年份在六十年循環中的位置，`0..=59`，0 為甲子。
pub fn sexagenary_offset(year: i32) -> usize {
    (year - SEXAGENARY_EPOCH).rem_euclid(60) as usize
}

/// 取得月名（含「月」字）。一月稱「正月」，十一、十二月稱「冬月」「腊月」，閏月冠以簡體「闰」字。
///
/// # 用例
///
/// ```
/// use shuowang::chinese::{self, Month::*};
///
/// assert_eq!("冬月", chinese::fmt::month(Common(11)));
/// assert_eq!("闰正月", chinese::fmt::month(Leap(1)));
/// ```
///
/// # Panics
///
/// 若月序號不在 `1..=12` 間則 panic。
pub fn month(m: super::Month) -> String {
    let mut rt = String::new();
    if m.is_leap() {
        rt += "闰";
    }
    let num = m.num();
    rt += match num {
        1 => "正",
        2..=9 => NUM_CHINESE[num as usize],
        10 => "十",
        11 => "冬",
        12 => "腊",
        _ => panic!("month {} not in 1..=12", num),
    };
    rt += "月";
    rt
}

/// 將月名中的冬、腊改為數字，並將「闰」改為繁體「閏」，其餘原樣保留。
///
/// # 用例
///
/// ```
/// use shuowang::chinese::fmt;
///
/// assert_eq!("十二月", fmt::normalize_month(&fmt::month(shuowang::chinese::Month::Common(12))));
/// assert_eq!("閏二月", fmt::normalize_month("闰二月"));
/// assert_eq!("正月", fmt::normalize_month("正月"));
/// ```
pub fn normalize_month(name: &str) -> String {
    let mut rt = String::with_capacity(name.len() + 3);
    for c in name.chars() {
        match MONTH_NAME_RULES.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => rt.push_str(to),
            None => rt.push(c),
        }
    }
    rt
}

/// 取得日名，前十日為「初一」到「初十」，第 21 至 29 日為「廿一」到「廿九」。
///
/// # 用例
///
/// ```
/// use shuowang::chinese;
///
/// assert_eq!("初十", chinese::fmt::day(10));
/// assert_eq!("廿五", chinese::fmt::day(25));
/// assert_eq!("三十", chinese::fmt::day(30));
/// ```
///
/// # Panics
///
/// 若日序號不在 `1..=30` 間則 panic。
pub fn day(d: u32) -> String {
    match d {
        1..=10 => "初",
        11..=19 => "十",
        20 => "二",
        21..=29 => "廿",
        30 => "三",
        _ => panic!("day {} not in 1..=30", d),
    }
    .to_owned()
        + NUM_CHINESE[(d % 10) as usize]
}

#[cfg(test)]
mod tests {
    use super::super::Month::*;
    use super::*;

    #[test]
    fn test_sexagenary_year() {
        for (std, year) in [
            ("甲子", 1984),
            ("癸亥", 1983),
            ("庚辰", 2000),
            ("甲辰", 2024),
            ("甲子", 4),
            ("庚子", -2000),
        ] {
            assert_eq!(std, sexagenary_year(year), "{year}");
        }
    }

    #[test]
    fn sexagenary_cycle() {
        for year in (-3000..3000).step_by(7) {
            let name = sexagenary_year(year);
            assert_eq!(2, name.chars().count());
            assert_eq!(name, sexagenary_year(year + 60));
            assert!(sexagenary_offset(year) < 60);
        }
        // 六十年內不重複
        let names: std::collections::HashSet<_> = (1984..2044).map(sexagenary_year).collect();
        assert_eq!(60, names.len());
    }

    #[test]
    fn test_month() {
        let names: Vec<_> = (1..=12).map(|n| month(Common(n))).collect();
        assert_eq!(
            [
                "正月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月",
                "冬月", "腊月"
            ],
            names.as_slice()
        );
        assert_eq!("闰十月", month(Leap(10)));
    }

    #[test]
    fn test_normalize_month() {
        for (std, name) in [
            ("十二月", "腊月"),
            ("十一月", "冬月"),
            ("閏二月", "闰二月"),
            ("閏十一月", "闰冬月"),
            ("閏十二月", "闰腊月"),
            ("正月", "正月"),
            ("閏四月", "閏四月"),
            ("", ""),
        ] {
            assert_eq!(std, normalize_month(name));
        }
    }

    #[test]
    fn normalize_month_idempotent() {
        for n in 1..=12 {
            for m in [Common(n), Leap(n)] {
                let once = normalize_month(&month(m));
                assert_eq!(once, normalize_month(&once));
            }
        }
    }

    #[test]
    fn test_day() {
        for (std, d) in [
            ("初一", 1),
            ("初十", 10),
            ("十一", 11),
            ("十五", 15),
            ("二十", 20),
            ("廿一", 21),
            ("三十", 30),
        ] {
            assert_eq!(std, day(d));
        }
    }
}
