//! Traditional rendering of lunar dates.
//!
//! A lunar date is displayed the way the subscription list shows it:
//! sexagenary (stem-branch) year, month name with a 閏 prefix for leap
//! months, and the traditional day name, e.g. `癸卯年閏二月十五`.

use std::fmt;

use crate::lunar::LunarDate;

const STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
const BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];
const MONTHS: [&str; 12] = [
    "正", "二", "三", "四", "五", "六", "七", "八", "九", "十", "冬", "臘",
];
const DAYS: [&str; 30] = [
    "初一", "初二", "初三", "初四", "初五", "初六", "初七", "初八", "初九", "初十", "十一", "十二",
    "十三", "十四", "十五", "十六", "十七", "十八", "十九", "二十", "廿一", "廿二", "廿三", "廿四",
    "廿五", "廿六", "廿七", "廿八", "廿九", "三十",
];

/// Sexagenary (stem-branch) name of a lunar year, e.g. `癸卯` for 2023.
pub fn sexagenary_year(year: i32) -> String {
    let stem = (year - 4).rem_euclid(10) as usize;
    let branch = (year - 4).rem_euclid(12) as usize;
    format!("{}{}", STEMS[stem], BRANCHES[branch])
}

/// Traditional name of a lunar month, with a 閏 prefix for leap months.
pub fn month_name(month: u32, is_leap_month: bool) -> String {
    debug_assert!((1..=12).contains(&month));
    let name = MONTHS[(month as usize - 1).min(11)];
    if is_leap_month {
        format!("閏{}", name)
    } else {
        name.to_string()
    }
}

/// Traditional name of a lunar day (1-30), e.g. `初一` or `廿九`.
pub fn day_name(day: u32) -> &'static str {
    debug_assert!((1..=30).contains(&day));
    DAYS[(day as usize - 1).min(29)]
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}年{}月{}",
            sexagenary_year(self.year),
            month_name(self.month, self.is_leap_month),
            day_name(self.day)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sexagenary_year() {
        assert_eq!(sexagenary_year(1900), "庚子");
        assert_eq!(sexagenary_year(2023), "癸卯");
        assert_eq!(sexagenary_year(2024), "甲辰");
    }

    #[test]
    fn test_month_and_day_names() {
        assert_eq!(month_name(1, false), "正");
        assert_eq!(month_name(2, true), "閏二");
        assert_eq!(month_name(12, false), "臘");
        assert_eq!(day_name(1), "初一");
        assert_eq!(day_name(20), "二十");
        assert_eq!(day_name(30), "三十");
    }

    #[test]
    fn test_display() {
        let date = LunarDate {
            year: 2023,
            month: 2,
            day: 15,
            is_leap_month: true,
        };
        assert_eq!(date.to_string(), "癸卯年閏二月十五");
    }
}
