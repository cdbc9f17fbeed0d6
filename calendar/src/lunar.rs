//! Conversion between the Gregorian and lunisolar calendars.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;
use crate::table;

/// A date in the lunisolar calendar.
///
/// Invariants: `is_leap_month` is true only when `table::leap_month(year)`
/// equals `month`, and `day` never exceeds the length of the (leap or
/// ordinary) month it names. [`solar_to_lunar`] only produces values that
/// satisfy both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub is_leap_month: bool,
}

/// Solar date of lunar 1900-01-01, the fixed conversion epoch.
pub(crate) fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 31).expect("epoch is a valid date")
}

/// Convert a Gregorian civil date to its lunisolar equivalent.
///
/// Walks the day offset from the 1900-01-31 epoch forward through whole
/// lunar years, then through the year's month sequence (the leap month sits
/// immediately after its ordinary month), leaving a 1-based day.
pub fn solar_to_lunar(date: NaiveDate) -> Result<LunarDate, CalendarError> {
    if date.year() > table::LAST_YEAR {
        return Err(CalendarError::OutOfRange(date.year()));
    }
    let mut offset = (date - epoch()).num_days();
    if offset < 0 {
        // January 1900 days before the epoch fall in lunar year 1899,
        // which the table does not cover.
        return Err(CalendarError::OutOfRange(table::FIRST_YEAR - 1));
    }

    let mut year = table::FIRST_YEAR;
    loop {
        let days = i64::from(table::year_days(year)?);
        if offset < days {
            break;
        }
        offset -= days;
        year += 1;
    }

    let leap = table::leap_month(year)?;
    for month in 1..=12u32 {
        let days = i64::from(table::month_days(year, month)?);
        if offset < days {
            return Ok(LunarDate {
                year,
                month,
                day: offset as u32 + 1,
                is_leap_month: false,
            });
        }
        offset -= days;

        if month == leap {
            let days = i64::from(table::leap_month_days(year)?);
            if offset < days {
                return Ok(LunarDate {
                    year,
                    month,
                    day: offset as u32 + 1,
                    is_leap_month: true,
                });
            }
            offset -= days;
        }
    }

    // year_days is the sum of the month lengths walked above
    unreachable!("day offset exceeds lunar year length");
}

/// Convert a lunisolar date back to the Gregorian calendar.
///
/// There is no closed-form inverse, so every calendar day in the lunar
/// year +/- 1 solar year is converted forward until an exact match on
/// (year, month, day, leap flag) is found; the earliest solar date wins.
/// A miss means the input does not exist in the table (for instance day 30
/// of a 29-day month) and is reported as [`CalendarError::Unresolvable`].
pub fn lunar_to_solar(lunar: &LunarDate) -> Result<NaiveDate, CalendarError> {
    for year in (lunar.year - 1)..=(lunar.year + 1) {
        for month in 1..=12u32 {
            for day in 1..=31u32 {
                let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                    continue;
                };
                if let Ok(candidate) = solar_to_lunar(date) {
                    if candidate == *lunar {
                        return Ok(date);
                    }
                }
            }
        }
    }
    Err(CalendarError::Unresolvable {
        year: lunar.year,
        month: lunar.month,
        day: lunar.day,
        is_leap_month: lunar.is_leap_month,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solar(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn lunar(year: i32, month: u32, day: u32, is_leap_month: bool) -> LunarDate {
        LunarDate {
            year,
            month,
            day,
            is_leap_month,
        }
    }

    #[test]
    fn test_epoch_is_lunar_new_year_1900() {
        assert_eq!(
            solar_to_lunar(epoch()),
            Ok(lunar(1900, 1, 1, false))
        );
    }

    #[test]
    fn test_known_lunar_new_years() {
        assert_eq!(
            solar_to_lunar(solar(2024, 2, 10)),
            Ok(lunar(2024, 1, 1, false))
        );
        assert_eq!(
            solar_to_lunar(solar(2025, 1, 29)),
            Ok(lunar(2025, 1, 1, false))
        );
        // the day before a new year is the last day of the old year
        assert_eq!(
            solar_to_lunar(solar(2024, 2, 9)),
            Ok(lunar(2023, 12, 30, false))
        );
    }

    #[test]
    fn test_leap_month_2023_boundaries() {
        // 2023 carries a leap second month spanning 2023-03-22..=2023-04-19
        assert_eq!(
            solar_to_lunar(solar(2023, 3, 21)),
            Ok(lunar(2023, 2, 30, false))
        );
        assert_eq!(
            solar_to_lunar(solar(2023, 3, 22)),
            Ok(lunar(2023, 2, 1, true))
        );
        assert_eq!(
            solar_to_lunar(solar(2023, 4, 19)),
            Ok(lunar(2023, 2, 29, true))
        );
        assert_eq!(
            solar_to_lunar(solar(2023, 4, 20)),
            Ok(lunar(2023, 3, 1, false))
        );
    }

    #[test]
    fn test_out_of_range_inputs() {
        assert_eq!(
            solar_to_lunar(solar(1900, 1, 30)),
            Err(CalendarError::OutOfRange(1899))
        );
        assert_eq!(
            solar_to_lunar(solar(2101, 1, 1)),
            Err(CalendarError::OutOfRange(2101))
        );
    }

    #[test]
    fn test_lunar_to_solar_known_dates() {
        assert_eq!(lunar_to_solar(&lunar(1900, 1, 1, false)), Ok(epoch()));
        assert_eq!(
            lunar_to_solar(&lunar(2024, 1, 1, false)),
            Ok(solar(2024, 2, 10))
        );
        assert_eq!(
            lunar_to_solar(&lunar(2023, 2, 15, true)),
            Ok(solar(2023, 4, 5))
        );
    }

    #[test]
    fn test_lunar_to_solar_rejects_nonexistent_dates() {
        // 2023 lunar month 3 has 29 days
        assert!(matches!(
            lunar_to_solar(&lunar(2023, 3, 30, false)),
            Err(CalendarError::Unresolvable { .. })
        ));
        // 2024 has no leap month at all
        assert!(matches!(
            lunar_to_solar(&lunar(2024, 5, 1, true)),
            Err(CalendarError::Unresolvable { .. })
        ));
    }

    #[test]
    fn test_round_trip_sampled_range() {
        // every 97th day across the full supported range
        let mut date = epoch();
        let last = solar(2100, 12, 31);
        while date <= last {
            let lunar = solar_to_lunar(date).unwrap();
            assert!(lunar.day >= 1 && lunar.day <= 30, "bad day for {}", date);
            assert_eq!(
                lunar_to_solar(&lunar),
                Ok(date),
                "round trip failed for {} -> {:?}",
                date,
                lunar
            );
            date += chrono::Duration::days(97);
        }
    }

    #[test]
    fn test_leap_flag_invariant_across_year() {
        // every day of 2023 must only report a leap month equal to the
        // table's leap month for its lunar year
        let mut date = solar(2023, 1, 1);
        while date < solar(2024, 1, 1) {
            let l = solar_to_lunar(date).unwrap();
            if l.is_leap_month {
                assert_eq!(crate::table::leap_month(l.year), Ok(l.month));
            }
            date += chrono::Duration::days(1);
        }
    }
}
