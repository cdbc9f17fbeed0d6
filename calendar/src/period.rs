//! Period arithmetic over solar and lunar dates.
//!
//! Adding a period of `value >= 1` days, months, or years always yields a
//! strictly later date. Month and year arithmetic clamps the day into the
//! target month instead of rolling over: Jan 31 + 1 month is Feb 28/29,
//! never March 2.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;
use crate::lunar::{lunar_to_solar, solar_to_lunar, LunarDate};
use crate::table;

/// Unit of a renewal period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Day,
    Month,
    Year,
}

/// A renewal period: `value` whole days, months, or years.
///
/// `value` is validated to be at least 1 at the subscription input boundary;
/// the arithmetic additionally rejects zero so a bad record can never make a
/// catch-up loop spin in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub value: u32,
    pub unit: PeriodUnit,
}

/// Which calendar's arithmetic rules apply to a stored anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarKind {
    Solar,
    Lunar,
}

/// Whether a Gregorian year is a leap year.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in a Gregorian month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Build a Gregorian date, clamping the day into the target month.
fn clamped_ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, CalendarError> {
    let day = day.min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).ok_or(CalendarError::OutOfRange(year))
}

/// Advance a Gregorian date by one period.
pub fn add_period_solar(date: NaiveDate, period: &Period) -> Result<NaiveDate, CalendarError> {
    if period.value == 0 {
        return Err(CalendarError::InvalidPeriod);
    }
    match period.unit {
        PeriodUnit::Day => Ok(date + Duration::days(i64::from(period.value))),
        PeriodUnit::Month => {
            let months =
                i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(period.value);
            let year = months.div_euclid(12) as i32;
            let month = months.rem_euclid(12) as u32 + 1;
            clamped_ymd(year, month, date.day())
        }
        PeriodUnit::Year => clamped_ymd(date.year() + period.value as i32, date.month(), date.day()),
    }
}

/// Advance a lunisolar date by one period.
///
/// Day periods delegate through the solar calendar; month and year periods
/// move along a 12-months-per-year index (a leap month is never addressed by
/// the index, only re-resolved against the target year's table) and then
/// clamp the day to the target month's real length.
pub fn add_period_lunar(lunar: &LunarDate, period: &Period) -> Result<LunarDate, CalendarError> {
    if period.value == 0 {
        return Err(CalendarError::InvalidPeriod);
    }
    match period.unit {
        PeriodUnit::Day => {
            let solar = lunar_to_solar(lunar)?;
            solar_to_lunar(solar + Duration::days(i64::from(period.value)))
        }
        PeriodUnit::Month => {
            let months =
                i64::from(lunar.year) * 12 + i64::from(lunar.month - 1) + i64::from(period.value);
            let year = months.div_euclid(12) as i32;
            let month = months.rem_euclid(12) as u32 + 1;
            resolve_lunar(year, month, lunar.day, lunar.is_leap_month)
        }
        PeriodUnit::Year => resolve_lunar(
            lunar.year + period.value as i32,
            lunar.month,
            lunar.day,
            lunar.is_leap_month,
        ),
    }
}

/// Re-resolve a lunar (year, month) landed on by month/year arithmetic.
///
/// The leap flag survives only if the target year's leap month is this very
/// month; the day is clamped to the target month's actual length and must
/// round-trip through [`lunar_to_solar`]. If neither the clamped day nor
/// any earlier day resolves (a consistent table never produces this), the
/// inconsistency is surfaced as `Unresolvable` instead of returning an
/// unclamped date.
fn resolve_lunar(
    year: i32,
    month: u32,
    day: u32,
    was_leap: bool,
) -> Result<LunarDate, CalendarError> {
    let is_leap_month = was_leap && table::leap_month(year)? == month;
    let max_day = if is_leap_month {
        table::leap_month_days(year)?
    } else {
        table::month_days(year, month)?
    };
    let mut day = day.min(max_day);
    while day >= 1 {
        let candidate = LunarDate {
            year,
            month,
            day,
            is_leap_month,
        };
        if lunar_to_solar(&candidate).is_ok() {
            return Ok(candidate);
        }
        day -= 1;
    }
    Err(CalendarError::Unresolvable {
        year,
        month,
        day: max_day,
        is_leap_month,
    })
}

/// A calendar-tagged anchor date, the shape period arithmetic operates on.
///
/// The scheduler resolves a subscription's expiry into one of these once,
/// then advances it hop by hop without caring which calendar is in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarDate {
    Solar(NaiveDate),
    Lunar(LunarDate),
}

impl CalendarDate {
    /// Tag a civil date with the calendar its arithmetic should follow.
    pub fn resolve(date: NaiveDate, kind: CalendarKind) -> Result<Self, CalendarError> {
        Ok(match kind {
            CalendarKind::Solar => CalendarDate::Solar(date),
            CalendarKind::Lunar => CalendarDate::Lunar(solar_to_lunar(date)?),
        })
    }

    /// Advance by one period under this date's calendar rules.
    pub fn add_period(&self, period: &Period) -> Result<Self, CalendarError> {
        Ok(match self {
            CalendarDate::Solar(date) => CalendarDate::Solar(add_period_solar(*date, period)?),
            CalendarDate::Lunar(lunar) => CalendarDate::Lunar(add_period_lunar(lunar, period)?),
        })
    }

    /// The Gregorian civil date this anchor falls on.
    pub fn to_solar(&self) -> Result<NaiveDate, CalendarError> {
        match self {
            CalendarDate::Solar(date) => Ok(*date),
            CalendarDate::Lunar(lunar) => lunar_to_solar(lunar),
        }
    }
}
