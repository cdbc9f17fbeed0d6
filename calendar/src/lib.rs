//! # Calendar Library
//!
//! Lunisolar calendar conversion and period arithmetic for the renewal
//! tracker. This is the single shared implementation used by the scheduler
//! and by any date-preview calculation, so the two can never drift apart.
//!
//! ## Module Organization
//!
//! - **table**: bit-encoded lunisolar year table for 1900-2100
//! - **lunar**: `LunarDate` and conversion between the Gregorian and
//!   lunisolar calendars
//! - **period**: adding day/month/year periods to a date under either
//!   calendar, with explicit day clamping
//! - **civil**: timezone-aware day boundaries and whole-day differences
//! - **fmt**: traditional rendering of lunar dates (stem-branch year,
//!   month and day names)
//!
//! ## Supported Range
//!
//! The lunisolar table covers lunar years 1900 through 2100; conversions
//! outside that span fail with [`CalendarError::OutOfRange`] rather than
//! approximating.

pub mod civil;
pub mod error;
pub mod fmt;
pub mod lunar;
pub mod period;
pub mod table;

pub use error::CalendarError;
pub use lunar::{lunar_to_solar, solar_to_lunar, LunarDate};
pub use period::{
    add_period_lunar, add_period_solar, CalendarDate, CalendarKind, Period, PeriodUnit,
};
