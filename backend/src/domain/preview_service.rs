//! Forward-looking renewal previews.
//!
//! The edit form shows the next few renewal dates a period choice would
//! produce. This goes through exactly the same `calendar` arithmetic as
//! the scheduler, so what the preview promises is what the catch-up loop
//! will later do.

use chrono::NaiveDate;
use chrono_tz::Tz;

use calendar::{CalendarDate, CalendarError};

use crate::domain::models::Subscription;

/// One upcoming renewal date, with the lunar rendering when the
/// subscription is anchored to the lunisolar calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct RenewalPreview {
    pub date: NaiveDate,
    pub lunar: Option<String>,
}

/// Service producing renewal previews for UI-facing callers.
#[derive(Clone, Default)]
pub struct PreviewService;

impl PreviewService {
    pub fn new() -> Self {
        Self
    }

    /// The next `count` renewal dates after the subscription's expiry,
    /// under its own calendar rules.
    pub fn upcoming_renewals(
        &self,
        subscription: &Subscription,
        count: usize,
        tz: Tz,
    ) -> Result<Vec<RenewalPreview>, CalendarError> {
        let period = subscription.period();
        let local_expiry = subscription.expiry_date.with_timezone(&tz);
        let mut anchor =
            CalendarDate::resolve(local_expiry.date_naive(), subscription.calendar_kind())?;

        let mut previews = Vec::with_capacity(count);
        for _ in 0..count {
            anchor = anchor.add_period(&period)?;
            let date = anchor.to_solar()?;
            let lunar = match anchor {
                CalendarDate::Lunar(lunar) => Some(lunar.to_string()),
                CalendarDate::Solar(_) => None,
            };
            previews.push(RenewalPreview { date, lunar });
        }
        Ok(previews)
    }
}
