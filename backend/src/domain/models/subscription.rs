use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use calendar::{CalendarKind, Period, PeriodUnit};

fn default_reminder_days() -> i64 {
    7
}

fn default_true() -> bool {
    true
}

/// A tracked subscription, as persisted in the collection blob.
///
/// Field names serialize in camelCase to match the stored format
/// (`expiryDate`, `periodValue`, ...). Records written by older versions
/// may omit `reminderDays`, `isActive` or `autoRenew`; the defaults below
/// (7 days, active, auto-renewing) mirror what the system has always
/// assumed for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub name: String,
    /// Instant the subscription expires (ISO 8601 in the stored blob)
    pub expiry_date: DateTime<Utc>,
    /// Length of one renewal cycle, together with `period_unit`
    pub period_value: u32,
    pub period_unit: PeriodUnit,
    /// Days before expiry the reminder window opens; 0 = expiry day only
    #[serde(default = "default_reminder_days")]
    pub reminder_days: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_true")]
    pub auto_renew: bool,
    /// Expiry and renewal cycle anchored to the lunisolar calendar
    #[serde(default)]
    pub use_lunar: bool,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Subscription {
    pub fn generate_id() -> String {
        format!("subscription::{}", uuid::Uuid::new_v4())
    }

    /// The renewal period of this subscription.
    pub fn period(&self) -> Period {
        Period {
            value: self.period_value,
            unit: self.period_unit,
        }
    }

    /// Which calendar's arithmetic applies to the expiry date.
    pub fn calendar_kind(&self) -> CalendarKind {
        if self.use_lunar {
            CalendarKind::Lunar
        } else {
            CalendarKind::Solar
        }
    }

    /// Validate the invariants the engine's hot path assumes. Enforced at
    /// creation/edit time and re-checked before evaluation, so a
    /// hand-edited blob cannot reach the scheduler.
    pub fn validate(&self) -> Result<(), SubscriptionValidationError> {
        if self.name.trim().is_empty() {
            return Err(SubscriptionValidationError::EmptyName);
        }
        if self.name.len() > 256 {
            return Err(SubscriptionValidationError::NameTooLong);
        }
        if self.period_value < 1 {
            return Err(SubscriptionValidationError::InvalidPeriod);
        }
        if self.reminder_days < 0 {
            return Err(SubscriptionValidationError::NegativeReminderDays);
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SubscriptionValidationError {
    #[error("Subscription name cannot be empty")]
    EmptyName,
    #[error("Subscription name is too long")]
    NameTooLong,
    #[error("Period value must be at least 1")]
    InvalidPeriod,
    #[error("Reminder days cannot be negative")]
    NegativeReminderDays,
}
