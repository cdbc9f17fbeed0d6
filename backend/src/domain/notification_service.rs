//! Reminder message assembly and dispatch seam.
//!
//! The engine only decides *that* a reminder is due; delivery channels are
//! external collaborators behind the [`Notifier`] trait. This module builds
//! the one message body a scheduled run sends, listing every due
//! subscription most-urgent first.

use anyhow::Result;
use chrono_tz::Tz;
use tracing::info;

use calendar::{civil, solar_to_lunar};

use crate::domain::renewal_service::DueSubscription;

/// Narrow interface to whatever delivers reminders.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str) -> Result<()>;
}

/// Notifier that writes the reminder to the log. Stands in wherever no
/// real channel is wired up, and keeps scheduled runs observable.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<()> {
        info!(title, "\n{}", body);
        Ok(())
    }
}

/// Render the reminder body for one scheduled run.
///
/// One line per due subscription: name, how the expiry stands, the civil
/// expiry date in the configured timezone, and the lunar date for
/// subscriptions anchored to the lunisolar calendar.
pub fn format_notification_content(due: &[DueSubscription], tz: Tz) -> String {
    let mut lines = Vec::with_capacity(due.len());
    for item in due {
        let date = civil::civil_date_at(item.subscription.expiry_date, tz);
        let phrase = match item.days_remaining {
            0 => "expires today".to_string(),
            1 => "expires in 1 day".to_string(),
            d if d > 1 => format!("expires in {} days", d),
            -1 => "expired 1 day ago".to_string(),
            d => format!("expired {} days ago", -d),
        };
        let mut line = format!("- {}: {} ({})", item.subscription.name, phrase, date);
        if item.subscription.use_lunar {
            if let Ok(lunar) = solar_to_lunar(date) {
                line.push_str(&format!(", {}", lunar));
            }
        }
        lines.push(line);
    }
    lines.join("\n")
}
