//! Renewal and reminder decisions.
//!
//! This is the only part of the system the scheduled run talks to. Each
//! subscription is evaluated fresh against the injected clock: the service
//! derives how many wall-clock days remain until expiry, rolls an overdue
//! auto-renewing subscription forward through however many cycles it
//! missed, and decides whether the reminder window is open. No state is
//! kept between runs beyond the expiry instant itself.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, info, warn};

use calendar::civil;
use calendar::{CalendarDate, CalendarError};

use crate::domain::clock::Clock;
use crate::domain::models::Subscription;
use crate::storage::traits::SubscriptionStorage;

/// How a subscription stands at the evaluated instant. Derived fresh on
/// every run, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleState {
    /// Subscription is switched off; nothing to do.
    Inactive,
    /// Expiry lies ahead, outside the reminder window.
    ActiveFuture,
    /// Expiry lies within the reminder window (or is today).
    ActiveDueSoon,
    /// Expiry lay in the past and the subscription was rolled forward.
    ActiveOverdueAutoRenew,
    /// Expiry lies in the past and renewal is manual.
    ActiveOverdueManual,
}

/// Outcome of evaluating one subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct RenewalResult {
    /// New expiry to persist, if the catch-up loop advanced it.
    pub updated_expiry: Option<DateTime<Utc>>,
    /// Whole days between today and the (possibly advanced) expiry.
    pub days_remaining: i64,
    /// Whether a reminder should go out for this subscription.
    pub should_notify: bool,
    /// The state the decision was derived from.
    pub state: ScheduleState,
}

/// A subscription that is due for a reminder, with its day count.
#[derive(Debug, Clone)]
pub struct DueSubscription {
    pub subscription: Subscription,
    pub days_remaining: i64,
}

/// Result of one scheduled pass over the whole collection.
#[derive(Debug, Default)]
pub struct CheckOutcome {
    /// Subscriptions whose reminder window is open, most urgent first.
    pub due: Vec<DueSubscription>,
    /// Number of records whose expiry was advanced and persisted.
    pub renewed: usize,
    /// Records skipped because validation or calendar conversion failed.
    pub skipped: usize,
}

impl CheckOutcome {
    /// The `(subscription id, days remaining)` pairs to hand to the caller
    /// for notification dispatch.
    pub fn reminder_pairs(&self) -> Vec<(String, i64)> {
        self.due
            .iter()
            .map(|d| (d.subscription.id.clone(), d.days_remaining))
            .collect()
    }
}

/// Whether `days_remaining` falls inside the reminder window.
///
/// A zero-day window means "remind on the expiry day only"; otherwise the
/// window covers expiry day through `reminder_days` days ahead.
fn in_reminder_window(days_remaining: i64, reminder_days: i64) -> bool {
    if reminder_days == 0 {
        days_remaining == 0
    } else {
        (0..=reminder_days).contains(&days_remaining)
    }
}

/// Evaluate one subscription against `now`.
///
/// Pure: the caller owns persisting `updated_expiry` before the next run.
/// Once the advanced expiry is persisted, re-evaluating at the same `now`
/// finds `days_remaining >= 0` and cannot re-enter the catch-up loop.
pub fn evaluate(
    subscription: &Subscription,
    now: DateTime<Utc>,
    tz: Tz,
) -> Result<RenewalResult, CalendarError> {
    let days_remaining = civil::day_difference(subscription.expiry_date, now, tz);

    if !subscription.is_active {
        return Ok(RenewalResult {
            updated_expiry: None,
            days_remaining,
            should_notify: false,
            state: ScheduleState::Inactive,
        });
    }

    if days_remaining < 0 && subscription.auto_renew {
        let (expiry, days) = catch_up(subscription, now, tz)?;
        return Ok(RenewalResult {
            updated_expiry: Some(expiry),
            days_remaining: days,
            should_notify: in_reminder_window(days, subscription.reminder_days),
            state: ScheduleState::ActiveOverdueAutoRenew,
        });
    }

    if days_remaining < 0 {
        // overdue without auto-renew: always remind, whatever the window
        return Ok(RenewalResult {
            updated_expiry: None,
            days_remaining,
            should_notify: true,
            state: ScheduleState::ActiveOverdueManual,
        });
    }

    let should_notify = in_reminder_window(days_remaining, subscription.reminder_days);
    Ok(RenewalResult {
        updated_expiry: None,
        days_remaining,
        should_notify,
        state: if should_notify {
            ScheduleState::ActiveDueSoon
        } else {
            ScheduleState::ActiveFuture
        },
    })
}

/// Advance an overdue expiry period by period until it is no longer in the
/// past, preserving its wall-clock time-of-day.
///
/// Termination: every hop lands strictly later on the civil calendar, so
/// the iteration count is bounded by the overdue span divided by the
/// period length.
fn catch_up(
    subscription: &Subscription,
    now: DateTime<Utc>,
    tz: Tz,
) -> Result<(DateTime<Utc>, i64), CalendarError> {
    let period = subscription.period();
    let local_expiry = subscription.expiry_date.with_timezone(&tz);
    let wall_time = local_expiry.time();
    let today = civil::civil_date_at(now, tz);

    let mut anchor = CalendarDate::resolve(local_expiry.date_naive(), subscription.calendar_kind())?;
    let mut hops = 0u32;
    loop {
        anchor = anchor.add_period(&period)?;
        hops += 1;
        let date = anchor.to_solar()?;
        let days = (date - today).num_days();
        if days >= 0 {
            debug!(
                subscription = %subscription.id,
                hops,
                new_expiry = %date,
                days_remaining = days,
                "caught up overdue subscription"
            );
            return Ok((civil::instant_at(tz, date, wall_time), days));
        }
    }
}

/// Service that runs the scheduled check over the stored collection.
#[derive(Clone)]
pub struct RenewalService<S> {
    store: S,
    clock: Arc<dyn Clock>,
    timezone: Tz,
}

impl<S: SubscriptionStorage> RenewalService<S> {
    pub fn new(store: S, clock: Arc<dyn Clock>, timezone: Tz) -> Self {
        Self {
            store,
            clock,
            timezone,
        }
    }

    /// Evaluate every stored subscription once, persist any advanced
    /// expiries in a single collection replace, and return the
    /// subscriptions whose reminder window is open.
    ///
    /// Records that fail validation or calendar conversion are skipped
    /// with a diagnostic and left untouched; the engine never guesses a
    /// renewal date.
    pub fn run_scheduled_check(&self) -> Result<CheckOutcome> {
        let now = self.clock.now();
        let subscriptions = self.store.list_subscriptions()?;
        info!(
            count = subscriptions.len(),
            timezone = %self.timezone,
            "starting scheduled expiry check"
        );

        let mut records = Vec::with_capacity(subscriptions.len());
        let mut outcome = CheckOutcome::default();

        for subscription in subscriptions {
            if let Err(err) = subscription.validate() {
                warn!(
                    subscription = %subscription.id,
                    error = %err,
                    "skipping invalid subscription record"
                );
                outcome.skipped += 1;
                records.push(subscription);
                continue;
            }

            match evaluate(&subscription, now, self.timezone) {
                Ok(result) => {
                    let mut record = subscription;
                    if let Some(expiry) = result.updated_expiry {
                        record.expiry_date = expiry;
                        record.updated_at = now.to_rfc3339();
                        outcome.renewed += 1;
                    }
                    if result.should_notify {
                        outcome.due.push(DueSubscription {
                            subscription: record.clone(),
                            days_remaining: result.days_remaining,
                        });
                    }
                    records.push(record);
                }
                Err(err) => {
                    warn!(
                        subscription = %subscription.id,
                        error = %err,
                        "calendar conversion failed; skipping this record"
                    );
                    outcome.skipped += 1;
                    records.push(subscription);
                }
            }
        }

        if outcome.renewed > 0 {
            self.store.replace_all_subscriptions(&records)?;
        }

        outcome.due.sort_by_key(|d| d.days_remaining);
        info!(
            due = outcome.due.len(),
            renewed = outcome.renewed,
            skipped = outcome.skipped,
            "scheduled expiry check complete"
        );
        Ok(outcome)
    }
}
