//! # Domain Module
//!
//! Business logic for the renewal tracker: deciding which subscriptions
//! are due for a reminder, rolling overdue auto-renewing ones forward, and
//! validating records before they reach storage. Everything here operates
//! on in-memory records through the storage traits and is independent of
//! any particular UI or delivery channel.
//!
//! ## Module Organization
//!
//! - **models**: the persisted subscription record and its validation
//! - **clock**: injectable source of "now"
//! - **renewal_service**: per-subscription renewal/reminder decisions and
//!   the scheduled whole-collection check
//! - **preview_service**: upcoming-renewal-date previews for UI callers
//! - **notification_service**: reminder message assembly and the notifier
//!   seam
//! - **subscription_service**: creation/edit validation boundary

pub mod clock;
pub mod models;
pub mod notification_service;
pub mod preview_service;
pub mod renewal_service;
pub mod subscription_service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use notification_service::{format_notification_content, LogNotifier, Notifier};
pub use preview_service::{PreviewService, RenewalPreview};
pub use renewal_service::{
    evaluate, CheckOutcome, DueSubscription, RenewalResult, RenewalService, ScheduleState,
};
pub use subscription_service::{SubscriptionDraft, SubscriptionService};
