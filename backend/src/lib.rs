//! # Renewal Tracker Backend
//!
//! Domain services and storage for the subscription renewal tracker. The
//! calendar mathematics (lunisolar conversion, period arithmetic, day
//! boundaries) lives in the `calendar` crate; this crate combines it with
//! the stored subscription collection to decide, per scheduled run, which
//! subscriptions need a reminder and which overdue auto-renewing ones must
//! be rolled forward.
//!
//! The backend is fully synchronous: every evaluation is bounded
//! computation over in-memory records, and the storage layer reads and
//! rewrites the collection as one unit.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

pub mod domain;
pub mod storage;

pub use storage::json::JsonConnection;

use domain::clock::SystemClock;
use domain::notification_service::LogNotifier;
use storage::json::{ConfigRepository, SubscriptionRepository};
use storage::traits::ConfigStorage;

/// Main backend struct that wires all services to a data directory.
pub struct Backend {
    pub config: storage::json::AppConfig,
    pub timezone: chrono_tz::Tz,
    pub renewal_service: domain::RenewalService<SubscriptionRepository>,
    pub subscription_service: domain::SubscriptionService<SubscriptionRepository>,
    pub preview_service: domain::PreviewService,
    pub notifier: LogNotifier,
}

impl Backend {
    /// Create a backend instance rooted at the given data directory.
    pub fn new<P: AsRef<Path>>(data_directory: P) -> Result<Self> {
        let connection = JsonConnection::new(data_directory)?;

        let config_repository = ConfigRepository::new(connection.clone());
        let config = config_repository.get_config()?;
        let timezone = config.resolve_timezone()?;

        let store = SubscriptionRepository::new(connection.clone());
        let renewal_service =
            domain::RenewalService::new(store.clone(), Arc::new(SystemClock), timezone);
        let subscription_service = domain::SubscriptionService::new(store);

        Ok(Backend {
            config,
            timezone,
            renewal_service,
            subscription_service,
            preview_service: domain::PreviewService::new(),
            notifier: LogNotifier,
        })
    }
}
