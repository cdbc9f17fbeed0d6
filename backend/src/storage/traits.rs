//! # Storage Traits
//!
//! Storage abstraction for the subscription collection and the application
//! configuration. The domain layer only ever sees these traits, so the
//! file-based implementation can be swapped for any other backend that can
//! hold the collection as one unit.

use anyhow::Result;

use crate::domain::models::Subscription;
use crate::storage::json::AppConfig;

/// Interface to the stored subscription collection.
///
/// The collection is a flat blob, not a row-level store: readers get the
/// whole list and writers replace the whole list. The scheduler performs at
/// most one `replace_all_subscriptions` per run, after every record has
/// been evaluated.
pub trait SubscriptionStorage: Send + Sync {
    /// Load the entire subscription collection.
    fn list_subscriptions(&self) -> Result<Vec<Subscription>>;

    /// Replace the entire subscription collection in one write.
    fn replace_all_subscriptions(&self, subscriptions: &[Subscription]) -> Result<()>;

    /// Look up a single subscription by id.
    fn get_subscription(&self, id: &str) -> Result<Option<Subscription>>;
}

/// Interface to the application configuration.
pub trait ConfigStorage: Send + Sync {
    /// Get the configuration, creating the default if none is stored yet.
    fn get_config(&self) -> Result<AppConfig>;

    /// Persist an updated configuration.
    fn update_config(&self, config: &AppConfig) -> Result<()>;
}
