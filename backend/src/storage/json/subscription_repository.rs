//! JSON-blob subscription repository.
//!
//! The whole collection lives in `subscriptions.json` as one array and is
//! always read and replaced as a unit. There is no per-record update path:
//! the scheduler evaluates everything, then writes everything, once per
//! run.

use std::fs;

use anyhow::{Context, Result};
use tracing::debug;

use crate::domain::models::Subscription;
use crate::storage::json::connection::JsonConnection;
use crate::storage::traits::SubscriptionStorage;

#[derive(Debug, Clone)]
pub struct SubscriptionRepository {
    connection: JsonConnection,
}

impl SubscriptionRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl SubscriptionStorage for SubscriptionRepository {
    fn list_subscriptions(&self) -> Result<Vec<Subscription>> {
        let path = self.connection.subscriptions_path();
        if !path.exists() {
            debug!("no subscription blob at {}, starting empty", path.display());
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let subscriptions: Vec<Subscription> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse subscription blob {}", path.display()))?;
        Ok(subscriptions)
    }

    fn replace_all_subscriptions(&self, subscriptions: &[Subscription]) -> Result<()> {
        let path = self.connection.subscriptions_path();
        let contents = serde_json::to_string_pretty(subscriptions)
            .context("Failed to serialize subscription collection")?;
        self.connection.write_atomic(&path, &contents)?;
        debug!(
            count = subscriptions.len(),
            "replaced subscription collection at {}",
            path.display()
        );
        Ok(())
    }

    fn get_subscription(&self, id: &str) -> Result<Option<Subscription>> {
        Ok(self
            .list_subscriptions()?
            .into_iter()
            .find(|s| s.id == id))
    }
}
