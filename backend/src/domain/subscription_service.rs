//! Subscription creation and editing boundary.
//!
//! Validation lives here so the scheduler's hot path can assume every
//! stored record is well-formed: period at least one unit long, reminder
//! window non-negative, and a lunar-anchored expiry that actually converts
//! under the 1900-2100 table.

use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::info;

use calendar::{civil, solar_to_lunar, PeriodUnit};

use crate::domain::models::Subscription;
use crate::storage::traits::SubscriptionStorage;

/// Fields supplied when creating or editing a subscription.
#[derive(Debug, Clone)]
pub struct SubscriptionDraft {
    pub name: String,
    pub expiry_date: DateTime<Utc>,
    pub period_value: u32,
    pub period_unit: PeriodUnit,
    pub reminder_days: i64,
    pub is_active: bool,
    pub auto_renew: bool,
    pub use_lunar: bool,
    pub notes: Option<String>,
}

/// Service for managing the subscription collection.
#[derive(Clone)]
pub struct SubscriptionService<S> {
    store: S,
}

impl<S: SubscriptionStorage> SubscriptionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate a draft and append it to the collection.
    pub fn create_subscription(&self, draft: SubscriptionDraft, tz: Tz) -> Result<Subscription> {
        let now = Utc::now().to_rfc3339();
        let subscription = Subscription {
            id: Subscription::generate_id(),
            name: draft.name,
            expiry_date: draft.expiry_date,
            period_value: draft.period_value,
            period_unit: draft.period_unit,
            reminder_days: draft.reminder_days,
            is_active: draft.is_active,
            auto_renew: draft.auto_renew,
            use_lunar: draft.use_lunar,
            notes: draft.notes,
            created_at: now.clone(),
            updated_at: now,
        };
        self.check_draft(&subscription, tz)?;

        let mut subscriptions = self.store.list_subscriptions()?;
        subscriptions.push(subscription.clone());
        self.store.replace_all_subscriptions(&subscriptions)?;

        info!(subscription = %subscription.id, name = %subscription.name, "created subscription");
        Ok(subscription)
    }

    /// Validate edited fields and replace the stored record.
    pub fn update_subscription(
        &self,
        id: &str,
        draft: SubscriptionDraft,
        tz: Tz,
    ) -> Result<Subscription> {
        let mut subscriptions = self.store.list_subscriptions()?;
        let record = subscriptions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| anyhow::anyhow!("Subscription not found: {}", id))?;

        record.name = draft.name;
        record.expiry_date = draft.expiry_date;
        record.period_value = draft.period_value;
        record.period_unit = draft.period_unit;
        record.reminder_days = draft.reminder_days;
        record.is_active = draft.is_active;
        record.auto_renew = draft.auto_renew;
        record.use_lunar = draft.use_lunar;
        record.notes = draft.notes;
        record.updated_at = Utc::now().to_rfc3339();

        let updated = record.clone();
        self.check_draft(&updated, tz)?;
        self.store.replace_all_subscriptions(&subscriptions)?;

        info!(subscription = %id, "updated subscription");
        Ok(updated)
    }

    /// The validation gate: structural invariants plus, for lunar-anchored
    /// records, proof that the expiry converts under the lunisolar table.
    fn check_draft(&self, subscription: &Subscription, tz: Tz) -> Result<()> {
        subscription.validate()?;
        if subscription.use_lunar {
            let civil_date = civil::civil_date_at(subscription.expiry_date, tz);
            solar_to_lunar(civil_date)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::test_utils::TestEnvironment;
    use crate::storage::json::SubscriptionRepository;
    use chrono_tz::UTC;

    fn draft(expiry: &str) -> SubscriptionDraft {
        SubscriptionDraft {
            name: "Cloud storage".to_string(),
            expiry_date: expiry.parse().unwrap(),
            period_value: 1,
            period_unit: PeriodUnit::Month,
            reminder_days: 7,
            is_active: true,
            auto_renew: true,
            use_lunar: false,
            notes: None,
        }
    }

    fn service() -> (TestEnvironment, SubscriptionService<SubscriptionRepository>) {
        let env = TestEnvironment::new().unwrap();
        let repo = SubscriptionRepository::new(env.connection.clone());
        (env, SubscriptionService::new(repo))
    }

    #[test]
    fn test_create_and_update_round_trip() {
        let (env, service) = service();
        let created = service
            .create_subscription(draft("2025-06-01T12:00:00Z"), UTC)
            .unwrap();
        assert!(created.id.starts_with("subscription::"));

        let mut edited = draft("2025-07-01T12:00:00Z");
        edited.reminder_days = 3;
        let updated = service
            .update_subscription(&created.id, edited, UTC)
            .unwrap();
        assert_eq!(updated.reminder_days, 3);

        let repo = SubscriptionRepository::new(env.connection.clone());
        let stored = repo.get_subscription(&created.id).unwrap().unwrap();
        assert_eq!(stored.expiry_date, updated.expiry_date);
    }

    #[test]
    fn test_create_rejects_invalid_period() {
        let (_env, service) = service();
        let mut bad = draft("2025-06-01T12:00:00Z");
        bad.period_value = 0;
        assert!(service.create_subscription(bad, UTC).is_err());
    }

    #[test]
    fn test_create_rejects_lunar_expiry_outside_table() {
        let (_env, service) = service();
        let mut bad = draft("2101-06-01T12:00:00Z");
        bad.use_lunar = true;
        assert!(service.create_subscription(bad, UTC).is_err());
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let (_env, service) = service();
        assert!(service
            .update_subscription("subscription::missing", draft("2025-06-01T12:00:00Z"), UTC)
            .is_err());
    }
}
