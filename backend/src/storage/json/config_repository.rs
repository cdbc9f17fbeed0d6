//! YAML application configuration.
//!
//! A single `config.yaml` at the root of the data directory holds the few
//! settings the scheduled run needs. Missing file means defaults are
//! written out on first access, so a fresh data directory is usable
//! immediately.
//!
//! ## YAML Format
//!
//! ```yaml
//! timezone: "Asia/Shanghai"
//! notification_title: "Subscription renewal reminder"
//! created_at: "2025-01-21T19:30:00Z"
//! updated_at: "2025-01-21T19:35:00Z"
//! ```

use std::fs;

use anyhow::{Context, Result};
use chrono::Utc;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::storage::json::connection::JsonConnection;
use crate::storage::traits::ConfigStorage;

/// Application configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// IANA timezone name all day-boundary computations use
    pub timezone: String,
    /// Title line for reminder notifications
    pub notification_title: String,
    /// When the config was first created
    pub created_at: String,
    /// When the config was last updated
    pub updated_at: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            timezone: "UTC".to_string(),
            notification_title: "Subscription renewal reminder".to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl AppConfig {
    /// Resolve the configured timezone name against the IANA database.
    pub fn resolve_timezone(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| anyhow::anyhow!("Unknown timezone: {}", self.timezone))
    }
}

/// File-based config repository using a single YAML file.
#[derive(Debug, Clone)]
pub struct ConfigRepository {
    connection: JsonConnection,
}

impl ConfigRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    fn load_or_create(&self) -> Result<AppConfig> {
        let path = self.connection.config_path();
        if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            let config: AppConfig = serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse config {}", path.display()))?;
            debug!("loaded config from {}", path.display());
            Ok(config)
        } else {
            let config = AppConfig::default();
            self.save(&config)?;
            info!("created default config at {}", path.display());
            Ok(config)
        }
    }

    fn save(&self, config: &AppConfig) -> Result<()> {
        let contents =
            serde_yaml::to_string(config).context("Failed to serialize config")?;
        self.connection
            .write_atomic(&self.connection.config_path(), &contents)
    }
}

impl ConfigStorage for ConfigRepository {
    fn get_config(&self) -> Result<AppConfig> {
        let config = self.load_or_create()?;
        // surface a bad timezone at load time, not mid-run
        config.resolve_timezone()?;
        Ok(config)
    }

    fn update_config(&self, config: &AppConfig) -> Result<()> {
        config.resolve_timezone()?;
        let mut config = config.clone();
        config.updated_at = Utc::now().to_rfc3339();
        self.save(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::test_utils::TestEnvironment;

    #[test]
    fn test_get_creates_default_config() {
        let env = TestEnvironment::new().unwrap();
        let repo = ConfigRepository::new(env.connection.clone());

        let config = repo.get_config().unwrap();
        assert_eq!(config.timezone, "UTC");
        assert!(env.connection.config_path().exists());
    }

    #[test]
    fn test_update_and_reload() {
        let env = TestEnvironment::new().unwrap();
        let repo = ConfigRepository::new(env.connection.clone());

        let mut config = repo.get_config().unwrap();
        config.timezone = "Asia/Shanghai".to_string();
        repo.update_config(&config).unwrap();

        let reloaded = repo.get_config().unwrap();
        assert_eq!(reloaded.timezone, "Asia/Shanghai");
        assert_eq!(
            reloaded.resolve_timezone().unwrap(),
            chrono_tz::Asia::Shanghai
        );
    }

    #[test]
    fn test_unknown_timezone_is_rejected() {
        let env = TestEnvironment::new().unwrap();
        let repo = ConfigRepository::new(env.connection.clone());

        let mut config = repo.get_config().unwrap();
        config.timezone = "Mars/Olympus_Mons".to_string();
        assert!(repo.update_config(&config).is_err());
    }
}
