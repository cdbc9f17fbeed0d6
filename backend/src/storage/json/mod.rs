//! # JSON Storage Module
//!
//! File-based storage for the renewal tracker. The subscription collection
//! is one JSON blob that is read and rewritten as a unit, and the
//! application configuration is a single YAML file next to it.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! ├── config.yaml           ← application configuration
//! └── subscriptions.json    ← the whole subscription collection
//! ```
//!
//! ## Features
//!
//! - Whole-collection replace per write, never partial updates
//! - Atomic file writes via a temp file and rename
//! - Config is created with defaults on first use

pub mod config_repository;
pub mod connection;
pub mod subscription_repository;

#[cfg(test)]
pub mod test_utils;

pub use config_repository::{AppConfig, ConfigRepository};
pub use connection::JsonConnection;
pub use subscription_repository::SubscriptionRepository;
