use std::path::PathBuf;

use tracing::{info, Level};

use renewal_tracker_backend::domain::{format_notification_content, Notifier};
use renewal_tracker_backend::Backend;

/// One scheduled check over the stored subscription collection: evaluate
/// every record, persist any catch-up renewals, and dispatch a single
/// reminder for everything whose window is open. Meant to be invoked from
/// cron or a systemd timer; all the interesting logic lives in the library.
fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let data_dir = std::env::var("RENEWAL_TRACKER_DATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"));
    info!("Using data directory {}", data_dir.display());

    let backend = Backend::new(&data_dir)?;
    let outcome = backend.renewal_service.run_scheduled_check()?;

    if outcome.due.is_empty() {
        info!("No subscriptions due for reminder");
        return Ok(());
    }

    let body = format_notification_content(&outcome.due, backend.timezone);
    backend
        .notifier
        .notify(&backend.config.notification_title, &body)?;

    Ok(())
}
