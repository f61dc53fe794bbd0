//! Start-up delay used to hold a container before a service launches.

use std::time::Duration;

use tracing::info;

/// Default delay, in seconds.
pub const DEFAULT_DELAY_SECONDS: u64 = 120;

/// Sleep for `duration`, logging before and after.
pub async fn run(duration: Duration) {
    info!(seconds = duration.as_secs_f64(), "Delaying...");
    tokio::time::sleep(duration).await;
    info!("Done.");
}
