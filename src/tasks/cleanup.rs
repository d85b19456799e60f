//! Query Cache Cleanup Task
//!
//! Background task that periodically drops stale query results so abandoned
//! search keys do not linger until evicted.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::QueryCache;

/// Spawns a background task that purges expired query results every
/// `cleanup_interval_secs` seconds.
///
/// Returns the task handle so it can be aborted during graceful shutdown.
pub fn spawn_cleanup_task(
    cache: Arc<RwLock<QueryCache>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting query cache cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.cleanup_expired();

            if removed > 0 {
                info!("Cache cleanup: removed {} expired result sets", removed);
            } else {
                debug!("Cache cleanup: no expired result sets found");
            }
        }
    })
}
