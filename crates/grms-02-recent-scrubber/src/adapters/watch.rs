//! File change notifications
//!
//! Polls the file's modification time and size. Bursts of changes between
//! two polls collapse into one notification; a missing file counts as a
//! state, so creation and deletion both notify.

use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::time::MissedTickBehavior;
use tracing::debug;

type Fingerprint = Option<(Option<SystemTime>, u64)>;

/// Spawn a poller that sends `()` whenever `path` changes
///
/// Changes are relative to the file's state when this is called. The poller
/// stops once the receiver is dropped. Must be called from within a Tokio
/// runtime.
pub fn watch_file(path: PathBuf, interval: Duration) -> mpsc::Receiver<()> {
    let (tx, rx) = mpsc::channel(1);
    let mut last = to_fingerprint(std::fs::metadata(&path));

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        debug!("Watching for changes: {}", path.display());

        loop {
            ticker.tick().await;
            if tx.is_closed() {
                break;
            }

            let current = fingerprint(&path).await;
            if current == last {
                continue;
            }
            last = current;

            match tx.try_send(()) {
                Ok(()) | Err(TrySendError::Full(())) => {}
                Err(TrySendError::Closed(())) => break,
            }
        }
        debug!("Stopped watching: {}", path.display());
    });

    rx
}

async fn fingerprint(path: &Path) -> Fingerprint {
    to_fingerprint(tokio::fs::metadata(path).await)
}

fn to_fingerprint(metadata: std::io::Result<Metadata>) -> Fingerprint {
    let metadata = metadata.ok()?;
    Some((metadata.modified().ok(), metadata.len()))
}
