//! Recent record scrubber
//!
//! Owns the blacklist and the record store. A scrub pass collects every
//! matching record first, then removes them in one batch under a single
//! summary log line, so matched URIs never reach the logs.

use grms_01_prefix_blacklist::PrefixHashSet;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use crate::domain::ScrubReport;
use crate::error::ScrubError;
use crate::ports::RecentStore;

/// Permission bits the record file should have: owner read/write only
pub const PRIVATE_MODE: u32 = 0o600;

/// Result of a permission hygiene check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionStatus {
    /// Already owner read/write only
    Private,
    /// Permissions were tightened
    Fixed { previous: u32 },
    /// Permissions are too open and could not be tightened
    FixFailed { current: u32 },
    /// The record file does not exist yet
    Missing,
    /// The platform has no Unix permission bits
    Unsupported,
}

/// Removes blacklisted records from a `RecentStore`
pub struct RecentScrubber<S: RecentStore> {
    blacklist: PrefixHashSet,
    store: S,
}

impl<S: RecentStore> RecentScrubber<S> {
    pub fn new(blacklist: PrefixHashSet, store: S) -> Self {
        Self { blacklist, store }
    }

    pub fn blacklist(&self) -> &PrefixHashSet {
        &self.blacklist
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Remove every record whose URI matches the blacklist
    ///
    /// A record that cannot be removed is logged and counted as failed; it
    /// does not abort the pass.
    pub fn scrub(&mut self) -> Result<ScrubReport, ScrubError> {
        debug!("Cleaning recent items list...");
        let items = self.store.items()?;

        let mut report = ScrubReport {
            scanned: items.len(),
            ..ScrubReport::default()
        };
        let mut found = Vec::new();
        for item in items {
            if self.blacklist.contains(&item.uri) {
                found.push(item.uri);
            } else {
                debug!("Skipped {}", item.display_name);
            }
        }

        report.matched = found.len();
        if found.is_empty() {
            return Ok(report);
        }

        info!("Removing {} entries", found.len());
        while let Some(uri) = found.pop() {
            match self.store.remove(&uri) {
                Ok(()) => report.removed += 1,
                Err(e) => {
                    warn!("Failed to remove item (maybe already done): {}", e);
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }

    /// Remove every record regardless of the blacklist
    pub fn purge(&mut self) -> Result<usize, ScrubError> {
        let path = self.store.path().display().to_string();
        match self.store.purge() {
            Ok(count) => {
                info!("Purged {} items from {}", count, path);
                Ok(count)
            }
            Err(e) => {
                error!("Could not purge {}: {}", path, e);
                Err(e)
            }
        }
    }

    /// Make the record file owner read/write only
    ///
    /// Any other mode, stricter ones included, is reset to `0o600`.
    #[cfg(unix)]
    pub fn enforce_permissions(&self) -> Result<PermissionStatus, ScrubError> {
        use std::fs;
        use std::io::ErrorKind;
        use std::os::unix::fs::PermissionsExt;

        let path = self.store.path();
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Recent items file does not exist yet: {}", path.display());
                return Ok(PermissionStatus::Missing);
            }
            Err(e) => return Err(ScrubError::io(path, e)),
        };

        let mode = metadata.permissions().mode() & 0o777;
        if mode == PRIVATE_MODE {
            return Ok(PermissionStatus::Private);
        }

        warn!(
            "Bad file permissions on recent items list. Fixing: {}",
            path.display()
        );
        match fs::set_permissions(path, fs::Permissions::from_mode(PRIVATE_MODE)) {
            Ok(()) => Ok(PermissionStatus::Fixed { previous: mode }),
            Err(e) => {
                error!("Failed to chmod {}: {}", path.display(), e);
                Ok(PermissionStatus::FixFailed { current: mode })
            }
        }
    }

    #[cfg(not(unix))]
    pub fn enforce_permissions(&self) -> Result<PermissionStatus, ScrubError> {
        Ok(PermissionStatus::Unsupported)
    }

    /// Permission hygiene followed by the initial scrub
    pub fn start(&mut self) -> Result<ScrubReport, ScrubError> {
        self.enforce_permissions()?;
        self.scrub()
    }

    /// Scrub on every change notification until shutdown
    ///
    /// Returns when `shutdown` flips to `true`, its sender is dropped, or the
    /// change channel closes. Failed passes are logged and the loop goes on;
    /// the next change retries.
    pub async fn run(
        &mut self,
        changes: &mut mpsc::Receiver<()>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<(), ScrubError> {
        info!("Watching recent items list: {}", self.store.path().display());

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                change = changes.recv() => {
                    if change.is_none() {
                        debug!("Change notifications closed");
                        break;
                    }
                    if let Err(e) = self.enforce_permissions().and_then(|_| self.scrub()) {
                        error!("Scrub pass failed: {}", e);
                    }
                }
            }
        }

        info!("Stopped watching recent items list");
        Ok(())
    }
}
