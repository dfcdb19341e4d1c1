//! Outbound Ports (Driven Ports)

use std::path::Path;

use crate::domain::RecentItem;
use crate::error::ScrubError;

/// The desktop's "recently used" record store
pub trait RecentStore: Send {
    /// Every record currently stored
    fn items(&self) -> Result<Vec<RecentItem>, ScrubError>;

    /// Remove the record with this exact URI
    fn remove(&mut self, uri: &str) -> Result<(), ScrubError>;

    /// Remove every record, returning how many were removed
    fn purge(&mut self) -> Result<usize, ScrubError>;

    /// File backing the store, for permission hygiene and change watching
    fn path(&self) -> &Path;
}
