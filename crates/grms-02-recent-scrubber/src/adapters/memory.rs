use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::RecentItem;
use crate::error::ScrubError;
use crate::ports::RecentStore;

/// In-memory recent record store
///
/// Clones share the same record list, so a test can hand one clone to the
/// scrubber and inspect the other. URIs listed in `failing` refuse removal.
#[derive(Clone, Debug, Default)]
pub struct InMemoryRecentStore {
    items: Arc<Mutex<Vec<RecentItem>>>,
    failing: Arc<Mutex<Vec<String>>>,
    path: PathBuf,
}

impl InMemoryRecentStore {
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator<Item = RecentItem>,
    {
        Self {
            items: Arc::new(Mutex::new(items.into_iter().collect())),
            ..Self::default()
        }
    }

    /// Report `path` as the backing file
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn push(&self, item: RecentItem) {
        self.items.lock().push(item);
    }

    /// Make removal of `uri` fail
    pub fn fail_removal_of(&self, uri: impl Into<String>) {
        self.failing.lock().push(uri.into());
    }

    pub fn uris(&self) -> Vec<String> {
        self.items.lock().iter().map(|item| item.uri.clone()).collect()
    }
}

impl RecentStore for InMemoryRecentStore {
    fn items(&self) -> Result<Vec<RecentItem>, ScrubError> {
        Ok(self.items.lock().clone())
    }

    fn remove(&mut self, uri: &str) -> Result<(), ScrubError> {
        if self.failing.lock().iter().any(|failing| failing == uri) {
            return Err(ScrubError::ItemNotFound);
        }

        let mut items = self.items.lock();
        let before = items.len();
        items.retain(|item| item.uri != uri);
        if items.len() == before {
            return Err(ScrubError::ItemNotFound);
        }
        Ok(())
    }

    fn purge(&mut self) -> Result<usize, ScrubError> {
        let mut items = self.items.lock();
        let count = items.len();
        items.clear();
        Ok(count)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
