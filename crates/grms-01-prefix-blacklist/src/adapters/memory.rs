use parking_lot::Mutex;

use crate::error::StoreError;
use crate::ports::BlacklistStore;

const LOCATION: &str = "<memory>";

/// In-memory blacklist store
///
/// Starts absent (like a first run) unless built with contents. Writes can
/// be made to fail to exercise error paths.
#[derive(Debug, Default)]
pub struct InMemoryBlacklistStore {
    contents: Mutex<Option<Vec<u8>>>,
    fail_writes: Mutex<bool>,
}

impl InMemoryBlacklistStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: Mutex::new(Some(contents.into())),
            fail_writes: Mutex::new(false),
        }
    }

    /// Make subsequent writes fail (or succeed again)
    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock() = fail;
    }

    pub fn contents(&self) -> Option<Vec<u8>> {
        self.contents.lock().clone()
    }

    pub fn contents_string(&self) -> Option<String> {
        self.contents()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl BlacklistStore for InMemoryBlacklistStore {
    fn read(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.contents())
    }

    fn write(&self, contents: &[u8]) -> Result<(), StoreError> {
        if *self.fail_writes.lock() {
            return Err(StoreError::WriteRejected {
                location: LOCATION.to_string(),
                message: "writes disabled".to_string(),
            });
        }
        *self.contents.lock() = Some(contents.to_vec());
        Ok(())
    }

    fn location(&self) -> String {
        LOCATION.to_string()
    }
}
