//! Outbound Ports (Driven Ports)
//!
//! The backing store a blacklist is loaded from and saved to. Stores are
//! single-writer: nothing here locks or merges concurrent writers.

use crate::error::StoreError;

/// Backing store for a persisted blacklist
pub trait BlacklistStore {
    /// Read the whole store
    ///
    /// Returns `Ok(None)` when the store does not exist yet (first run).
    /// Any other failure, including permission errors, is an error.
    fn read(&self) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the whole store with `contents`
    fn write(&self, contents: &[u8]) -> Result<(), StoreError>;

    /// Human-readable location for diagnostics
    fn location(&self) -> String;
}
