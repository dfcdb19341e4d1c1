//! # GRMS-01 Prefix Blacklist
//!
//! Hashed prefix set used to decide whether a URI is blacklisted without ever
//! keeping the blacklisted prefixes in plaintext.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `PrefixDigest`: SHA-1 digest of a prefix's UTF-8 bytes
//!   - `BlacklistEntry`: `(prefix_len, digest)` pair
//!   - `PrefixHashSet`: sorted entry set with early-exit matching
//!   - `codec`: line-oriented text format
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `BlacklistStore`: Driven port for the backing store
//!
//! - **Adapters Layer** (`adapters/`): Store implementations
//!   - `FileBlacklistStore`: File on disk, replaced via temp-file rename
//!   - `InMemoryBlacklistStore`: Buffer for tests and embedding
//!
//! ## Invariants
//!
//! - **PRIVACY**: Plaintext prefixes are hashed on entry and dropped
//! - **ORDER**: Entries ascend by `(prefix_len, digest)`, no duplicates
//! - **ATOMIC LOAD**: A malformed store never partially replaces the set
//!
//! ## On-disk format (version 1)
//!
//! ```text
//! <40 hex chars of SHA-1>\t<prefix length in bytes>\n
//! ```
//!
//! Lines are written longest prefix first. `#` comments and blank lines are
//! accepted on load and dropped on save.
//!
//! ## Usage Example
//!
//! ```
//! use grms_01_prefix_blacklist::{InMemoryBlacklistStore, PrefixHashSet};
//!
//! let mut blacklist = PrefixHashSet::new();
//! blacklist.add("file:///home/user/private/");
//!
//! assert!(blacklist.contains("file:///home/user/private/notes.txt"));
//! assert!(!blacklist.contains("file:///home/user/public/notes.txt"));
//!
//! let store = InMemoryBlacklistStore::new();
//! blacklist.save(&store).unwrap();
//!
//! let mut reloaded = PrefixHashSet::new();
//! assert!(reloaded.load(&store).unwrap());
//! assert_eq!(reloaded, blacklist);
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;

// Re-exports for convenience
pub use adapters::{FileBlacklistStore, InMemoryBlacklistStore};
pub use domain::{
    hash_prefix, BlacklistEntry, PrefixDigest, PrefixHashSet, DIGEST_HEX_LEN, DIGEST_LEN,
};
pub use error::{BlacklistError, FormatError, StoreError};
pub use ports::BlacklistStore;
