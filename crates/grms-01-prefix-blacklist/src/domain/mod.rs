//! Domain Layer - Pure blacklist logic
//!
//! This layer contains:
//! - Prefix digest (SHA-1, on-disk format version 1)
//! - Blacklist entries
//! - The sorted prefix hash set and its matching algorithm
//! - The line-oriented text codec
//!
//! RULES:
//! - No I/O operations outside `PrefixHashSet::load`/`save`, which go
//!   through the `BlacklistStore` port
//! - No async code

pub mod codec;
pub mod digest;
pub mod entry;
pub mod prefix_set;

pub use digest::{hash_prefix, PrefixDigest, DIGEST_HEX_LEN, DIGEST_LEN};
pub use entry::BlacklistEntry;
pub use prefix_set::PrefixHashSet;
