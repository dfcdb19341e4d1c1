//! Blacklist entry

use super::digest::{hash_prefix, PrefixDigest};

/// A single hashed prefix: the digest of the first `prefix_len` bytes
///
/// Field order matters: the derived `Ord` sorts by length first, then by
/// digest bytes, which is the order the set keeps entries in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlacklistEntry {
    prefix_len: usize,
    digest: PrefixDigest,
}

impl BlacklistEntry {
    /// Build an entry from already-hashed parts (used by the codec)
    pub fn new(prefix_len: usize, digest: PrefixDigest) -> Self {
        Self { prefix_len, digest }
    }

    /// Hash a plaintext prefix; the plaintext is not retained
    pub fn from_prefix(prefix: &str) -> Self {
        let (digest, prefix_len) = hash_prefix(prefix, None);
        Self { prefix_len, digest }
    }

    /// Number of UTF-8 bytes that were hashed
    pub fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    pub fn digest(&self) -> PrefixDigest {
        self.digest
    }

    /// True if the first `prefix_len` bytes of `uri` hash to this digest
    pub fn matches(&self, uri: &str) -> bool {
        self.prefix_len <= uri.len() && hash_prefix(uri, Some(self.prefix_len)).0 == self.digest
    }
}
