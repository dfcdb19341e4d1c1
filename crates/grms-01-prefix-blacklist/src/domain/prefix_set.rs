//! Sorted set of hashed prefixes
//!
//! INVARIANTS:
//! - Entries ascend by `(prefix_len, digest)` with no duplicates
//! - Entries are never edited in place, only inserted or removed
//! - Plaintext passed to `add`/`index`/`remove_all` is hashed and dropped
//!
//! Matching is a linear scan that stops at the first entry longer than the
//! query. Blacklists hold tens of entries, so a sorted `Vec` beats a tree.

use tracing::{debug, error};

use super::codec;
use super::digest::{hash_prefix, PrefixDigest};
use super::entry::BlacklistEntry;
use crate::error::BlacklistError;
use crate::ports::BlacklistStore;

/// Privacy-preserving prefix blacklist
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrefixHashSet {
    entries: Vec<BlacklistEntry>,
}

impl PrefixHashSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from arbitrary entries, sorting and collapsing duplicates
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = BlacklistEntry>,
    {
        let mut entries: Vec<BlacklistEntry> = entries.into_iter().collect();
        entries.sort_unstable();
        entries.dedup();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending `(prefix_len, digest)` order
    pub fn entries(&self) -> &[BlacklistEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlacklistEntry> {
        self.entries.iter()
    }

    /// Position of the shortest entry whose prefix matches `uri`
    ///
    /// Returns `None` if nothing matches.
    pub fn index(&self, uri: &str) -> Option<usize> {
        // Entries sharing a length share the truncated-URI hash.
        let mut cached: Option<(usize, PrefixDigest)> = None;

        for (pos, entry) in self.entries.iter().enumerate() {
            let len = entry.prefix_len();
            if len > uri.len() {
                break;
            }

            let digest = match cached {
                Some((cached_len, digest)) if cached_len == len => digest,
                _ => {
                    let (digest, _) = hash_prefix(uri, Some(len));
                    cached = Some((len, digest));
                    digest
                }
            };

            if digest == entry.digest() {
                return Some(pos);
            }
        }
        None
    }

    /// True if some blacklisted prefix matches `uri`
    pub fn contains(&self, uri: &str) -> bool {
        self.index(uri).is_some()
    }

    /// True if `prefix` is already matched by a stored entry
    ///
    /// A covered prefix may still be added; it just adds nothing to what
    /// `contains` reports.
    pub fn is_covered(&self, prefix: &str) -> bool {
        self.contains(prefix)
    }

    /// Hash and insert `prefix`
    ///
    /// Returns `false` if an identical entry was already present.
    pub fn add(&mut self, prefix: &str) -> bool {
        self.insert(BlacklistEntry::from_prefix(prefix))
    }

    /// Insert an already-hashed entry in sorted position
    pub fn insert(&mut self, entry: BlacklistEntry) -> bool {
        match self.entries.binary_search(&entry) {
            Ok(_) => {
                debug!(
                    "Prefix already in the blacklist (length {})",
                    entry.prefix_len()
                );
                false
            }
            Err(pos) => {
                self.entries.insert(pos, entry);
                true
            }
        }
    }

    /// Remove every entry that matches `uri`
    ///
    /// Entries that merely extend a removed prefix are left alone unless they
    /// match `uri` too. Returns the number of entries removed.
    pub fn remove_all(&mut self, uri: &str) -> usize {
        let mut removed = 0;
        while let Some(pos) = self.index(uri) {
            self.entries.remove(pos);
            removed += 1;
        }
        removed
    }

    /// Replace the contents with those of `store`
    ///
    /// Returns `Ok(false)` if the store does not exist yet. On any error the
    /// in-memory contents are left untouched.
    pub fn load<S>(&mut self, store: &S) -> Result<bool, BlacklistError>
    where
        S: BlacklistStore + ?Sized,
    {
        let location = store.location();
        let Some(bytes) = store.read()? else {
            debug!("No blacklist found: {}", location);
            return Ok(false);
        };

        match codec::parse_bytes(&bytes) {
            Ok(entries) => {
                self.entries = entries;
                debug!("Loaded {} blacklist entries from {}", self.len(), location);
                Ok(true)
            }
            Err(source) => {
                error!("Malformed blacklist ({}): {}", location, source);
                Err(BlacklistError::Format { location, source })
            }
        }
    }

    /// Overwrite `store` with the current contents, longest prefix first
    pub fn save<S>(&self, store: &S) -> Result<(), BlacklistError>
    where
        S: BlacklistStore + ?Sized,
    {
        store.write(codec::render(&self.entries).as_bytes())?;
        debug!(
            "Saved {} blacklist entries to {}",
            self.len(),
            store.location()
        );
        Ok(())
    }
}

impl FromIterator<BlacklistEntry> for PrefixHashSet {
    fn from_iter<I: IntoIterator<Item = BlacklistEntry>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}
