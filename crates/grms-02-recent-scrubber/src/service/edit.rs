//! Blacklist edits from the command line

use grms_01_prefix_blacklist::PrefixHashSet;
use tracing::{debug, info};

use crate::domain::any_to_url;

/// What a batch of edits changed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditSummary {
    /// New entries inserted
    pub added: usize,
    /// Additions that were already present
    pub duplicates: usize,
    /// Entries removed across all removal queries
    pub removed: usize,
}

/// Apply additions, then removals, converting local paths to `file://` URLs
///
/// The caller is responsible for saving the blacklist afterwards.
pub fn apply_edits<A, R>(blacklist: &mut PrefixHashSet, additions: A, removals: R) -> EditSummary
where
    A: IntoIterator,
    A::Item: AsRef<str>,
    R: IntoIterator,
    R::Item: AsRef<str>,
{
    let mut summary = EditSummary::default();

    for addition in additions {
        let uri = any_to_url(addition.as_ref());
        if blacklist.is_covered(&uri) {
            debug!("Addition is already covered by a shorter blacklisted prefix");
        }
        if blacklist.add(&uri) {
            summary.added += 1;
        } else {
            summary.duplicates += 1;
        }
    }

    for removal in removals {
        summary.removed += blacklist.remove_all(&any_to_url(removal.as_ref()));
    }

    info!(
        "Blacklist edited: {} added, {} already present, {} removed",
        summary.added, summary.duplicates, summary.removed
    );
    summary
}
