/// One "recently used" record
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentItem {
    pub uri: String,
    pub display_name: String,
}

impl RecentItem {
    pub fn new(uri: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            display_name: display_name.into(),
        }
    }
}

/// Outcome of a single scrub pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrubReport {
    /// Records examined
    pub scanned: usize,
    /// Records matching the blacklist
    pub matched: usize,
    /// Matching records actually removed
    pub removed: usize,
    /// Matching records whose removal failed
    pub failed: usize,
}
