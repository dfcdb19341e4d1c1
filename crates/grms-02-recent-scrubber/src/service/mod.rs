//! Service Layer
//!
//! - `scrubber`: scrub pass, purge, permission hygiene and the watch loop
//! - `edit`: non-resident blacklist additions and removals

pub mod edit;
pub mod scrubber;

pub use edit::{apply_edits, EditSummary};
pub use scrubber::{PermissionStatus, RecentScrubber, PRIVATE_MODE};
