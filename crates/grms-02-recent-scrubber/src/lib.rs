//! # GRMS-02 Recent Scrubber
//!
//! Watches the desktop "recently used" record and removes every entry whose
//! URI matches the hashed prefix blacklist from `grms-01-prefix-blacklist`.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): URI normalization, record types
//! - **Ports Layer** (`ports/`): `RecentStore` driven port
//! - **Adapters Layer** (`adapters/`):
//!   - `XbelRecentStore`: freedesktop `recently-used.xbel` file
//!   - `InMemoryRecentStore`: shared in-process record list
//!   - `watch_file`: change notifications by polling file metadata
//! - **Service Layer** (`service/`):
//!   - `RecentScrubber`: scrub pass, purge, permission hygiene, watch loop
//!   - `apply_edits`: blacklist additions/removals from user input
//! - `config`: command-line arguments and resolved settings
//!
//! ## Privacy
//!
//! - Matched URIs are never logged; scrub passes log a single summary
//! - The record file is kept owner read/write only

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{watch_file, InMemoryRecentStore, XbelRecentStore};
pub use config::{Args, ScrubberConfig};
pub use domain::{any_to_url, RecentItem, ScrubReport};
pub use error::ScrubError;
pub use ports::RecentStore;
pub use service::{apply_edits, EditSummary, PermissionStatus, RecentScrubber};
