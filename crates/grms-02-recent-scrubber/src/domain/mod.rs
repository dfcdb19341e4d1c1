//! Domain Layer
//!
//! - `uri`: turns user input into the URI form recent records use
//! - `item`: recent record and scrub pass summary types

pub mod item;
pub mod uri;

pub use item::{RecentItem, ScrubReport};
pub use uri::{any_to_url, path_to_file_url};
