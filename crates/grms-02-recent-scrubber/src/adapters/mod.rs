//! Adapters Layer
//!
//! - `xbel`: freedesktop `recently-used.xbel` bookmark file
//! - `memory`: in-process record list
//! - `watch`: change notifications for a file

pub mod memory;
pub mod watch;
pub mod xbel;

pub use memory::InMemoryRecentStore;
pub use watch::watch_file;
pub use xbel::XbelRecentStore;
