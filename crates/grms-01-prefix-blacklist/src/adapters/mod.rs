//! Adapters Layer
//!
//! `BlacklistStore` implementations:
//! - `file`: Path on disk, replaced atomically
//! - `memory`: In-process buffer

pub mod file;
pub mod memory;

pub use file::FileBlacklistStore;
pub use memory::InMemoryBlacklistStore;
