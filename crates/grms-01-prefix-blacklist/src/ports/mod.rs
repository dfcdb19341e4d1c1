//! Ports Layer
//!
//! Defines the driven port the blacklist persists through.

pub mod outbound;

pub use outbound::BlacklistStore;
