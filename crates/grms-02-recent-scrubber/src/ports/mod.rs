//! Ports Layer
//!
//! Driven port for the desktop's "recently used" record store.

pub mod outbound;

pub use outbound::RecentStore;
