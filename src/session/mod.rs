//! Session module
//!
//! Per-user chat transcripts kept in memory.

pub mod store;

pub use store::{spawn_sweeper, SessionEntry, SessionId, SessionStore, SharedSession};
