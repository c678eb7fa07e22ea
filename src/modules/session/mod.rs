//! Session module for the persisted bearer token
//!
//! Callers receive a `SessionStore` trait object instead of touching storage
//! directly.

mod session_store;

pub use session_store::{FileSessionStore, MemorySessionStore, SessionStore};
