//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the backend HTTP client and the session token storage.

pub mod http;
pub mod session;
