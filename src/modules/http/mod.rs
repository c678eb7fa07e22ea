//! HTTP module for talking to the places backend

mod api_client;

pub use api_client::{ApiClient, ApiRequest, RequestBody};
