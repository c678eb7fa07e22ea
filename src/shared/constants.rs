/// Backend used when `API_BASE_URL` is not set
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Session file used when `SESSION_FILE` is not set
pub const DEFAULT_SESSION_FILE: &str = ".places_session.json";

/// Storage key under which the bearer token is persisted
pub const AUTH_TOKEN_KEY: &str = "auth_token";

// =============================================================================
// ERROR MESSAGES
// =============================================================================

/// Message for requests that never got a response
pub const NETWORK_ERROR_MESSAGE: &str = "Could not connect to the server";

/// Message for 2xx responses whose body could not be decoded
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from server";

// =============================================================================
// MAP DEFAULTS
// =============================================================================

/// Mexico City (lat, lng)
pub const DEFAULT_MAP_CENTER: (f64, f64) = (19.4326, -99.1332);

pub const DEFAULT_MAP_ZOOM: u8 = 13;

/// Zoom applied when a single place is focused
pub const DETAIL_MAP_ZOOM: u8 = 16;
