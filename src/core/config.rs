use std::env;
use std::path::PathBuf;

use crate::shared::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_MAP_CENTER, DEFAULT_MAP_ZOOM, DEFAULT_SESSION_FILE,
    DETAIL_MAP_ZOOM,
};
use crate::shared::types::Coordinates;

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub map: MapConfig,
}

/// Remote places backend
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

/// Where the auth token is persisted between runs
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub file_path: PathBuf,
}

/// Map defaults used by the selection coordinator
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub default_center: Coordinates,
    pub default_zoom: u8,
    /// Zoom level applied when a place is focused
    pub detail_zoom: u8,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            api: ApiConfig::from_env()?,
            session: SessionConfig::from_env()?,
            map: MapConfig::from_env()?,
        })
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, String> {
        let base_url =
            env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Result<Self, String> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err("API_BASE_URL must not be empty".to_string());
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(format!(
                "API_BASE_URL must start with http:// or https://, got '{}'",
                base_url
            ));
        }

        Ok(Self { base_url })
    }
}

impl SessionConfig {
    pub fn from_env() -> Result<Self, String> {
        let file_path = env::var("SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE));

        Ok(Self { file_path })
    }
}

impl MapConfig {
    pub fn from_env() -> Result<Self, String> {
        let lat = env::var("MAP_DEFAULT_LAT")
            .unwrap_or_else(|_| DEFAULT_MAP_CENTER.0.to_string())
            .parse::<f64>()
            .map_err(|_| "MAP_DEFAULT_LAT must be a valid number".to_string())?;

        let lng = env::var("MAP_DEFAULT_LNG")
            .unwrap_or_else(|_| DEFAULT_MAP_CENTER.1.to_string())
            .parse::<f64>()
            .map_err(|_| "MAP_DEFAULT_LNG must be a valid number".to_string())?;

        let default_zoom = env::var("MAP_DEFAULT_ZOOM")
            .unwrap_or_else(|_| DEFAULT_MAP_ZOOM.to_string())
            .parse::<u8>()
            .map_err(|_| "MAP_DEFAULT_ZOOM must be a valid number".to_string())?;

        let detail_zoom = env::var("MAP_DETAIL_ZOOM")
            .unwrap_or_else(|_| DETAIL_MAP_ZOOM.to_string())
            .parse::<u8>()
            .map_err(|_| "MAP_DETAIL_ZOOM must be a valid number".to_string())?;

        let default_center = Coordinates::new(lat, lng);
        if !default_center.is_valid() {
            return Err(format!(
                "Map default center out of range: {}, {}",
                lat, lng
            ));
        }

        Ok(Self {
            default_center,
            default_zoom,
            detail_zoom,
        })
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center: Coordinates::from(DEFAULT_MAP_CENTER),
            default_zoom: DEFAULT_MAP_ZOOM,
            detail_zoom: DETAIL_MAP_ZOOM,
        }
    }
}
