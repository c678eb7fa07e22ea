use serde::{Deserialize, Serialize};

/// WGS84 decimal-degree position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and within latitude/longitude bounds
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Optional `limit`/`offset` pair; absent values are left out of the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageOptions {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl PageOptions {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}

/// Render `key=value` pairs as a query string (without the leading `?`).
pub fn encode_query(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Append a query string to an endpoint, or return it unchanged when empty.
pub fn with_query(endpoint: &str, pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        endpoint.to_string()
    } else {
        format!("{}?{}", endpoint, encode_query(pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_validity() {
        assert!(Coordinates::new(19.43, -99.19).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, f64::NAN).is_valid());
    }

    #[test]
    fn test_page_options_omit_absent_values() {
        assert!(PageOptions::default().query_pairs().is_empty());

        let page = PageOptions {
            limit: None,
            offset: Some(20),
        };
        assert_eq!(page.query_pairs(), vec![("offset", "20".to_string())]);
    }

    #[test]
    fn test_with_query_encodes_values() {
        let pairs = vec![("search", "tacos al pastor".to_string())];
        assert_eq!(
            with_query("/places/", &pairs),
            "/places/?search=tacos%20al%20pastor"
        );
        assert_eq!(with_query("/places/", &[]), "/places/");
    }
}
