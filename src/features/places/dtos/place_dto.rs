use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::places::models::PlaceId;
use crate::shared::types::{Coordinates, PageOptions};
use crate::shared::validation::PHONE_REGEX;

/// Fields the user fills in before a place is created
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PlaceFormDto {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,

    #[validate(length(min = 2, message = "Category is required"))]
    pub category: String,
}

impl PlaceFormDto {
    /// Combine the form with the position picked on the map
    pub fn into_create(self, position: Coordinates) -> CreatePlaceDto {
        CreatePlaceDto {
            name: self.name,
            description: self.description,
            category: self.category,
            latitude: position.lat,
            longitude: position.lng,
            address: None,
            phone: None,
            website: None,
            specialties: None,
            image_url: None,
        }
    }
}

/// Request body for `POST /places/`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePlaceDto {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,

    #[validate(length(min = 2, message = "Category is required"))]
    pub category: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude out of range"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude out of range"))]
    pub longitude: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone number"))]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Invalid website URL"))]
    pub website: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,
}

/// Request body for `PUT /places/{id}`; only set fields are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePlaceDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, message = "Category is required"))]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude out of range"))]
    pub latitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude out of range"))]
    pub longitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone number"))]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Invalid website URL"))]
    pub website: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,
}

/// Query filters for `GET /places/`.
///
/// Absent filters are omitted from the query string; nothing is defaulted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceFilters {
    pub category: Option<String>,
    pub search: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Kilometres around `lat`/`lng`
    pub radius: Option<f64>,
    pub page: PageOptions,
}

impl PlaceFilters {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("category", category.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(lat) = self.lat {
            pairs.push(("lat", lat.to_string()));
        }
        if let Some(lng) = self.lng {
            pairs.push(("lng", lng.to_string()));
        }
        if let Some(radius) = self.radius {
            pairs.push(("radius", radius.to_string()));
        }
        pairs.extend(self.page.query_pairs());

        pairs
    }
}

/// Rating and optional comment entered by the user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReviewDto {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Request body for `POST /places/{id}/reviews`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ReviewPayload<'a> {
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<&'a str>,
    pub place_id: PlaceId,
}
