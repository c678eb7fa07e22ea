use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::places::clients::PlacesApi;
use crate::features::places::dtos::{
    CreateReviewDto, PlaceFilters, PlaceFormDto, UpdatePlaceDto,
};
use crate::features::places::models::{Place, PlaceId, Review};
use crate::features::places::services::place_repository::PlaceRepository;
use crate::shared::types::Coordinates;
use crate::shared::validation::format_validation_errors;

/// Place flows that combine validation, the backend and the local repository
pub struct PlaceService {
    api: Arc<dyn PlacesApi>,
}

impl PlaceService {
    pub fn new(api: Arc<dyn PlacesApi>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &Arc<dyn PlacesApi> {
        &self.api
    }

    /// Fetch places and replace the repository contents
    pub async fn load(&self, repository: &mut PlaceRepository, filters: &PlaceFilters) -> Result<usize> {
        let places = self.api.list_places(filters).await?;
        let count = places.len();
        repository.replace(places);
        tracing::debug!(
            "Loaded {} places ({} categories)",
            count,
            repository.categories().len()
        );
        Ok(count)
    }

    /// Create a place from the form and the staged map position.
    ///
    /// Validation, the position and the session are checked before any
    /// request is made. On success the place is appended to the repository.
    pub async fn submit_new_place(
        &self,
        repository: &mut PlaceRepository,
        form: PlaceFormDto,
        position: Option<Coordinates>,
        authenticated: bool,
    ) -> Result<Place> {
        form.validate()
            .map_err(|e| AppError::Validation(format_validation_errors(&e)))?;

        let position = position.ok_or_else(|| {
            AppError::Validation("A location must be selected on the map".to_string())
        })?;
        if !position.is_valid() {
            return Err(AppError::Validation(format!(
                "Selected location is out of range: {}, {}",
                position.lat, position.lng
            )));
        }

        if !authenticated {
            return Err(AppError::Unauthorized(
                "You must log in to add a place".to_string(),
            ));
        }

        let data = form.into_create(position);
        let place = self.api.create_place(&data).await?;
        repository.push(place.clone());

        Ok(place)
    }

    /// Send the set fields of `changes` and refresh the local copy.
    ///
    /// Validation and the session check happen before any request.
    pub async fn update_place(
        &self,
        repository: &mut PlaceRepository,
        id: PlaceId,
        changes: UpdatePlaceDto,
        authenticated: bool,
    ) -> Result<Place> {
        changes
            .validate()
            .map_err(|e| AppError::Validation(format_validation_errors(&e)))?;

        if !authenticated {
            return Err(AppError::Unauthorized(
                "You must log in to edit a place".to_string(),
            ));
        }

        let place = self.api.update_place(id, &changes).await?;
        if !repository.update(place.clone()) {
            tracing::debug!("Updated place {} is not in the current list", id);
        }

        Ok(place)
    }

    pub async fn add_review(
        &self,
        place_id: PlaceId,
        review: CreateReviewDto,
        authenticated: bool,
    ) -> Result<Review> {
        review
            .validate()
            .map_err(|e| AppError::Validation(format_validation_errors(&e)))?;

        if !authenticated {
            return Err(AppError::Unauthorized(
                "You must log in to review a place".to_string(),
            ));
        }

        Ok(self.api.create_review(place_id, &review).await?)
    }
}
