use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::core::error::ApiError;
use crate::features::places::dtos::{
    CreatePlaceDto, CreateReviewDto, PlaceFilters, ReviewPayload, UpdatePlaceDto,
};
use crate::features::places::models::{Place, PlaceId, Review};
use crate::modules::http::{ApiClient, ApiRequest};
use crate::shared::types::{with_query, PageOptions};

/// Place endpoints of the backend
#[async_trait]
pub trait PlacesApi: Send + Sync {
    async fn list_places(&self, filters: &PlaceFilters) -> Result<Vec<Place>, ApiError>;

    async fn get_place(&self, id: PlaceId) -> Result<Place, ApiError>;

    async fn create_place(&self, data: &CreatePlaceDto) -> Result<Place, ApiError>;

    async fn update_place(&self, id: PlaceId, data: &UpdatePlaceDto) -> Result<Place, ApiError>;

    /// Resolves to `None` on `204 No Content`
    async fn delete_place(&self, id: PlaceId) -> Result<Option<serde_json::Value>, ApiError>;

    async fn list_categories(&self) -> Result<Vec<String>, ApiError>;

    async fn create_review(
        &self,
        place_id: PlaceId,
        data: &CreateReviewDto,
    ) -> Result<Review, ApiError>;

    async fn list_reviews(
        &self,
        place_id: PlaceId,
        page: &PageOptions,
    ) -> Result<Vec<Review>, ApiError>;
}

/// HTTP implementation of [`PlacesApi`]
#[derive(Clone)]
pub struct PlacesClient {
    api: Arc<ApiClient>,
    cancel: Option<CancellationToken>,
}

impl PlacesClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api, cancel: None }
    }

    /// A copy of this client whose requests are abandoned once `token` fires
    pub fn scoped(&self, token: CancellationToken) -> Self {
        Self {
            api: Arc::clone(&self.api),
            cancel: Some(token),
        }
    }

    fn prepare(&self, request: ApiRequest) -> ApiRequest {
        request.cancel_on(self.cancel.clone())
    }
}

#[async_trait]
impl PlacesApi for PlacesClient {
    async fn list_places(&self, filters: &PlaceFilters) -> Result<Vec<Place>, ApiError> {
        let endpoint = with_query("/places/", &filters.query_pairs());
        tracing::debug!("Listing places: {}", endpoint);
        self.api
            .request_as(self.prepare(ApiRequest::get(endpoint)))
            .await
    }

    async fn get_place(&self, id: PlaceId) -> Result<Place, ApiError> {
        self.api
            .request_as(self.prepare(ApiRequest::get(format!("/places/{}", id))))
            .await
    }

    async fn create_place(&self, data: &CreatePlaceDto) -> Result<Place, ApiError> {
        let request = ApiRequest::post("/places/").json(data)?;
        let place: Place = self.api.request_as(self.prepare(request)).await?;
        tracing::info!("Created place {} ({})", place.id, place.name);
        Ok(place)
    }

    async fn update_place(&self, id: PlaceId, data: &UpdatePlaceDto) -> Result<Place, ApiError> {
        let request = ApiRequest::put(format!("/places/{}", id)).json(data)?;
        self.api.request_as(self.prepare(request)).await
    }

    async fn delete_place(&self, id: PlaceId) -> Result<Option<serde_json::Value>, ApiError> {
        let result = self
            .api
            .request(self.prepare(ApiRequest::delete(format!("/places/{}", id))))
            .await?;
        tracing::info!("Deleted place {}", id);
        Ok(result)
    }

    async fn list_categories(&self) -> Result<Vec<String>, ApiError> {
        self.api
            .request_as(self.prepare(ApiRequest::get("/places/categories/")))
            .await
    }

    async fn create_review(
        &self,
        place_id: PlaceId,
        data: &CreateReviewDto,
    ) -> Result<Review, ApiError> {
        let payload = ReviewPayload {
            rating: data.rating,
            comment: data.comment.as_deref(),
            place_id,
        };
        let request = ApiRequest::post(format!("/places/{}/reviews", place_id)).json(&payload)?;
        self.api.request_as(self.prepare(request)).await
    }

    async fn list_reviews(
        &self,
        place_id: PlaceId,
        page: &PageOptions,
    ) -> Result<Vec<Review>, ApiError> {
        let endpoint = with_query(
            &format!("/places/{}/reviews", place_id),
            &page.query_pairs(),
        );
        self.api
            .request_as(self.prepare(ApiRequest::get(endpoint)))
            .await
    }
}
