mod place_dto;

pub use place_dto::{CreatePlaceDto, CreateReviewDto, PlaceFilters, PlaceFormDto, UpdatePlaceDto};
pub(crate) use place_dto::ReviewPayload;
