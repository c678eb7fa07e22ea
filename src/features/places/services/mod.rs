mod place_repository;
mod place_service;
pub mod search_service;

pub use place_repository::PlaceRepository;
pub use place_service::PlaceService;
pub use search_service::{filter_places, find_exact_match, search, SearchOutcome};
