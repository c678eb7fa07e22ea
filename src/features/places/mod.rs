pub mod clients;
pub mod dtos;
pub mod models;
pub mod services;

pub use clients::{PlacesApi, PlacesClient};
pub use services::{PlaceRepository, PlaceService};
