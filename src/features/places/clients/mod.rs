mod places_client;

pub use places_client::{PlacesApi, PlacesClient};
