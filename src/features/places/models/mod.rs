mod place;
mod review;

pub use place::{Place, PlaceId};
pub use review::Review;
