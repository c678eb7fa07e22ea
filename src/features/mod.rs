pub mod auth;
pub mod map;
pub mod places;
