pub mod models;
pub mod services;

pub use models::{MapSignal, MapView};
pub use services::MapCoordinator;
