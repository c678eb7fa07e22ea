mod map_coordinator;

pub use map_coordinator::MapCoordinator;
