use serde::{Deserialize, Serialize};

use crate::shared::types::Coordinates;

/// Visible map window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
}

/// Side effects the host UI is asked to perform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapSignal {
    /// Bring the map into view (one shot)
    ScrollIntoView,
    /// The user tried to stage a place without being logged in
    PermissionDenied,
    /// A new-place position was staged; the host opens the creation form
    NewPlaceStaged(Coordinates),
}
