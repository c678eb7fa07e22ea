//! Map view and selection state
//!
//! Keeps center, zoom, the selected place and the staged new-place position
//! consistent with search results and user interaction. All transitions are
//! synchronous; the host feeds UI events in and performs the returned
//! [`MapSignal`]s.

use std::borrow::Cow;

use crate::core::config::MapConfig;
use crate::features::map::models::{MapSignal, MapView};
use crate::features::places::models::{Place, PlaceId};
use crate::features::places::services::{filter_places, find_exact_match, PlaceRepository};
use crate::shared::types::Coordinates;

#[derive(Debug, Clone)]
pub struct MapCoordinator {
    config: MapConfig,
    view: MapView,
    selected: Option<PlaceId>,
    pending_position: Option<Coordinates>,
    search_term: String,
}

impl MapCoordinator {
    pub fn new(config: MapConfig) -> Self {
        let view = MapView {
            center: config.default_center,
            zoom: config.default_zoom,
        };
        Self {
            config,
            view,
            selected: None,
            pending_position: None,
            search_term: String::new(),
        }
    }

    pub fn view(&self) -> MapView {
        self.view
    }

    pub fn selected_id(&self) -> Option<PlaceId> {
        self.selected
    }

    pub fn pending_position(&self) -> Option<Coordinates> {
        self.pending_position
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Selected place resolved against the current list
    pub fn selected_place<'a>(&self, repository: &'a PlaceRepository) -> Option<&'a Place> {
        self.selected.and_then(|id| repository.get(id))
    }

    /// Places matching the current term; recomputed on every call
    pub fn filtered_places<'a>(&self, repository: &'a PlaceRepository) -> Cow<'a, [Place]> {
        filter_places(repository.places(), &self.search_term)
    }

    /// Apply a term handed over from another view.
    ///
    /// An exact name match focuses that place and asks the host to scroll the
    /// map into view; otherwise the view and selection are left alone.
    pub fn apply_search_term(
        &mut self,
        repository: &PlaceRepository,
        term: &str,
    ) -> Option<MapSignal> {
        self.search_term = term.to_string();

        let exact = find_exact_match(repository.places(), term)?;
        tracing::debug!("Search term {:?} matches place {}", term, exact.id);
        self.focus(exact);
        Some(MapSignal::ScrollIntoView)
    }

    /// Toggle selection of a marker. The map moves to the marker either way.
    pub fn marker_clicked(&mut self, place: &Place) {
        let was_selected = self.selected == Some(place.id);
        self.focus(place);
        if was_selected {
            self.selected = None;
        }
    }

    /// Select `place` unconditionally
    pub fn view_on_map(&mut self, place: &Place) -> MapSignal {
        self.focus(place);
        MapSignal::ScrollIntoView
    }

    /// Click on the map background
    pub fn map_clicked(&mut self, position: Coordinates, authenticated: bool) -> MapSignal {
        if !authenticated {
            return MapSignal::PermissionDenied;
        }

        self.pending_position = Some(position);
        self.selected = None;
        MapSignal::NewPlaceStaged(position)
    }

    /// The user panned or zoomed the map
    pub fn bounds_changed(&mut self, center: Coordinates, zoom: u8) {
        self.view = MapView { center, zoom };
    }

    pub fn clear_search(&mut self) {
        self.search_term.clear();
        self.selected = None;
        self.view = MapView {
            center: self.config.default_center,
            zoom: self.config.default_zoom,
        };
    }

    /// The staged place was created on the backend
    pub fn place_created(&mut self) {
        self.pending_position = None;
    }

    fn focus(&mut self, place: &Place) {
        self.view = MapView {
            center: place.coordinates(),
            zoom: self.config.detail_zoom,
        };
        self.selected = Some(place.id);
    }
}

impl Default for MapCoordinator {
    fn default() -> Self {
        Self::new(MapConfig::default())
    }
}
