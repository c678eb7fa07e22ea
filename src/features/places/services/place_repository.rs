use crate::features::places::models::{Place, PlaceId};

/// Places loaded for the current view, with the category list derived from
/// them. The category list is rebuilt on every mutation so it never lags the
/// place list.
#[derive(Debug, Clone, Default)]
pub struct PlaceRepository {
    places: Vec<Place>,
    categories: Vec<String>,
}

impl PlaceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_places(places: Vec<Place>) -> Self {
        let mut repository = Self::new();
        repository.replace(places);
        repository
    }

    pub fn replace(&mut self, places: Vec<Place>) {
        self.places = places;
        self.refresh_categories();
    }

    /// Append a newly created place
    pub fn push(&mut self, place: Place) {
        self.places.push(place);
        self.refresh_categories();
    }

    /// Swap in the server's copy of an edited place. Returns `false` when the
    /// place is not loaded.
    pub fn update(&mut self, place: Place) -> bool {
        let Some(slot) = self.places.iter_mut().find(|p| p.id == place.id) else {
            return false;
        };
        *slot = place;
        self.refresh_categories();
        true
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn get(&self, id: PlaceId) -> Option<&Place> {
        self.places.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    fn refresh_categories(&mut self) {
        let mut categories: Vec<String> = Vec::new();
        for place in &self.places {
            if !place.category.is_empty() && !categories.contains(&place.category) {
                categories.push(place.category.clone());
            }
        }
        self.categories = categories;
    }
}
