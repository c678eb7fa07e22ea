//! Client-side place search
//!
//! A place matches a term when its name, category or description contains
//! the term (case-insensitive), or when any specialty contains the term or is
//! contained in it. The second direction lets a long query such as
//! "tacos al pastor" hit a short specialty such as "taco".

use std::borrow::Cow;

use crate::features::places::models::Place;

/// Result of running a term against a place list
#[derive(Debug, Clone)]
pub struct SearchOutcome<'a> {
    /// Matching places in source order; the source itself for an empty term
    pub filtered: Cow<'a, [Place]>,
    /// Place whose name equals the term, searched over the full list
    pub exact_match: Option<&'a Place>,
}

/// Filter `places` by `term`.
///
/// An empty term returns the input slice borrowed, not a copy.
pub fn filter_places<'a>(places: &'a [Place], term: &str) -> Cow<'a, [Place]> {
    if term.is_empty() {
        return Cow::Borrowed(places);
    }

    let needle = term.to_lowercase();
    Cow::Owned(
        places
            .iter()
            .filter(|place| matches_term(place, &needle))
            .cloned()
            .collect(),
    )
}

/// `needle` must already be lower-cased
pub fn matches_term(place: &Place, needle: &str) -> bool {
    let name_match = place.name.to_lowercase().contains(needle);
    let category_match = place.category.to_lowercase().contains(needle);
    let description_match = place.description.to_lowercase().contains(needle);

    let specialty_match = place.specialties.as_ref().is_some_and(|specialties| {
        specialties.iter().any(|specialty| {
            let specialty = specialty.to_lowercase();
            specialty.contains(needle) || needle.contains(specialty.as_str())
        })
    });

    name_match || category_match || specialty_match || description_match
}

/// First place whose name equals `term` ignoring case.
///
/// Always runs over the whole list, independent of any filtering.
pub fn find_exact_match<'a>(places: &'a [Place], term: &str) -> Option<&'a Place> {
    if term.is_empty() {
        return None;
    }

    let needle = term.to_lowercase();
    places
        .iter()
        .find(|place| place.name.to_lowercase() == needle)
}

pub fn search<'a>(places: &'a [Place], term: &str) -> SearchOutcome<'a> {
    SearchOutcome {
        filtered: filter_places(places, term),
        exact_match: find_exact_match(places, term),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{sample_place, with_specialties};
    use fake::faker::company::en::CompanyName;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;

    fn corpus() -> Vec<Place> {
        vec![
            with_specialties(
                sample_place(1, "Pujol", "Alta Cocina", 19.43, -99.19),
                &["Mole Madre"],
            ),
            with_specialties(
                sample_place(2, "El Vilsito", "Mexicana", 19.39, -99.15),
                &["Tacos al Pastor"],
            ),
            with_specialties(
                sample_place(3, "Taquería Orinoco", "Casual", 19.42, -99.16),
                &["Taco"],
            ),
            sample_place(4, "Contramar", "Mariscos", 19.41, -99.16),
            sample_place(5, "Pujol Bar", "Bar", 19.43, -99.19),
        ]
    }

    fn ids(places: &[Place]) -> Vec<i64> {
        places.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_empty_term_returns_same_slice() {
        let places = corpus();
        let result = filter_places(&places, "");

        assert!(matches!(result, Cow::Borrowed(_)));
        assert!(std::ptr::eq(result.as_ref(), places.as_slice()));
    }

    #[test]
    fn test_matches_name_category_description_case_insensitively() {
        let places = corpus();

        assert_eq!(ids(&filter_places(&places, "CONTRA")), vec![4]);
        assert_eq!(ids(&filter_places(&places, "mariscos")), vec![4]);
        // description is "<name> is a well known place"
        assert_eq!(ids(&filter_places(&places, "Vilsito IS A")), vec![2]);
    }

    #[test]
    fn test_specialty_matching_goes_both_ways() {
        let places = corpus();

        // specialty contains term
        let result = filter_places(&places, "Tacos");
        assert!(ids(&result).contains(&2));

        // term contains specialty
        let result = filter_places(&places, "Tacos al Pastor");
        assert_eq!(ids(&result), vec![2, 3]);
    }

    #[test]
    fn test_places_without_specialties_skip_specialty_check() {
        let places = vec![sample_place(1, "Contramar", "Mariscos", 19.41, -99.16)];
        assert!(filter_places(&places, "tostadas de atún").is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let places = corpus();
        assert_eq!(ids(&filter_places(&places, "o")), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_exact_match_uses_full_list() {
        let places = corpus();

        // "pujol" filters to two places but exactly names one
        let outcome = search(&places, "pujol");
        assert_eq!(ids(&outcome.filtered), vec![1, 5]);
        assert_eq!(outcome.exact_match.map(|p| p.id), Some(1));

        // the exact match is found even when nothing else narrows to it
        let outcome = search(&places, "CONTRAMAR");
        assert_eq!(outcome.exact_match.map(|p| p.id), Some(4));

        assert!(find_exact_match(&places, "pujo").is_none());
        assert!(find_exact_match(&places, "").is_none());
    }

    #[test]
    fn test_pujol_end_to_end() {
        let places = vec![sample_place(1, "Pujol", "Alta Cocina", 19.43, -99.19)];
        let outcome = search(&places, "pujol");

        assert_eq!(outcome.filtered.len(), 1);
        let exact = outcome.exact_match.unwrap();
        assert_eq!((exact.latitude, exact.longitude), (19.43, -99.19));
    }

    #[test]
    fn test_any_substring_of_a_field_is_retained() {
        let places: Vec<Place> = (0..40)
            .map(|i| {
                let mut place = sample_place(i, &CompanyName().fake::<String>(), "General", 0.0, 0.0);
                place.description = Sentence(3..8).fake();
                place
            })
            .collect();

        for place in &places {
            let name_part: String = place.name.chars().skip(1).take(4).collect();
            let description_part: String = place.description.chars().skip(2).take(6).collect();

            for term in [name_part, description_part] {
                let result = filter_places(&places, &term.to_uppercase());
                assert!(
                    result.iter().any(|p| p.id == place.id),
                    "{:?} not found for term {:?}",
                    place.name,
                    term
                );
            }
        }
    }
}
