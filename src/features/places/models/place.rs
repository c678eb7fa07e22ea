use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::shared::types::Coordinates;

/// Server-assigned place identifier
pub type PlaceId = i64;

/// A point of interest as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    /// `None` when the backend sent no list, or something that is not a list
    #[serde(default, deserialize_with = "deserialize_specialties")]
    pub specialties: Option<Vec<String>>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub creator_id: Option<i64>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub review_count: i64,
}

impl Place {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Accept only a JSON array of strings; anything else means "no specialties".
fn deserialize_specialties<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

/// Backend timestamps are naive UTC (`2024-05-01T12:30:00.123456`), but
/// RFC 3339 values with an offset are accepted too. Unparseable values become
/// `None` instead of failing the whole record.
pub(crate) fn deserialize_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc).naive_utc())
            .ok()
            .or_else(|| s.parse::<NaiveDateTime>().ok())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> Value {
        json!({
            "id": 7,
            "name": "Pujol",
            "description": "Alta cocina mexicana",
            "category": "Alta Cocina",
            "latitude": 19.43,
            "longitude": -99.19
        })
    }

    #[test]
    fn test_minimal_place_decodes_with_defaults() {
        let place: Place = serde_json::from_value(base()).unwrap();
        assert_eq!(place.id, 7);
        assert_eq!(place.review_count, 0);
        assert!(place.specialties.is_none());
        assert_eq!(place.coordinates(), Coordinates::new(19.43, -99.19));
    }

    #[test]
    fn test_specialties_must_be_a_list() {
        let mut value = base();
        value["specialties"] = json!("Tacos");
        let place: Place = serde_json::from_value(value.clone()).unwrap();
        assert!(place.specialties.is_none());

        value["specialties"] = json!(["Mole", 3, "Tacos"]);
        let place: Place = serde_json::from_value(value).unwrap();
        assert_eq!(
            place.specialties,
            Some(vec!["Mole".to_string(), "Tacos".to_string()])
        );
    }

    #[test]
    fn test_missing_coordinates_fail_to_decode() {
        let mut value = base();
        value.as_object_mut().unwrap().remove("latitude");
        assert!(serde_json::from_value::<Place>(value).is_err());
    }

    #[test]
    fn test_timestamps_naive_and_rfc3339() {
        let mut value = base();
        value["created_at"] = json!("2024-05-01T12:30:00.123456");
        let naive: Place = serde_json::from_value(value.clone()).unwrap();
        assert!(naive.created_at.is_some());

        value["created_at"] = json!("2024-05-01T14:30:00+02:00");
        let offset: Place = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(
            offset.created_at.unwrap().to_string(),
            "2024-05-01 12:30:00"
        );

        value["created_at"] = json!("yesterday");
        let garbage: Place = serde_json::from_value(value).unwrap();
        assert!(garbage.created_at.is_none());
    }
}
