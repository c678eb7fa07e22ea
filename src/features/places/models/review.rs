use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::place::{deserialize_timestamp, PlaceId};

/// A user's rating of a place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<NaiveDateTime>,
    pub user_id: i64,
    pub username: String,
    pub place_id: PlaceId,
}
