use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::movie;

/// Body of `POST /api/movies`. A missing title is left for the save hook to reject.
#[derive(Debug, Default, Deserialize)]
pub struct NewMovie {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
}

/// Body of `PUT /api/movies/:id`. Keys outside this set are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct MovieUpdate {
    pub title: Option<String>,
    /// `Some(None)` clears the year, `None` leaves it alone.
    #[serde(default, deserialize_with = "nullable")]
    pub year: Option<Option<i32>>,
    pub genre: Option<String>,
    pub watched: Option<bool>,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: Option<i32>,
    pub genre: String,
    pub watched: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<movie::Model> for Movie {
    type Error = jiff::Error;

    fn try_from(m: movie::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            created_at: Timestamp::from_microsecond(m.created_at)?,
            updated_at: Timestamp::from_microsecond(m.updated_at)?,
            id: m.id,
            title: m.title,
            year: m.year,
            genre: m.genre,
            watched: m.watched,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: Timestamp,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_update_distinguishes_null_year_from_missing() {
        let cleared: MovieUpdate = serde_json::from_value(json!({ "year": null })).unwrap();
        assert_eq!(cleared.year, Some(None));

        let untouched: MovieUpdate = serde_json::from_value(json!({ "watched": true })).unwrap();
        assert_eq!(untouched.year, None);
        assert_eq!(untouched.watched, Some(true));
    }

    #[test]
    fn test_update_ignores_fields_outside_allow_list() {
        let update: MovieUpdate = serde_json::from_value(json!({
            "id": "abc",
            "createdAt": "2020-01-01T00:00:00Z",
            "rating": 5,
        }))
        .unwrap();
        assert_eq!(update.title, None);
        assert_eq!(update.year, None);
        assert_eq!(update.genre, None);
        assert_eq!(update.watched, None);
    }

    #[test]
    fn test_update_rejects_wrong_types() {
        assert!(serde_json::from_value::<MovieUpdate>(json!({ "watched": "yes" })).is_err());
        assert!(serde_json::from_value::<MovieUpdate>(json!({ "year": "1999" })).is_err());
    }

    #[test]
    fn test_movie_serializes_camel_case() {
        let model = movie::Model {
            id: "m1".to_string(),
            title: "Dune".to_string(),
            year: Some(2021),
            genre: String::new(),
            watched: false,
            created_at: 1_700_000_000_000_000,
            updated_at: 1_700_000_000_000_000,
        };
        let json = serde_json::to_value(Movie::try_from(model).unwrap()).unwrap();

        assert_eq!(json["title"], "Dune");
        assert_eq!(json["year"], 2021);
        assert_eq!(json["createdAt"], "2023-11-14T22:13:20Z");
        assert_eq!(json["createdAt"], json["updatedAt"]);
    }
}
