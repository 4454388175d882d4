use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A journal item attached to a trip. Never updated after insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TripEntry {
    #[sqlx(rename = "entry_id")]
    pub id: String,
    pub trip_id: String,
    pub title: String,
    pub description: Option<String>,
    pub entry_type: Option<String>,
    pub location_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[sqlx(json)]
    pub image_urls: Vec<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewTripEntry {
    pub title: Option<String>,
    pub description: Option<String>,
    pub entry_type: Option<String>,
    pub location_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_urls: Option<Vec<String>>,
    pub note: Option<String>,
}

impl NewTripEntry {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}
