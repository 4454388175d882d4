use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle state of a trip.
///
/// Older clients spelled the finished state `inactive`; it is accepted on input
/// and always written back as `completed`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TripStatus {
    #[default]
    Active,
    #[serde(alias = "inactive")]
    Completed,
    Draft,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Active => "active",
            TripStatus::Completed => "completed",
            TripStatus::Draft => "draft",
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Privacy {
    Public,
    #[default]
    Private,
    Friends,
}

impl Privacy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Privacy::Public => "public",
            Privacy::Private => "private",
            Privacy::Friends => "friends",
        }
    }
}

impl fmt::Display for Privacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Trip {
    #[sqlx(rename = "trip_id")]
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub privacy: Privacy,
    pub cover_image_url: Option<String>,
    pub is_active: bool,
    pub total_distance: f64,
    /// Seconds.
    pub duration: i64,
    pub status: TripStatus,
    pub delay: i64,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Trip {
    /// A trip counts as "in progress" only while both flags agree.
    pub fn is_in_progress(&self) -> bool {
        self.is_active && self.status == TripStatus::Active
    }
}

/// Fields accepted when creating a trip. Everything except `title` and
/// `start_date` falls back to a default when omitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewTrip {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub privacy: Option<Privacy>,
    pub cover_image_url: Option<String>,
    pub is_active: Option<bool>,
    pub total_distance: Option<f64>,
    pub duration: Option<i64>,
    pub status: Option<TripStatus>,
    pub delay: Option<i64>,
}

/// Partial update of a trip's descriptive fields.
///
/// The outer `Option` records presence: `None` leaves the column alone. For
/// nullable columns the inner `Option` carries the new value, so
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TripPatch {
    pub title: Option<String>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    pub start_date: Option<NaiveDate>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub end_date: Option<Option<NaiveDate>>,
    pub privacy: Option<Privacy>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub cover_image_url: Option<Option<String>>,
    #[serde(with = "::serde_with::rust::double_option")]
    pub published_at: Option<Option<DateTime<Utc>>>,
}

impl TripPatch {
    pub fn is_empty(&self) -> bool {
        self == &TripPatch::default()
    }

    /// Copies every present field onto `trip`; absent fields are left as they are.
    pub fn apply_to(&self, trip: &mut Trip) {
        if let Some(title) = &self.title {
            trip.title = title.clone();
        }
        if let Some(description) = &self.description {
            trip.description = description.clone();
        }
        if let Some(start_date) = self.start_date {
            trip.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            trip.end_date = end_date;
        }
        if let Some(privacy) = self.privacy {
            trip.privacy = privacy;
        }
        if let Some(cover) = &self.cover_image_url {
            trip.cover_image_url = cover.clone();
        }
        if let Some(published_at) = self.published_at {
            trip.published_at = published_at;
        }
    }
}

/// Caller-measured statistics; only present values are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TripStats {
    pub total_distance: Option<f64>,
    pub duration: Option<i64>,
}

impl TripStats {
    pub fn is_empty(&self) -> bool {
        self.total_distance.is_none() && self.duration.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trip() -> Trip {
        Trip {
            id: "trip-1".into(),
            user_id: "user-1".into(),
            title: "Alps".into(),
            description: Some("hiking".into()),
            start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            end_date: None,
            privacy: Privacy::Private,
            cover_image_url: Some("cover.jpg".into()),
            is_active: true,
            total_distance: 12.5,
            duration: 3600,
            status: TripStatus::Active,
            delay: 0,
            created_at: Utc::now(),
            published_at: None,
        }
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let original = sample_trip();
        let mut trip = original.clone();
        let patch = TripPatch {
            title: Some("Alps 2024".into()),
            ..Default::default()
        };
        patch.apply_to(&mut trip);

        assert_eq!(trip.title, "Alps 2024");
        assert_eq!(trip.description, original.description);
        assert_eq!(trip.cover_image_url, original.cover_image_url);
        assert_eq!(trip.start_date, original.start_date);
    }

    #[test]
    fn explicit_null_clears_nullable_field() {
        let mut trip = sample_trip();
        let patch: TripPatch =
            serde_json::from_str(r#"{"description": null}"#).expect("patch json");
        assert_eq!(patch.description, Some(None));
        assert!(patch.title.is_none());

        patch.apply_to(&mut trip);
        assert_eq!(trip.description, None);
        assert_eq!(trip.cover_image_url.as_deref(), Some("cover.jpg"));
    }

    #[test]
    fn absent_fields_deserialize_as_absent() {
        let patch: TripPatch = serde_json::from_str("{}").expect("patch json");
        assert!(patch.is_empty());
    }

    #[test]
    fn legacy_inactive_status_reads_as_completed() {
        let status: TripStatus = serde_json::from_str(r#""inactive""#).expect("status");
        assert_eq!(status, TripStatus::Completed);
        assert_eq!(
            serde_json::to_string(&status).expect("serialize"),
            r#""completed""#
        );
    }

    #[test]
    fn in_progress_requires_both_flags() {
        let mut trip = sample_trip();
        assert!(trip.is_in_progress());
        trip.status = TripStatus::Draft;
        assert!(!trip.is_in_progress());
        trip.status = TripStatus::Active;
        trip.is_active = false;
        assert!(!trip.is_in_progress());
    }
}
