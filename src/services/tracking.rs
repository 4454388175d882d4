use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    db::{self, DbPool},
    error::AppError,
    models::{Location, NewLocation, NewTripEntry, Page, TripEntry},
};

use super::{check_range, normalize_optional, require_text};

/// Append-only location and journal streams under a trip.
///
/// Every operation fails with `NotFound("trip")` when the parent trip is
/// missing, before looking at the children.
#[derive(Clone)]
pub struct TrackingService {
    db: DbPool,
}

impl TrackingService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn add_location(&self, trip_id: &str, sample: NewLocation) -> Result<Location, AppError> {
        let latitude = sample
            .latitude
            .ok_or_else(|| AppError::validation("latitude is required"))?;
        let longitude = sample
            .longitude
            .ok_or_else(|| AppError::validation("longitude is required"))?;
        check_range(latitude, -90.0, 90.0, "latitude")?;
        check_range(longitude, -180.0, 180.0, "longitude")?;

        let location = Location {
            id: Uuid::new_v4().to_string(),
            trip_id: trip_id.to_string(),
            latitude,
            longitude,
            altitude: sample.altitude,
            accuracy: sample.accuracy,
            speed: sample.speed,
            heading: sample.heading,
            timestamp: Utc::now(),
        };

        let mut tx = self.db.begin().await?;
        if !db::trips::trip_exists(&mut tx, trip_id).await? {
            return Err(AppError::NotFound("trip"));
        }
        db::locations::insert_location(&mut tx, &location).await?;
        tx.commit().await?;

        debug!(trip_id, location_id = %location.id, "location recorded");
        Ok(location)
    }

    pub async fn list_locations(&self, trip_id: &str, page: Page) -> Result<Vec<Location>, AppError> {
        page.validate()?;
        let mut conn = self.db.acquire().await?;
        if !db::trips::trip_exists(&mut conn, trip_id).await? {
            return Err(AppError::NotFound("trip"));
        }
        db::locations::list_locations(&mut conn, trip_id, page).await
    }

    pub async fn get_last_location(&self, trip_id: &str) -> Result<Location, AppError> {
        let mut conn = self.db.acquire().await?;
        if !db::trips::trip_exists(&mut conn, trip_id).await? {
            return Err(AppError::NotFound("trip"));
        }
        db::locations::last_location(&mut conn, trip_id)
            .await?
            .ok_or(AppError::NotFound("location"))
    }

    pub async fn add_entry(&self, trip_id: &str, new: NewTripEntry) -> Result<TripEntry, AppError> {
        let title = require_text(new.title, "title")?;
        if let Some(latitude) = new.latitude {
            check_range(latitude, -90.0, 90.0, "latitude")?;
        }
        if let Some(longitude) = new.longitude {
            check_range(longitude, -180.0, 180.0, "longitude")?;
        }

        let entry = TripEntry {
            id: Uuid::new_v4().to_string(),
            trip_id: trip_id.to_string(),
            title,
            description: new.description,
            entry_type: normalize_optional(new.entry_type),
            location_name: normalize_optional(new.location_name),
            latitude: new.latitude,
            longitude: new.longitude,
            image_urls: new.image_urls.unwrap_or_default(),
            note: new.note,
            created_at: Utc::now(),
        };

        let mut tx = self.db.begin().await?;
        if !db::trips::trip_exists(&mut tx, trip_id).await? {
            return Err(AppError::NotFound("trip"));
        }
        db::entries::insert_entry(&mut tx, &entry).await?;
        tx.commit().await?;

        info!(trip_id, entry_id = %entry.id, "trip entry added");
        Ok(entry)
    }

    pub async fn list_entries(&self, trip_id: &str, page: Page) -> Result<Vec<TripEntry>, AppError> {
        page.validate()?;
        let mut conn = self.db.acquire().await?;
        if !db::trips::trip_exists(&mut conn, trip_id).await? {
            return Err(AppError::NotFound("trip"));
        }
        db::entries::list_entries(&mut conn, trip_id, page).await
    }
}
