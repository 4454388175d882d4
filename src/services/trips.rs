use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    db::{self, DbPool},
    error::AppError,
    models::{NewTrip, Page, Trip, TripPatch, TripStats},
};

use super::{check_non_negative, normalize_optional, require_text};

/// Owns trip creation, partial updates and the active → completed transition.
///
/// Each operation checks out its own pooled connection; it goes back to the
/// pool when the operation returns, on success or error.
#[derive(Clone)]
pub struct TripService {
    db: DbPool,
}

impl TripService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn create_trip(&self, owner_id: &str, new: NewTrip) -> Result<Trip, AppError> {
        let title = require_text(new.title, "title")?;
        let start_date = new
            .start_date
            .ok_or_else(|| AppError::validation("start_date is required"))?;
        let total_distance = new.total_distance.unwrap_or(0.0);
        check_non_negative(total_distance, "total_distance")?;
        let duration = new.duration.unwrap_or(0);
        if duration < 0 {
            return Err(AppError::validation("duration must be >= 0"));
        }
        let delay = new.delay.unwrap_or(0);
        if delay < 0 {
            return Err(AppError::validation("delay must be >= 0"));
        }

        let trip = Trip {
            id: Uuid::new_v4().to_string(),
            user_id: owner_id.to_string(),
            title,
            description: new.description,
            start_date,
            end_date: new.end_date,
            privacy: new.privacy.unwrap_or_default(),
            cover_image_url: normalize_optional(new.cover_image_url),
            is_active: new.is_active.unwrap_or(true),
            total_distance,
            duration,
            status: new.status.unwrap_or_default(),
            delay,
            created_at: Utc::now(),
            published_at: None,
        };

        let mut tx = self.db.begin().await?;
        if !db::users::user_exists(&mut tx, owner_id).await? {
            return Err(AppError::NotFound("user"));
        }
        db::trips::insert_trip(&mut tx, &trip).await?;
        tx.commit().await?;

        info!(trip_id = %trip.id, user_id = %trip.user_id, status = %trip.status, "trip created");
        Ok(trip)
    }

    pub async fn get_trip(&self, trip_id: &str) -> Result<Trip, AppError> {
        let mut conn = self.db.acquire().await?;
        db::trips::fetch_trip(&mut conn, trip_id)
            .await?
            .ok_or(AppError::NotFound("trip"))
    }

    pub async fn list_trips_by_user(&self, user_id: &str, page: Page) -> Result<Vec<Trip>, AppError> {
        page.validate()?;
        let mut conn = self.db.acquire().await?;
        let trips = db::trips::list_trips_by_user(&mut conn, user_id, page).await?;
        debug!(user_id, count = trips.len(), "listed trips for user");
        Ok(trips)
    }

    pub async fn list_all_trips(&self, page: Page) -> Result<Vec<Trip>, AppError> {
        page.validate()?;
        let mut conn = self.db.acquire().await?;
        db::trips::list_all_trips(&mut conn, page).await
    }

    /// Applies the descriptive fields present in `patch`. Lifecycle flags are
    /// not reachable from here; see [`TripService::end_trip`].
    pub async fn update_trip(&self, trip_id: &str, mut patch: TripPatch) -> Result<Trip, AppError> {
        if let Some(title) = patch.title.take() {
            patch.title = Some(require_text(Some(title), "title")?);
        }

        let mut conn = self.db.acquire().await?;
        let trip = db::trips::update_trip(&mut conn, trip_id, &patch)
            .await?
            .ok_or(AppError::NotFound("trip"))?;
        info!(trip_id, "trip updated");
        Ok(trip)
    }

    /// Marks the trip completed and stamps today's date as its end. Calling it
    /// again re-stamps the date.
    pub async fn end_trip(&self, trip_id: &str) -> Result<Trip, AppError> {
        let end_date = Utc::now().date_naive();
        let mut conn = self.db.acquire().await?;
        let trip = db::trips::mark_completed(&mut conn, trip_id, end_date)
            .await?
            .ok_or(AppError::NotFound("trip"))?;
        info!(trip_id, %end_date, "trip ended");
        Ok(trip)
    }

    pub async fn update_trip_stats(&self, trip_id: &str, stats: TripStats) -> Result<Trip, AppError> {
        if let Some(distance) = stats.total_distance {
            check_non_negative(distance, "total_distance")?;
        }
        if matches!(stats.duration, Some(duration) if duration < 0) {
            return Err(AppError::validation("duration must be >= 0"));
        }

        let mut conn = self.db.acquire().await?;
        let trip = db::trips::update_stats(&mut conn, trip_id, &stats)
            .await?
            .ok_or(AppError::NotFound("trip"))?;
        debug!(
            trip_id,
            total_distance = trip.total_distance,
            duration = trip.duration,
            "trip stats updated"
        );
        Ok(trip)
    }

    /// The user's newest in-progress trip.
    ///
    /// Several trips may be in progress at once; creation never closes older
    /// ones. This only picks the most recently created of them.
    pub async fn get_active_trip(&self, user_id: &str) -> Result<Trip, AppError> {
        let mut conn = self.db.acquire().await?;
        db::trips::latest_active_trip(&mut conn, user_id)
            .await?
            .ok_or(AppError::NotFound("trip"))
    }

    /// Deletes the trip along with its locations and entries, returning the
    /// trip as it was.
    pub async fn delete_trip(&self, trip_id: &str) -> Result<Trip, AppError> {
        let mut conn = self.db.acquire().await?;
        let trip = db::trips::delete_trip(&mut conn, trip_id)
            .await?
            .ok_or(AppError::NotFound("trip"))?;
        info!(trip_id, "trip deleted");
        Ok(trip)
    }
}
