use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::{
    error::AppError,
    models::{Page, Trip, TripPatch, TripStats, TripStatus},
};

pub async fn insert_trip(conn: &mut SqliteConnection, trip: &Trip) -> Result<(), AppError> {
    sqlx::query(
        r#"INSERT INTO trips (
               trip_id, user_id, title, description, start_date, end_date, privacy,
               cover_image_url, is_active, total_distance, duration, status, delay,
               created_at, published_at
           ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&trip.id)
    .bind(&trip.user_id)
    .bind(&trip.title)
    .bind(&trip.description)
    .bind(trip.start_date)
    .bind(trip.end_date)
    .bind(trip.privacy)
    .bind(&trip.cover_image_url)
    .bind(trip.is_active)
    .bind(trip.total_distance)
    .bind(trip.duration)
    .bind(trip.status)
    .bind(trip.delay)
    .bind(trip.created_at)
    .bind(trip.published_at)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn fetch_trip(
    conn: &mut SqliteConnection,
    trip_id: &str,
) -> Result<Option<Trip>, AppError> {
    let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE trip_id = ?")
        .bind(trip_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(trip)
}

pub async fn trip_exists(conn: &mut SqliteConnection, trip_id: &str) -> Result<bool, AppError> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM trips WHERE trip_id = ?")
        .bind(trip_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(found.is_some())
}

pub async fn list_trips_by_user(
    conn: &mut SqliteConnection,
    user_id: &str,
    page: Page,
) -> Result<Vec<Trip>, AppError> {
    let trips = sqlx::query_as::<_, Trip>(
        "SELECT * FROM trips WHERE user_id = ? ORDER BY rowid LIMIT ? OFFSET ?",
    )
    .bind(user_id)
    .bind(page.limit)
    .bind(page.skip)
    .fetch_all(&mut *conn)
    .await?;
    Ok(trips)
}

pub async fn list_all_trips(conn: &mut SqliteConnection, page: Page) -> Result<Vec<Trip>, AppError> {
    let trips = sqlx::query_as::<_, Trip>("SELECT * FROM trips ORDER BY rowid LIMIT ? OFFSET ?")
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(&mut *conn)
        .await?;
    Ok(trips)
}

/// Writes only the columns present in `patch` and returns the updated row.
///
/// An empty patch is a plain fetch.
pub async fn update_trip(
    conn: &mut SqliteConnection,
    trip_id: &str,
    patch: &TripPatch,
) -> Result<Option<Trip>, AppError> {
    if patch.is_empty() {
        return fetch_trip(conn, trip_id).await;
    }

    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE trips SET ");
    {
        let mut set = builder.separated(", ");
        if let Some(title) = &patch.title {
            set.push("title = ").push_bind_unseparated(title.clone());
        }
        if let Some(description) = &patch.description {
            set.push("description = ")
                .push_bind_unseparated(description.clone());
        }
        if let Some(start_date) = patch.start_date {
            set.push("start_date = ").push_bind_unseparated(start_date);
        }
        if let Some(end_date) = patch.end_date {
            set.push("end_date = ").push_bind_unseparated(end_date);
        }
        if let Some(privacy) = patch.privacy {
            set.push("privacy = ").push_bind_unseparated(privacy);
        }
        if let Some(cover) = &patch.cover_image_url {
            set.push("cover_image_url = ")
                .push_bind_unseparated(cover.clone());
        }
        if let Some(published_at) = patch.published_at {
            set.push("published_at = ")
                .push_bind_unseparated(published_at);
        }
    }
    builder
        .push(" WHERE trip_id = ")
        .push_bind(trip_id.to_string())
        .push(" RETURNING *");

    let trip = builder
        .build_query_as::<Trip>()
        .fetch_optional(&mut *conn)
        .await?;
    Ok(trip)
}

pub async fn mark_completed(
    conn: &mut SqliteConnection,
    trip_id: &str,
    end_date: NaiveDate,
) -> Result<Option<Trip>, AppError> {
    let trip = sqlx::query_as::<_, Trip>(
        r#"UPDATE trips SET is_active = 0, status = ?, end_date = ?
           WHERE trip_id = ? RETURNING *"#,
    )
    .bind(TripStatus::Completed)
    .bind(end_date)
    .bind(trip_id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(trip)
}

pub async fn update_stats(
    conn: &mut SqliteConnection,
    trip_id: &str,
    stats: &TripStats,
) -> Result<Option<Trip>, AppError> {
    if stats.is_empty() {
        return fetch_trip(conn, trip_id).await;
    }

    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE trips SET ");
    {
        let mut set = builder.separated(", ");
        if let Some(distance) = stats.total_distance {
            set.push("total_distance = ").push_bind_unseparated(distance);
        }
        if let Some(duration) = stats.duration {
            set.push("duration = ").push_bind_unseparated(duration);
        }
    }
    builder
        .push(" WHERE trip_id = ")
        .push_bind(trip_id.to_string())
        .push(" RETURNING *");

    let trip = builder
        .build_query_as::<Trip>()
        .fetch_optional(&mut *conn)
        .await?;
    Ok(trip)
}

/// Newest trip of `user_id` that is both flagged active and in `active` status.
pub async fn latest_active_trip(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Option<Trip>, AppError> {
    let trip = sqlx::query_as::<_, Trip>(
        r#"SELECT * FROM trips
           WHERE user_id = ? AND is_active = 1 AND status = ?
           ORDER BY julianday(created_at) DESC, created_at DESC, rowid DESC
           LIMIT 1"#,
    )
    .bind(user_id)
    .bind(TripStatus::Active)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(trip)
}

/// Removes the trip and returns the row as it was. Locations and entries go
/// with it through the foreign key cascade.
pub async fn delete_trip(
    conn: &mut SqliteConnection,
    trip_id: &str,
) -> Result<Option<Trip>, AppError> {
    let trip = sqlx::query_as::<_, Trip>("DELETE FROM trips WHERE trip_id = ? RETURNING *")
        .bind(trip_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(trip)
}
