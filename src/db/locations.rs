use sqlx::SqliteConnection;

use crate::{
    error::AppError,
    models::{Location, Page},
};

pub async fn insert_location(
    conn: &mut SqliteConnection,
    location: &Location,
) -> Result<(), AppError> {
    sqlx::query(
        r#"INSERT INTO locations (location_id, trip_id, latitude, longitude, altitude, accuracy, speed, heading, timestamp)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&location.id)
    .bind(&location.trip_id)
    .bind(location.latitude)
    .bind(location.longitude)
    .bind(location.altitude)
    .bind(location.accuracy)
    .bind(location.speed)
    .bind(location.heading)
    .bind(location.timestamp)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn fetch_location(
    conn: &mut SqliteConnection,
    location_id: &str,
) -> Result<Option<Location>, AppError> {
    let location = sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE location_id = ?")
        .bind(location_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(location)
}

/// Samples in insertion order.
pub async fn list_locations(
    conn: &mut SqliteConnection,
    trip_id: &str,
    page: Page,
) -> Result<Vec<Location>, AppError> {
    let locations = sqlx::query_as::<_, Location>(
        "SELECT * FROM locations WHERE trip_id = ? ORDER BY rowid LIMIT ? OFFSET ?",
    )
    .bind(trip_id)
    .bind(page.limit)
    .bind(page.skip)
    .fetch_all(&mut *conn)
    .await?;
    Ok(locations)
}

/// Sample with the greatest timestamp; the later insert wins a tie.
///
/// `julianday` stops at milliseconds, so the RFC 3339 text breaks ties below that.
pub async fn last_location(
    conn: &mut SqliteConnection,
    trip_id: &str,
) -> Result<Option<Location>, AppError> {
    let location = sqlx::query_as::<_, Location>(
        r#"SELECT * FROM locations WHERE trip_id = ?
           ORDER BY julianday(timestamp) DESC, timestamp DESC, rowid DESC
           LIMIT 1"#,
    )
    .bind(trip_id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(location)
}
