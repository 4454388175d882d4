use sqlx::{types::Json, SqliteConnection};

use crate::{
    error::AppError,
    models::{Page, TripEntry},
};

pub async fn insert_entry(conn: &mut SqliteConnection, entry: &TripEntry) -> Result<(), AppError> {
    sqlx::query(
        r#"INSERT INTO trip_entries (
               entry_id, trip_id, title, description, entry_type, location_name,
               latitude, longitude, image_urls, note, created_at
           ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&entry.id)
    .bind(&entry.trip_id)
    .bind(&entry.title)
    .bind(&entry.description)
    .bind(&entry.entry_type)
    .bind(&entry.location_name)
    .bind(entry.latitude)
    .bind(entry.longitude)
    .bind(Json(&entry.image_urls))
    .bind(&entry.note)
    .bind(entry.created_at)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn fetch_entry(
    conn: &mut SqliteConnection,
    entry_id: &str,
) -> Result<Option<TripEntry>, AppError> {
    let entry = sqlx::query_as::<_, TripEntry>("SELECT * FROM trip_entries WHERE entry_id = ?")
        .bind(entry_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(entry)
}

/// Entries in insertion order.
pub async fn list_entries(
    conn: &mut SqliteConnection,
    trip_id: &str,
    page: Page,
) -> Result<Vec<TripEntry>, AppError> {
    let entries = sqlx::query_as::<_, TripEntry>(
        "SELECT * FROM trip_entries WHERE trip_id = ? ORDER BY rowid LIMIT ? OFFSET ?",
    )
    .bind(trip_id)
    .bind(page.limit)
    .bind(page.skip)
    .fetch_all(&mut *conn)
    .await?;
    Ok(entries)
}
