use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::{
    error::AppError,
    models::{Location, NewLocation, NewTripEntry, Page, TripEntry},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/trips/:trip_id/locations",
            get(list_locations).post(add_location),
        )
        .route("/trips/:trip_id/locations/last", get(last_location))
        .route(
            "/trips/:trip_id/entries",
            get(list_entries).post(add_entry),
        )
}

async fn add_location(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Json(sample): Json<NewLocation>,
) -> Result<(StatusCode, Json<Location>), AppError> {
    let location = state.tracking.add_location(&trip_id, sample).await?;
    Ok((StatusCode::CREATED, Json(location)))
}

async fn list_locations(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<Location>>, AppError> {
    Ok(Json(state.tracking.list_locations(&trip_id, page).await?))
}

async fn last_location(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Json<Location>, AppError> {
    Ok(Json(state.tracking.get_last_location(&trip_id).await?))
}

async fn add_entry(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Json(entry): Json<NewTripEntry>,
) -> Result<(StatusCode, Json<TripEntry>), AppError> {
    let entry = state.tracking.add_entry(&trip_id, entry).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn list_entries(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<TripEntry>>, AppError> {
    Ok(Json(state.tracking.list_entries(&trip_id, page).await?))
}
