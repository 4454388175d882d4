use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    models::{NewTrip, Page, Trip, TripPatch, TripStats, TripStatus},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trips", get(list_trips).post(create_trip))
        .route("/trips/active", get(active_trip))
        .route(
            "/trips/:trip_id",
            get(get_trip).put(update_trip).delete(delete_trip),
        )
        .route("/trips/:trip_id/end", put(end_trip))
        .route("/trips/:trip_id/stats", put(update_stats))
}

#[derive(Deserialize)]
struct CreateTripBody {
    user_id: String,
    #[serde(flatten)]
    trip: NewTrip,
}

async fn create_trip(
    State(state): State<AppState>,
    Json(body): Json<CreateTripBody>,
) -> Result<(StatusCode, Json<Trip>), AppError> {
    let trip = state.trips.create_trip(&body.user_id, body.trip).await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

async fn list_trips(
    State(state): State<AppState>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<Trip>>, AppError> {
    Ok(Json(state.trips.list_all_trips(page).await?))
}

#[derive(Deserialize)]
struct ActiveTripQuery {
    user_id: String,
}

async fn active_trip(
    State(state): State<AppState>,
    Query(query): Query<ActiveTripQuery>,
) -> Result<Json<Trip>, AppError> {
    Ok(Json(state.trips.get_active_trip(&query.user_id).await?))
}

async fn get_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Json<Trip>, AppError> {
    Ok(Json(state.trips.get_trip(&trip_id).await?))
}

async fn update_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Json(patch): Json<TripPatch>,
) -> Result<Json<Trip>, AppError> {
    Ok(Json(state.trips.update_trip(&trip_id, patch).await?))
}

async fn delete_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Json<Trip>, AppError> {
    Ok(Json(state.trips.delete_trip(&trip_id).await?))
}

#[derive(Serialize)]
struct EndTripResponse {
    message: &'static str,
    #[serde(rename = "tripId")]
    trip_id: String,
    ended_at: Option<NaiveDate>,
    status: TripStatus,
    delay: i64,
}

async fn end_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Json<EndTripResponse>, AppError> {
    let trip = state.trips.end_trip(&trip_id).await?;
    Ok(Json(EndTripResponse {
        message: "Trip ended successfully",
        trip_id: trip.id,
        ended_at: trip.end_date,
        status: trip.status,
        delay: trip.delay,
    }))
}

#[derive(Serialize)]
struct StatsResponse {
    message: &'static str,
    #[serde(rename = "tripId")]
    trip_id: String,
    total_distance: f64,
    duration: i64,
}

async fn update_stats(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Json(stats): Json<TripStats>,
) -> Result<Json<StatsResponse>, AppError> {
    let trip = state.trips.update_trip_stats(&trip_id, stats).await?;
    Ok(Json(StatsResponse {
        message: "Trip stats updated",
        trip_id: trip.id,
        total_distance: trip.total_distance,
        duration: trip.duration,
    }))
}
