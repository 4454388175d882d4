use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::{
    error::AppError,
    models::{NewUser, Page, Trip, User},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(register_user))
        .route("/users/:user_id", get(get_user))
        .route("/users/:user_id/trips", get(user_trips))
}

async fn register_user(
    State(state): State<AppState>,
    Json(body): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state.users.register_user(body).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.users.get_user(&user_id).await?))
}

async fn user_trips(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<Trip>>, AppError> {
    Ok(Json(state.trips.list_trips_by_user(&user_id, page).await?))
}
