#![allow(dead_code)]

use std::{fmt, net::SocketAddr};

use anyhow::Context;
use axum::Router;
use chrono::NaiveDate;
use tempfile::TempDir;
use trailtrek::{
    config::AppConfig,
    db::{init_pool, run_migrations},
    models::{NewTrip, NewUser, Trip, User},
    routes::create_router,
    state::AppState,
};

/// Application state backed by a throwaway SQLite file.
pub struct TestApp {
    pub state: AppState,
    _root: TempDir,
}

impl fmt::Debug for TestApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestApp").finish()
    }
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        let root = TempDir::new().context("create temp dir for test database")?;
        let db_path = root.path().join("trailtrek.sqlite");
        let database_url = format!("sqlite://{}", db_path.to_string_lossy());

        let config = AppConfig {
            database_url,
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            max_connections: 4,
        };

        let db = init_pool(&config.database_url, config.max_connections).await?;
        run_migrations(&db).await?;

        let state = AppState::new(config, db);
        Ok(Self { state, _root: root })
    }

    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    pub async fn user(&self, username: &str) -> User {
        self.state
            .users
            .register_user(NewUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                ..Default::default()
            })
            .await
            .expect("register user")
    }

    pub async fn trip(&self, owner: &User, title: &str) -> Trip {
        self.state
            .trips
            .create_trip(&owner.id, new_trip(title))
            .await
            .expect("create trip")
    }
}

pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 1).expect("valid date")
}

pub fn new_trip(title: &str) -> NewTrip {
    NewTrip {
        title: Some(title.to_string()),
        start_date: Some(start_date()),
        ..Default::default()
    }
}
