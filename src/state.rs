use crate::{
    config::AppConfig,
    db::DbPool,
    services::{TrackingService, TripService, UserService},
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DbPool,
    pub users: UserService,
    pub trips: TripService,
    pub tracking: TrackingService,
}

impl AppState {
    pub fn new(config: AppConfig, db: DbPool) -> Self {
        Self {
            users: UserService::new(db.clone()),
            trips: TripService::new(db.clone()),
            tracking: TrackingService::new(db.clone()),
            config,
            db,
        }
    }
}
