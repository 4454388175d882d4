use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::{self, DbPool},
    error::AppError,
    models::{NewUser, User},
};

use super::{normalize_optional, require_text};

/// Just enough user management for trips to have an owner.
#[derive(Clone)]
pub struct UserService {
    db: DbPool,
}

impl UserService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn register_user(&self, new: NewUser) -> Result<User, AppError> {
        let username = require_text(Some(new.username), "username")?;
        let email = require_text(Some(new.email), "email")?;
        if !email.contains('@') {
            return Err(AppError::validation("email is not valid"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            username,
            email,
            first_name: normalize_optional(new.first_name),
            last_name: normalize_optional(new.last_name),
            profile_picture_url: normalize_optional(new.profile_picture_url),
            bio: new.bio,
            created_at: now,
            updated_at: now,
        };

        let mut conn = self.db.acquire().await?;
        db::users::insert_user(&mut conn, &user).await?;
        info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, AppError> {
        let mut conn = self.db.acquire().await?;
        db::users::fetch_user(&mut conn, user_id)
            .await?
            .ok_or(AppError::NotFound("user"))
    }
}
