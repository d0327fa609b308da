//! Profile editor
//!
//! Loads and edits the logged-in user's profile.

use std::sync::Arc;

use crate::domain::entities::{Avatar, ProfileUpdate, PublicUser, UserId, UserProfile};
use crate::domain::ports::UserApi;
use crate::error::AppError;

pub struct ProfileService<U>
where
    U: UserApi,
{
    users: Arc<U>,
    api_base_url: String,
}

impl<U> ProfileService<U>
where
    U: UserApi,
{
    pub fn new(users: Arc<U>, api_base_url: impl Into<String>) -> Self {
        Self {
            users,
            api_base_url: api_base_url.into(),
        }
    }

    pub async fn load(&self, id: &UserId) -> Result<UserProfile, AppError> {
        Ok(self.users.get_user(id).await?)
    }

    /// Change username and, optionally, the profile picture
    pub async fn update(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, AppError> {
        update.validate()?;
        let profile = self.users.update_user(id, update).await?;
        tracing::info!(
            user_id = %id,
            username = %profile.user.username,
            new_picture = update.image.is_some(),
            "Profile updated"
        );
        Ok(profile)
    }

    pub fn avatar(&self, user: &PublicUser) -> Avatar {
        user.avatar(&self.api_base_url)
    }
}
