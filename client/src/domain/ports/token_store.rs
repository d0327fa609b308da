//! Token store port
//!
//! Where the session's tokens survive between runs.

use async_trait::async_trait;

use crate::domain::entities::AuthTokens;
use crate::error::StoreError;

#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load saved tokens, if any
    async fn load(&self) -> Result<Option<AuthTokens>, StoreError>;

    /// Replace saved tokens
    async fn save(&self, tokens: &AuthTokens) -> Result<(), StoreError>;

    /// Forget access token, refresh token and user id
    async fn clear(&self) -> Result<(), StoreError>;
}
