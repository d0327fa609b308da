use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::AuthTokens;
use crate::domain::ports::TokenStore;
use crate::error::StoreError;

/// Tokens kept only for the life of the process
#[derive(Default)]
pub struct InMemoryTokenStore {
    tokens: RwLock<Option<AuthTokens>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: AuthTokens) -> Self {
        Self {
            tokens: RwLock::new(Some(tokens)),
        }
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn load(&self) -> Result<Option<AuthTokens>, StoreError> {
        Ok(self.tokens.read().await.clone())
    }

    async fn save(&self, tokens: &AuthTokens) -> Result<(), StoreError> {
        *self.tokens.write().await = Some(tokens.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.tokens.write().await = None;
        Ok(())
    }
}
