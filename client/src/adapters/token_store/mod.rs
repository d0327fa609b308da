//! Token store adapters
//!
//! In-memory storage for tests and short-lived processes, and a JSON file
//! for sessions that should survive a restart.

pub mod file;
pub mod memory;

pub use file::FileTokenStore;
pub use memory::InMemoryTokenStore;

use async_trait::async_trait;

use crate::config::Config;
use crate::domain::entities::AuthTokens;
use crate::domain::ports::TokenStore;
use crate::error::StoreError;

/// The store picked by configuration: a file when `token_file` is set,
/// memory otherwise
pub enum ConfiguredTokenStore {
    File(FileTokenStore),
    Memory(InMemoryTokenStore),
}

impl ConfiguredTokenStore {
    pub fn from_config(config: &Config) -> Self {
        match &config.token_file {
            Some(path) => Self::File(FileTokenStore::new(path.clone())),
            None => Self::Memory(InMemoryTokenStore::new()),
        }
    }
}

#[async_trait]
impl TokenStore for ConfiguredTokenStore {
    async fn load(&self) -> Result<Option<AuthTokens>, StoreError> {
        match self {
            Self::File(store) => store.load().await,
            Self::Memory(store) => store.load().await,
        }
    }

    async fn save(&self, tokens: &AuthTokens) -> Result<(), StoreError> {
        match self {
            Self::File(store) => store.save(tokens).await,
            Self::Memory(store) => store.save(tokens).await,
        }
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match self {
            Self::File(store) => store.clear().await,
            Self::Memory(store) => store.clear().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{now_plus, test_tokens};

    #[tokio::test]
    async fn memory_store_without_token_file() {
        let store = ConfiguredTokenStore::from_config(&Config::default());
        assert!(matches!(store, ConfiguredTokenStore::Memory(_)));

        let tokens = test_tokens("u1", now_plus(60));
        store.save(&tokens).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(tokens));
    }

    #[test]
    fn file_store_with_token_file() {
        let config = Config {
            token_file: Some("/tmp/flowerly-tokens.json".into()),
            ..Config::default()
        };
        match ConfiguredTokenStore::from_config(&config) {
            ConfiguredTokenStore::File(store) => {
                assert_eq!(store.path(), std::path::Path::new("/tmp/flowerly-tokens.json"))
            }
            ConfiguredTokenStore::Memory(_) => panic!("expected a file store"),
        }
    }
}
