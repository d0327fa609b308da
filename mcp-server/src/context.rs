//! Flowerly client wiring for the MCP server
//!
//! One HTTP client serves the auth endpoints; a copy carrying the session as
//! its token source serves everything else.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use flowerly_client::adapters::{ConfiguredTokenStore, FlowerlyHttpClient};
use flowerly_client::app::{
    FeedPager, PageSize, PlantCatalog, PostService, ProfileService, POST_TILE,
};
use flowerly_client::auth::Session;
use flowerly_client::domain::entities::{FeedScope, ImageUpload};
use flowerly_client::{AppError, Config, DomainError};
use tokio::sync::Mutex;

pub type FlowerlySession = Session<FlowerlyHttpClient, ConfiguredTokenStore>;

pub struct Flowerly {
    pub session: Arc<FlowerlySession>,
    /// Authenticated API client
    pub api: Arc<FlowerlyHttpClient>,
    pub posts: PostService<FlowerlyHttpClient>,
    pub profiles: ProfileService<FlowerlyHttpClient>,
    pub plants: Mutex<PlantCatalog<FlowerlyHttpClient>>,
    pub feed: Mutex<FeedPager<FlowerlyHttpClient>>,
}

impl Flowerly {
    /// Build from environment variables and pick up a saved session
    pub async fn from_env() -> Result<Self> {
        let config = Config::from_env().context("Invalid Flowerly configuration")?;
        let flowerly = Self::new(config)?;

        match flowerly.session.restore().await {
            Ok(true) => {}
            Ok(false) => tracing::info!("No saved session, use the login tool"),
            Err(e) => tracing::warn!(error = %e, "Could not restore saved session"),
        }
        Ok(flowerly)
    }

    pub fn new(config: Config) -> Result<Self> {
        let http = FlowerlyHttpClient::from_config(&config).context("Failed to build HTTP client")?;
        let store = Arc::new(ConfiguredTokenStore::from_config(&config));
        let session = Arc::new(Session::new(Arc::new(http.clone()), store));
        let api = Arc::new(http.with_token_source(session.clone()));

        let page_size = PageSize::from_viewport(config.viewport, POST_TILE, config.min_page_size);
        tracing::info!(
            api_url = %config.api_base_url,
            page_size = %page_size,
            "Flowerly client ready"
        );

        Ok(Self {
            posts: PostService::new(api.clone()),
            profiles: ProfileService::new(api.clone(), api.base_url()),
            plants: Mutex::new(PlantCatalog::new(api.clone())),
            feed: Mutex::new(FeedPager::new(api.clone(), FeedScope::All).with_page_size(page_size)),
            session,
            api,
        })
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }
}

/// Read an image from disk for upload
pub async fn read_image(path: &str) -> Result<ImageUpload, AppError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| DomainError::Validation(format!("Cannot read image {}: {}", path, e)))?;
    if bytes.is_empty() {
        return Err(DomainError::Validation(format!("Image {} is empty", path)).into());
    }
    let file_name = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("image")
        .to_string();
    Ok(ImageUpload::new(file_name, bytes))
}
