//! Login session
//!
//! Holds the token pair for the logged-in user, persists it through a
//! `TokenStore`, and hands out access tokens to the HTTP adapter. An expired
//! access token is refreshed before use; when no valid token can be obtained
//! the session logs itself out and reports `SessionExpired`.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::auth::token::is_token_expired;
use crate::domain::entities::{
    AuthTokens, Credentials, GoogleCredential, RegisterOutcome, Registration, UserId,
};
use crate::domain::ports::{AccessTokenSource, AuthApi, TokenStore};
use crate::error::{ApiError, AppError, DomainError};

pub struct Session<A, S>
where
    A: AuthApi,
    S: TokenStore,
{
    auth: Arc<A>,
    store: Arc<S>,
    /// Guarded by an async mutex so concurrent callers share one refresh
    tokens: Mutex<Option<AuthTokens>>,
}

impl<A, S> Session<A, S>
where
    A: AuthApi,
    S: TokenStore,
{
    pub fn new(auth: Arc<A>, store: Arc<S>) -> Self {
        Self {
            auth,
            store,
            tokens: Mutex::new(None),
        }
    }

    /// Pick up tokens saved by an earlier run
    pub async fn restore(&self) -> Result<bool, AppError> {
        let saved = self.store.load().await?;
        let restored = saved.is_some();
        if let Some(tokens) = &saved {
            tracing::info!(user_id = %tokens.user_id, "Restored saved session");
        }
        *self.tokens.lock().await = saved;
        Ok(restored)
    }

    pub async fn register(&self, registration: &Registration) -> Result<RegisterOutcome, AppError> {
        registration.validate()?;
        let outcome = self.auth.register(registration).await?;
        tracing::info!(email = %registration.email, ?outcome, "Registration finished");
        Ok(outcome)
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<UserId, AppError> {
        credentials.validate()?;
        let tokens = self
            .auth
            .login(credentials)
            .await
            .map_err(invalid_credentials)?;
        self.establish(tokens).await
    }

    pub async fn google_login(&self, credential: &GoogleCredential) -> Result<UserId, AppError> {
        let tokens = self
            .auth
            .google_login(credential)
            .await
            .map_err(invalid_credentials)?;
        self.establish(tokens).await
    }

    /// Forget tokens in memory and in the store
    pub async fn logout(&self) -> Result<(), AppError> {
        let previous = self.tokens.lock().await.take();
        self.store.clear().await?;
        if let Some(tokens) = previous {
            tracing::info!(user_id = %tokens.user_id, "Logged out");
        }
        Ok(())
    }

    pub async fn user_id(&self) -> Option<UserId> {
        self.tokens.lock().await.as_ref().map(|t| t.user_id.clone())
    }

    pub async fn is_logged_in(&self) -> bool {
        self.tokens.lock().await.is_some()
    }

    /// The logged-in user's id, or `NotLoggedIn`
    pub async fn require_user(&self) -> Result<UserId, AppError> {
        self.user_id().await.ok_or(AppError::NotLoggedIn)
    }

    async fn establish(&self, tokens: AuthTokens) -> Result<UserId, AppError> {
        self.store.save(&tokens).await?;
        let user_id = tokens.user_id.clone();
        *self.tokens.lock().await = Some(tokens);
        tracing::info!(user_id = %user_id, "Logged in");
        Ok(user_id)
    }

    async fn expire(&self, tokens: &mut Option<AuthTokens>) {
        *tokens = None;
        if let Err(e) = self.store.clear().await {
            tracing::warn!(error = %e, "Failed to clear saved tokens");
        }
    }
}

fn invalid_credentials(e: ApiError) -> AppError {
    match e {
        ApiError::Unauthorized | ApiError::NotFound(_) => {
            DomainError::Unauthorized("Invalid email or password".to_string()).into()
        }
        other => other.into(),
    }
}

#[async_trait]
impl<A, S> AccessTokenSource for Session<A, S>
where
    A: AuthApi,
    S: TokenStore,
{
    async fn access_token(&self) -> Result<String, ApiError> {
        let mut tokens = self.tokens.lock().await;
        let current = match tokens.as_ref() {
            Some(current) => current.clone(),
            None => return Err(ApiError::SessionExpired),
        };

        let now = chrono::Utc::now().timestamp();
        if !is_token_expired(Some(&current.access_token), now) {
            return Ok(current.access_token);
        }

        tracing::debug!(user_id = %current.user_id, "Access token expired, refreshing");
        match self.auth.refresh(&current.refresh_token).await {
            Ok(refreshed) => {
                let renewed = AuthTokens {
                    access_token: refreshed.access_token,
                    refresh_token: refreshed.refresh_token,
                    user_id: current.user_id,
                };
                if let Err(e) = self.store.save(&renewed).await {
                    tracing::warn!(error = %e, "Failed to save refreshed tokens");
                }
                let access_token = renewed.access_token.clone();
                *tokens = Some(renewed);
                Ok(access_token)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed, logging out");
                self.expire(&mut tokens).await;
                Err(ApiError::SessionExpired)
            }
        }
    }
}
