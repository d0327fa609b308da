//! Flowerly REST API client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use urlencoding::encode;

use crate::config::Config;
use crate::domain::entities::{
    AuthTokens, Comment, CommentId, Credentials, GoogleCredential, ImageUpload, NewComment,
    NewPost, Plant, PlantDescription, Post, PostId, PostQuery, PostUpdate, ProfileUpdate,
    RefreshedTokens, RegisterOutcome, Registration, UserId, UserProfile,
};
use crate::domain::ports::{AccessTokenSource, AuthApi, CommentApi, PlantApi, PostApi, UserApi};
use crate::error::ApiError;

/// Implementation of the Flowerly API ports over HTTP
///
/// Without a token source requests go out unauthenticated (that is what the
/// session itself uses for login and refresh). With one, every non-auth
/// request carries a bearer token and fails with `SessionExpired` when the
/// source cannot produce one.
#[derive(Clone)]
pub struct FlowerlyHttpClient {
    http: Client,
    base_url: String,
    tokens: Option<Arc<dyn AccessTokenSource>>,
}

impl FlowerlyHttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens: None,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(&config.api_base_url, config.http_timeout)
    }

    /// A copy of this client that authenticates with `tokens`
    pub fn with_token_source(&self, tokens: Arc<dyn AccessTokenSource>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            tokens: Some(tokens),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        match &self.tokens {
            Some(tokens) => Ok(request.bearer_auth(tokens.access_token().await?)),
            None => Ok(request),
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        Ok(self.authorized(request).await?.send().await?)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = self.check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), ApiError> {
        self.check_status(response).await.map(|_| ())
    }

    async fn check_status(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_string();
        let message = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), %url, "Flowerly API returned an error");
        match status.as_u16() {
            401 => Err(ApiError::Unauthorized),
            404 => Err(ApiError::NotFound(if message.is_empty() { url } else { message })),
            409 => Err(ApiError::Conflict(message)),
            code => Err(ApiError::Api {
                status: code,
                message,
            }),
        }
    }
}

fn image_part(image: &ImageUpload) -> Result<Part, ApiError> {
    Ok(Part::bytes(image.bytes.clone())
        .file_name(image.file_name.clone())
        .mime_str(&image.mime_type)?)
}

/// Request types for the Flowerly API
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DescribePlantRequest<'a> {
    plant_type: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HasLikedResponse {
    has_liked: bool,
}

#[async_trait]
impl PostApi for FlowerlyHttpClient {
    async fn list_posts(&self, query: &PostQuery) -> Result<Vec<Post>, ApiError> {
        let mut params = vec![
            ("page", query.page.to_string()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(owner) = &query.owner {
            params.push(("owner", owner.0.clone()));
        }

        let resp = self
            .send(self.http.get(self.api_url("/posts")).query(&params))
            .await?;
        self.handle_response(resp).await
    }

    async fn get_post(&self, id: &PostId) -> Result<Post, ApiError> {
        let resp = self
            .send(self.http.get(self.api_url(&format!("/posts/{}", encode(&id.0)))))
            .await?;
        self.handle_response(resp).await
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post, ApiError> {
        let form = Form::new()
            .text("content", post.content.clone())
            .text("plantType", post.plant_type.clone())
            .text("owner", post.owner.0.clone())
            .part("image", image_part(&post.image)?);

        let resp = self
            .send(self.http.post(self.api_url("/posts")).multipart(form))
            .await?;
        self.handle_response(resp).await
    }

    async fn update_post(&self, id: &PostId, update: &PostUpdate) -> Result<Post, ApiError> {
        let mut form = Form::new()
            .text("content", update.content.clone())
            .text("plantType", update.plant_type.clone());
        if let Some(image) = &update.image {
            form = form.part("image", image_part(image)?);
        }

        let resp = self
            .send(
                self.http
                    .put(self.api_url(&format!("/posts/{}", encode(&id.0))))
                    .multipart(form),
            )
            .await?;
        self.handle_response(resp).await
    }

    async fn delete_post(&self, id: &PostId) -> Result<(), ApiError> {
        let resp = self
            .send(
                self.http
                    .delete(self.api_url(&format!("/posts/{}", encode(&id.0)))),
            )
            .await?;
        self.handle_empty_response(resp).await
    }

    async fn toggle_like(&self, id: &PostId, user: &UserId) -> Result<Post, ApiError> {
        let resp = self
            .send(self.http.post(self.api_url(&format!(
                "/posts/{}/toggleLike/{}",
                encode(&id.0),
                encode(&user.0)
            ))))
            .await?;
        self.handle_response(resp).await
    }

    async fn has_liked(&self, id: &PostId, user: &UserId) -> Result<bool, ApiError> {
        let resp = self
            .send(self.http.get(self.api_url(&format!(
                "/posts/{}/hasLiked/{}",
                encode(&id.0),
                encode(&user.0)
            ))))
            .await?;
        let body: HasLikedResponse = self.handle_response(resp).await?;
        Ok(body.has_liked)
    }
}

#[async_trait]
impl CommentApi for FlowerlyHttpClient {
    async fn comments_for_post(&self, post_id: &PostId) -> Result<Vec<Comment>, ApiError> {
        let resp = self
            .send(
                self.http
                    .get(self.api_url(&format!("/comments/byPost/{}", encode(&post_id.0)))),
            )
            .await?;
        self.handle_response(resp).await
    }

    async fn add_comment(&self, comment: &NewComment) -> Result<Comment, ApiError> {
        let resp = self
            .send(self.http.post(self.api_url("/comments")).json(comment))
            .await?;
        self.handle_response(resp).await
    }

    async fn delete_comment(&self, id: &CommentId) -> Result<(), ApiError> {
        let resp = self
            .send(
                self.http
                    .delete(self.api_url(&format!("/comments/{}", encode(&id.0)))),
            )
            .await?;
        self.handle_empty_response(resp).await
    }
}

#[async_trait]
impl UserApi for FlowerlyHttpClient {
    async fn get_user(&self, id: &UserId) -> Result<UserProfile, ApiError> {
        let resp = self
            .send(self.http.get(self.api_url(&format!("/users/{}", encode(&id.0)))))
            .await?;
        self.handle_response(resp).await
    }

    async fn update_user(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, ApiError> {
        let mut form = Form::new().text("username", update.username.clone());
        if let Some(image) = &update.image {
            form = form.part("image", image_part(image)?);
        }

        let resp = self
            .send(
                self.http
                    .put(self.api_url(&format!("/users/{}", encode(&id.0))))
                    .multipart(form),
            )
            .await?;
        self.handle_response(resp).await
    }
}

#[async_trait]
impl AuthApi for FlowerlyHttpClient {
    async fn register(&self, registration: &Registration) -> Result<RegisterOutcome, ApiError> {
        let mut form = Form::new()
            .text("email", registration.email.clone())
            .text("password", registration.password.clone());
        if let Some(image) = &registration.profile_picture {
            form = form.part("image", image_part(image)?);
        }

        let resp = self
            .http
            .post(self.api_url("/auth/register"))
            .multipart(form)
            .send()
            .await?;

        match self.handle_empty_response(resp).await {
            Ok(()) => Ok(RegisterOutcome::Created),
            Err(ApiError::Conflict(_)) => Ok(RegisterOutcome::AlreadyExists),
            Err(e) => Err(e),
        }
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthTokens, ApiError> {
        let resp = self
            .http
            .post(self.api_url("/auth/login"))
            .json(credentials)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn google_login(&self, credential: &GoogleCredential) -> Result<AuthTokens, ApiError> {
        let resp = self
            .http
            .post(self.api_url("/auth/google"))
            .json(credential)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedTokens, ApiError> {
        let resp = self
            .http
            .post(self.api_url("/auth/refresh"))
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;
        self.handle_response(resp).await
    }
}

#[async_trait]
impl PlantApi for FlowerlyHttpClient {
    async fn list_plants(&self) -> Result<Vec<Plant>, ApiError> {
        let resp = self.send(self.http.get(self.api_url("/plants"))).await?;
        self.handle_response(resp).await
    }

    async fn describe_plant(&self, plant_type: &str) -> Result<PlantDescription, ApiError> {
        let resp = self
            .send(
                self.http
                    .post(self.api_url("/ai/flower-description"))
                    .json(&DescribePlantRequest { plant_type }),
            )
            .await?;
        self.handle_response(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_trims_trailing_slash() {
        let client =
            FlowerlyHttpClient::new("http://localhost:3000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.api_url("/posts"), "http://localhost:3000/posts");
    }

    #[test]
    fn refresh_request_serialization() {
        let json = serde_json::to_string(&RefreshRequest {
            refresh_token: "r-1",
        })
        .unwrap();
        assert_eq!(json, r#"{"refreshToken":"r-1"}"#);
    }

    #[test]
    fn describe_request_serialization() {
        let json = serde_json::to_string(&DescribePlantRequest { plant_type: "Fern" }).unwrap();
        assert_eq!(json, r#"{"plantType":"Fern"}"#);
    }

    #[test]
    fn has_liked_response_deserialization() {
        let body: HasLikedResponse = serde_json::from_str(r#"{"hasLiked":true}"#).unwrap();
        assert!(body.has_liked);
    }
}
