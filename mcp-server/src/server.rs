//! Flowerly MCP Server implementation
//!
//! Every tool answers with plain text. Failures come back as tool errors
//! carrying the same short message a Flowerly screen would show.

use std::sync::Arc;

use anyhow::Result;
use flowerly_client::app::{CommentThread, FetchOutcome, SkipReason, FETCH_FAILED_MESSAGE};
use flowerly_client::domain::entities::{
    Credentials, FeedScope, NewPost, PostId, PostUpdate, ProfileUpdate, RegisterOutcome,
    Registration, UserId,
};
use flowerly_client::AppError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{
    handler::server::tool::ToolRouter,
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::context::{read_image, Flowerly};
use crate::render;

/// Flowerly MCP Server
///
/// Lets an agent browse the Flowerly feed page by page, post, like and
/// comment as the logged-in user.
#[derive(Clone)]
pub struct FlowerlyServer {
    flowerly: Arc<Flowerly>,
    tool_router: ToolRouter<Self>,
}

impl FlowerlyServer {
    pub async fn from_env() -> Result<Self> {
        Ok(Self::new(Flowerly::from_env().await?))
    }

    pub fn new(flowerly: Flowerly) -> Self {
        Self {
            flowerly: Arc::new(flowerly),
            tool_router: Self::tool_router(),
        }
    }
}

type ToolOutput = std::result::Result<String, String>;

fn reply(output: ToolOutput) -> Result<CallToolResult, McpError> {
    match output {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(message) => Ok(CallToolResult::error(vec![Content::text(message)])),
    }
}

fn user_error(e: AppError) -> String {
    e.user_message()
}

// --- Tool Parameter Types ---

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LoginParams {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RegisterParams {
    /// Account email
    pub email: String,
    /// Password, at least 6 characters
    pub password: String,
    /// Must repeat the password
    pub confirm_password: String,
    /// Local path of a profile picture (optional)
    #[serde(default)]
    pub image_path: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UserFeedParams {
    /// Whose posts to show; defaults to your own
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PostIdParams {
    /// Post id as shown in the feed
    pub post_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CommentParams {
    /// Post id as shown in the feed
    pub post_id: String,
    /// Comment text
    pub content: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreatePostParams {
    /// Plant type, e.g. one of the names from the plants tool
    pub plant_type: String,
    /// Post text
    pub content: String,
    /// Local path of the photo to upload
    pub image_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EditPostParams {
    /// Post id as shown in the feed
    pub post_id: String,
    /// New plant type
    pub plant_type: String,
    /// New post text
    pub content: String,
    /// Local path of a replacement photo (optional)
    #[serde(default)]
    pub image_path: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DescribePlantParams {
    /// Plant type to describe
    pub plant_type: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateProfileParams {
    /// New username: letters, digits and ?!@. only, at least one letter
    pub username: String,
    /// Local path of a new profile picture (optional)
    #[serde(default)]
    pub image_path: Option<String>,
}

impl FlowerlyServer {
    async fn current_user(&self) -> std::result::Result<UserId, String> {
        self.flowerly.session.require_user().await.map_err(user_error)
    }

    /// Reset the feed to `scope` and load its first page
    async fn first_page(&self, scope: FeedScope) -> ToolOutput {
        let viewer = self.current_user().await?;
        let mut feed = self.flowerly.feed.lock().await;
        feed.reset(scope);

        match feed.fetch_next_page().await {
            FetchOutcome::Loaded { .. } => Ok(render::feed_page(
                feed.scope(),
                feed.posts(),
                1,
                feed.has_more(),
                Some(&viewer),
            )),
            FetchOutcome::Failed => Err(feed.error().unwrap_or(FETCH_FAILED_MESSAGE).to_string()),
            other => Err(format!("Feed did not load ({:?})", other)),
        }
    }
}

#[tool_router]
impl FlowerlyServer {
    // === Session ===

    #[tool(description = "Log in to Flowerly with email and password. Required before anything else.")]
    async fn login(&self, params: Parameters<LoginParams>) -> Result<CallToolResult, McpError> {
        let credentials = Credentials {
            email: params.0.email.trim().to_string(),
            password: params.0.password,
        };
        let output: ToolOutput = match self.flowerly.session.login(&credentials).await {
            Ok(user) => Ok(format!(
                "Logged in (user id {}). Call 'feed' to see the latest posts.",
                user
            )),
            Err(e) => Err(user_error(e)),
        };
        reply(output)
    }

    #[tool(description = "Create a Flowerly account. Log in afterwards.")]
    async fn register(&self, params: Parameters<RegisterParams>) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let output: ToolOutput = async {
            let profile_picture = match &params.image_path {
                Some(path) => Some(read_image(path).await.map_err(user_error)?),
                None => None,
            };
            let registration = Registration {
                email: params.email.trim().to_string(),
                password: params.password,
                confirm_password: params.confirm_password,
                profile_picture,
            };
            match self.flowerly.session.register(&registration).await {
                Ok(RegisterOutcome::Created) => {
                    Ok("Account created. You can log in now.".to_string())
                }
                Ok(RegisterOutcome::AlreadyExists) => {
                    Err("An account with this email already exists.".to_string())
                }
                Err(e) => Err(user_error(e)),
            }
        }
        .await;
        reply(output)
    }

    #[tool(description = "Log out and forget the saved session.")]
    async fn logout(&self) -> Result<CallToolResult, McpError> {
        let output: ToolOutput = match self.flowerly.session.logout().await {
            Ok(()) => {
                self.flowerly.feed.lock().await.reset(FeedScope::All);
                Ok("Logged out.".to_string())
            }
            Err(e) => Err(user_error(e)),
        };
        reply(output)
    }

    // === Feed ===

    #[tool(description = "Show the first page of the Flowerly feed (all users' posts, newest first).")]
    async fn feed(&self) -> Result<CallToolResult, McpError> {
        reply(self.first_page(FeedScope::All).await)
    }

    #[tool(description = "Show the first page of one user's posts. Defaults to your own posts.")]
    async fn user_feed(&self, params: Parameters<UserFeedParams>) -> Result<CallToolResult, McpError> {
        let output: ToolOutput = async {
            let owner = match params.0.user_id {
                Some(id) if !id.trim().is_empty() => UserId::from(id.trim()),
                _ => self.current_user().await?,
            };
            self.first_page(FeedScope::Owner(owner)).await
        }
        .await;
        reply(output)
    }

    #[tool(description = "Load the next page of the feed last shown by 'feed' or 'user_feed'.")]
    async fn feed_more(&self) -> Result<CallToolResult, McpError> {
        let output: ToolOutput = async {
            let viewer = self.current_user().await?;
            let mut feed = self.flowerly.feed.lock().await;
            let before = feed.posts().len();

            match feed.load_more().await {
                FetchOutcome::Loaded { added: 0, .. } if !feed.has_more() => {
                    Ok("No more posts.".to_string())
                }
                FetchOutcome::Loaded { .. } => Ok(render::feed_page(
                    feed.scope(),
                    &feed.posts()[before..],
                    before + 1,
                    feed.has_more(),
                    Some(&viewer),
                )),
                FetchOutcome::Skipped(SkipReason::Exhausted) => Ok("No more posts.".to_string()),
                FetchOutcome::Skipped(SkipReason::Loading) => {
                    Err("A page is still loading; call 'feed' to start over.".to_string())
                }
                FetchOutcome::Failed => {
                    Err(feed.error().unwrap_or(FETCH_FAILED_MESSAGE).to_string())
                }
                other => Err(format!("Feed did not load ({:?})", other)),
            }
        }
        .await;
        reply(output)
    }

    // === Posts ===

    #[tool(description = "Show one post with its comments.")]
    async fn post(&self, params: Parameters<PostIdParams>) -> Result<CallToolResult, McpError> {
        let output: ToolOutput = async {
            let viewer = self.current_user().await?;
            let id = PostId::from(params.0.post_id.trim());
            let post = self.flowerly.posts.get(&id).await.map_err(user_error)?;

            let mut thread = CommentThread::new(self.flowerly.api.clone(), id);
            thread.load().await;
            let comments = match thread.error() {
                Some(message) => Err(message),
                None => Ok(thread.comments()),
            };
            Ok(render::post_detail(
                &post,
                comments,
                self.flowerly.base_url(),
                Some(&viewer),
            ))
        }
        .await;
        reply(output)
    }

    #[tool(description = "Like a post, or remove your like if you already liked it.")]
    async fn like(&self, params: Parameters<PostIdParams>) -> Result<CallToolResult, McpError> {
        let output: ToolOutput = async {
            let user = self.current_user().await?;
            let id = PostId::from(params.0.post_id.trim());
            let post = self
                .flowerly
                .posts
                .toggle_like(&user, &id)
                .await
                .map_err(user_error)?;

            let verb = if post.is_liked_by(&user) { "Liked" } else { "Unliked" };
            let text = format!("{} post {} ({} likes).", verb, post.id, post.like_count());
            self.flowerly.feed.lock().await.replace_locally(post);
            Ok(text)
        }
        .await;
        reply(output)
    }

    #[tool(description = "Comment on a post.")]
    async fn comment(&self, params: Parameters<CommentParams>) -> Result<CallToolResult, McpError> {
        let output: ToolOutput = async {
            let user = self.current_user().await?;
            let id = PostId::from(params.0.post_id.trim());
            let mut thread = CommentThread::new(self.flowerly.api.clone(), id);
            let comment = thread
                .add(&user, &params.0.content)
                .await
                .map_err(user_error)?;
            Ok(format!("Comment added to post {}.", comment.post_id))
        }
        .await;
        reply(output)
    }

    #[tool(description = "Delete one of your own posts.")]
    async fn delete_post(&self, params: Parameters<PostIdParams>) -> Result<CallToolResult, McpError> {
        let output: ToolOutput = async {
            let user = self.current_user().await?;
            let id = PostId::from(params.0.post_id.trim());
            self.flowerly
                .posts
                .delete(&user, &id)
                .await
                .map_err(user_error)?;
            self.flowerly.feed.lock().await.remove_locally(&id);
            Ok(format!("Deleted post {}.", id))
        }
        .await;
        reply(output)
    }

    #[tool(description = "Share a new plant photo. The image is read from a local file path.")]
    async fn create_post(
        &self,
        params: Parameters<CreatePostParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let output: ToolOutput = async {
            let owner = self.current_user().await?;
            let image = read_image(&params.image_path).await.map_err(user_error)?;
            let draft = NewPost {
                owner,
                plant_type: params.plant_type.trim().to_string(),
                content: params.content.trim().to_string(),
                image,
            };
            let post = self.flowerly.posts.create(&draft).await.map_err(user_error)?;
            Ok(format!(
                "Created post {}. Call 'feed' to see it at the top.",
                post.id
            ))
        }
        .await;
        reply(output)
    }

    #[tool(description = "Edit one of your own posts. The photo is only replaced when image_path is given.")]
    async fn edit_post(&self, params: Parameters<EditPostParams>) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let output: ToolOutput = async {
            let editor = self.current_user().await?;
            let image = match &params.image_path {
                Some(path) => Some(read_image(path).await.map_err(user_error)?),
                None => None,
            };
            let update = PostUpdate {
                plant_type: params.plant_type.trim().to_string(),
                content: params.content.trim().to_string(),
                image,
            };
            let id = PostId::from(params.post_id.trim());
            let post = self
                .flowerly
                .posts
                .update(&editor, &id, &update)
                .await
                .map_err(user_error)?;
            self.flowerly.feed.lock().await.replace_locally(post);
            Ok(format!("Updated post {}.", id))
        }
        .await;
        reply(output)
    }

    // === Plants ===

    #[tool(description = "List the plant types that can be used for posts.")]
    async fn plants(&self) -> Result<CallToolResult, McpError> {
        let output: ToolOutput = async {
            self.current_user().await?;
            let mut catalog = self.flowerly.plants.lock().await;
            Ok(render::plants(catalog.plants().await))
        }
        .await;
        reply(output)
    }

    #[tool(description = "Get an AI-written description of a plant type, handy as post text.")]
    async fn describe_plant(
        &self,
        params: Parameters<DescribePlantParams>,
    ) -> Result<CallToolResult, McpError> {
        let output: ToolOutput = async {
            self.current_user().await?;
            let catalog = self.flowerly.plants.lock().await;
            catalog
                .describe(&params.0.plant_type)
                .await
                .map_err(user_error)
        }
        .await;
        reply(output)
    }

    // === Profile ===

    #[tool(description = "Show your profile.")]
    async fn profile(&self) -> Result<CallToolResult, McpError> {
        let output: ToolOutput = async {
            let user = self.current_user().await?;
            let profile = self
                .flowerly
                .profiles
                .load(&user)
                .await
                .map_err(user_error)?;
            let avatar = self.flowerly.profiles.avatar(&profile.user);
            Ok(render::profile(&profile, &avatar))
        }
        .await;
        reply(output)
    }

    #[tool(description = "Change your username and, optionally, your profile picture.")]
    async fn update_profile(
        &self,
        params: Parameters<UpdateProfileParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let output: ToolOutput = async {
            let user = self.current_user().await?;
            let image = match &params.image_path {
                Some(path) => Some(read_image(path).await.map_err(user_error)?),
                None => None,
            };
            let update = ProfileUpdate {
                username: params.username.trim().to_string(),
                image,
            };
            let profile = self
                .flowerly
                .profiles
                .update(&user, &update)
                .await
                .map_err(user_error)?;
            let avatar = self.flowerly.profiles.avatar(&profile.user);
            Ok(render::profile(&profile, &avatar))
        }
        .await;
        reply(output)
    }
}

#[tool_handler]
impl ServerHandler for FlowerlyServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "flowerly".into(),
                title: Some("Flowerly MCP Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                r#"Flowerly - share photos of your plants

SETUP: 'register' once, then 'login'. The session is kept between runs
when FLOWERLY_TOKEN_FILE is set.

BROWSING:
1. 'feed' - first page of everyone's posts
2. 'feed_more' - next page, until it says there are no more posts
3. 'user_feed' - one user's posts (yours by default)
4. 'post' - one post with its comments

SHARING:
- 'plants' lists plant types; 'describe_plant' drafts post text
- 'create_post' uploads a photo from a local file
- 'edit_post' / 'delete_post' work on your own posts only
- 'like' toggles your like; 'comment' adds a comment

PROFILE:
- 'profile' shows your account; 'update_profile' changes username or picture"#
                    .into(),
            ),
        }
    }
}
