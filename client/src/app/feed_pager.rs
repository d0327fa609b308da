//! Feed pager
//!
//! Incrementally loads a feed (all posts, or one user's posts) page by page.
//! The pager owns the page cursor and the has-more flag, drops posts it
//! already holds when pages overlap, and exposes `request_more` for a
//! load-more trigger such as a "last post became visible" signal.
//!
//! A fetch is split in two halves, `begin_fetch` and `complete_fetch`, so the
//! loading flag guards the cursor while a request is out. `fetch_next_page`
//! runs both halves against the post API.

use std::collections::HashSet;
use std::sync::Arc;

use crate::app::page_size::PageSize;
use crate::domain::entities::{FeedScope, Post, PostId, PostQuery};
use crate::domain::ports::PostApi;
use crate::error::{ApiError, DomainError};

/// The one error a view ever sees from the pager
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load posts";

/// Why `fetch_next_page` did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A fetch is already in flight
    Loading,
    /// The last page came back short
    Exhausted,
    /// No page size yet
    PageSizeUnknown,
    /// The current page is already loaded; call `request_more` first
    UpToDate,
}

/// What a fetch attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Skipped(SkipReason),
    /// `received` posts came back, `added` of them were new
    Loaded { received: usize, added: usize },
    /// The request failed; the error message is set
    Failed,
    /// The response is not for the fetch in flight: its scope has since
    /// been reset, or that page was already applied
    Stale,
}

/// Ticket for one in-flight page request
#[derive(Debug, PartialEq, Eq)]
pub struct PageRequest {
    generation: u64,
    query: PostQuery,
}

impl PageRequest {
    pub fn query(&self) -> &PostQuery {
        &self.query
    }
}

pub struct FeedPager<P>
where
    P: PostApi,
{
    posts_api: Arc<P>,
    scope: FeedScope,
    posts: Vec<Post>,
    loading: bool,
    error: Option<String>,
    page: u32,
    has_more: bool,
    page_size: Option<PageSize>,
    /// Bumped on every reset so late responses can be recognised
    generation: u64,
    /// Page already merged for the current generation
    loaded_page: Option<u32>,
}

impl<P> FeedPager<P>
where
    P: PostApi,
{
    /// A pager for `scope` with its first page pending
    pub fn new(posts_api: Arc<P>, scope: FeedScope) -> Self {
        Self {
            posts_api,
            scope,
            posts: Vec::new(),
            loading: false,
            error: None,
            page: 1,
            has_more: true,
            page_size: None,
            generation: 0,
            loaded_page: None,
        }
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Fix the page size. It can be set once; setting the same value again
    /// is accepted, a different one is rejected.
    pub fn set_page_size(&mut self, page_size: PageSize) -> Result<(), DomainError> {
        match self.page_size {
            None => {
                tracing::debug!(page_size = %page_size, "Feed page size set");
                self.page_size = Some(page_size);
                Ok(())
            }
            Some(current) if current == page_size => Ok(()),
            Some(current) => Err(DomainError::Validation(format!(
                "Page size is already {} for this session",
                current
            ))),
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn page_size(&self) -> Option<PageSize> {
        self.page_size
    }

    pub fn scope(&self) -> &FeedScope {
        &self.scope
    }

    /// Whether the current page still needs to be fetched
    pub fn is_pending(&self) -> bool {
        self.loaded_page != Some(self.page)
    }

    /// Start over for `scope`: empty list, page 1, has-more set, first
    /// page pending. Any response still in flight will be discarded.
    pub fn reset(&mut self, scope: FeedScope) {
        tracing::debug!(scope = %scope, "Resetting feed");
        self.scope = scope;
        self.posts.clear();
        self.loading = false;
        self.error = None;
        self.page = 1;
        self.has_more = true;
        self.loaded_page = None;
        self.generation += 1;
    }

    /// Reset only if `scope` differs from the current one
    pub fn set_scope(&mut self, scope: FeedScope) -> bool {
        if self.scope == scope {
            return false;
        }
        self.reset(scope);
        true
    }

    /// Claim the next page request, marking the pager as loading
    pub fn begin_fetch(&mut self) -> Result<PageRequest, SkipReason> {
        if self.loading {
            return Err(SkipReason::Loading);
        }
        if !self.has_more {
            return Err(SkipReason::Exhausted);
        }
        let page_size = self.page_size.ok_or(SkipReason::PageSizeUnknown)?;
        if !self.is_pending() {
            return Err(SkipReason::UpToDate);
        }

        self.loading = true;
        Ok(PageRequest {
            generation: self.generation,
            query: PostQuery {
                owner: self.scope.owner().cloned(),
                page: self.page,
                limit: page_size.get(),
            },
        })
    }

    /// Apply the result of a request obtained from `begin_fetch`
    pub fn complete_fetch(
        &mut self,
        request: PageRequest,
        result: Result<Vec<Post>, ApiError>,
    ) -> FetchOutcome {
        if request.generation != self.generation {
            tracing::debug!(
                page = request.query.page,
                scope = %self.scope,
                "Discarding response for a previous feed scope"
            );
            return FetchOutcome::Stale;
        }
        if !self.loading || request.query.page != self.page {
            tracing::debug!(
                page = request.query.page,
                current_page = self.page,
                loading = self.loading,
                "Discarding response for a page not in flight"
            );
            return FetchOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(incoming) => {
                let received = incoming.len();
                let added = self.merge(incoming);
                self.has_more = received >= request.query.limit;
                self.loaded_page = Some(request.query.page);
                self.error = None;
                tracing::debug!(
                    page = request.query.page,
                    received,
                    added,
                    has_more = self.has_more,
                    "Feed page loaded"
                );
                FetchOutcome::Loaded { received, added }
            }
            Err(e) => {
                tracing::warn!(page = request.query.page, error = %e, "Failed to load feed page");
                self.error = Some(FETCH_FAILED_MESSAGE.to_string());
                FetchOutcome::Failed
            }
        }
    }

    /// Fetch the current page if one is pending
    pub async fn fetch_next_page(&mut self) -> FetchOutcome {
        let request = match self.begin_fetch() {
            Ok(request) => request,
            Err(reason) => return FetchOutcome::Skipped(reason),
        };
        let result = self.posts_api.list_posts(request.query()).await;
        self.complete_fetch(request, result)
    }

    /// Advance the cursor for a load-more trigger. Does nothing while a
    /// fetch is in flight, after the last page, or while the current page
    /// has not been loaded yet.
    pub fn request_more(&mut self) -> bool {
        if self.loading || !self.has_more || self.is_pending() {
            return false;
        }
        self.page += 1;
        tracing::debug!(page = self.page, scope = %self.scope, "More posts requested");
        true
    }

    /// `request_more` followed by `fetch_next_page`
    pub async fn load_more(&mut self) -> FetchOutcome {
        self.request_more();
        self.fetch_next_page().await
    }

    /// Drop a post that was deleted elsewhere
    pub fn remove_locally(&mut self, id: &PostId) -> Option<Post> {
        let index = self.posts.iter().position(|p| &p.id == id)?;
        Some(self.posts.remove(index))
    }

    /// Swap in a newer copy of a held post (after a like or an edit)
    pub fn replace_locally(&mut self, post: Post) -> bool {
        match self.posts.iter_mut().find(|p| p.id == post.id) {
            Some(slot) => {
                *slot = post;
                true
            }
            None => false,
        }
    }

    fn merge(&mut self, incoming: Vec<Post>) -> usize {
        let mut seen: HashSet<PostId> = self.posts.iter().map(|p| p.id.clone()).collect();
        let before = self.posts.len();
        for post in incoming {
            if seen.insert(post.id.clone()) {
                self.posts.push(post);
            }
        }
        self.posts.len() - before
    }
}
