//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports; views own them.

pub mod comment_thread;
pub mod feed_pager;
pub mod page_size;
pub mod plant_catalog;
pub mod post_service;
pub mod profile_service;

pub use comment_thread::CommentThread;
pub use feed_pager::{FeedPager, FetchOutcome, PageRequest, SkipReason, FETCH_FAILED_MESSAGE};
pub use page_size::{PageSize, TileSize, Viewport, POST_TILE};
pub use plant_catalog::PlantCatalog;
pub use post_service::PostService;
pub use profile_service::ProfileService;
