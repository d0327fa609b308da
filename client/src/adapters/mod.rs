//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod http;
pub mod token_store;

pub use http::FlowerlyHttpClient;
pub use token_store::{ConfiguredTokenStore, FileTokenStore, InMemoryTokenStore};
