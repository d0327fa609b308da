//! Domain ports (traits)
//!
//! Port traits define interfaces that the application layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod flowerly;
pub mod token_store;

pub use flowerly::{AccessTokenSource, AuthApi, CommentApi, PlantApi, PostApi, UserApi};
pub use token_store::TokenStore;
