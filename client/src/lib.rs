//! Flowerly client
//!
//! Client-side core for the Flowerly plant-photo sharing service: the
//! paginated post feed, posts, comments, likes, profiles, the plant catalog
//! and the login session, over the Flowerly REST API.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

pub mod adapters;
pub mod app;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use error::{ApiError, AppError, ConfigError, DomainError, StoreError};
