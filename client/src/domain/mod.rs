//! Domain layer
//!
//! Contains pure models and the traits the application needs from the outside.
//! - `entities`: Domain models for posts, comments, users and plants
//! - `ports`: Trait definitions for the remote API and token storage

pub mod entities;
pub mod ports;
