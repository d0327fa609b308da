//! Authentication
//!
//! - `token`: reading the expiry out of an access token
//! - `session`: login state, token persistence and refresh

pub mod session;
pub mod token;

pub use session::Session;
pub use token::{is_token_expired, token_expiry};
