//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The data ports get hand-written in-memory fakes: they hold state, so a
//! service test can check what ended up stored. The auth port is mocked
//! with mockall because its tests care about call expectations instead.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
