//! HTTP adapter
//!
//! reqwest implementation of the Flowerly API ports.

pub mod client;

pub use client::FlowerlyHttpClient;
