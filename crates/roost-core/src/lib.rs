//! Domain layer for the Roost client.
//!
//! Holds the session model and its pure state transitions, the navigation gate,
//! and the traits the outer layers implement (key-value storage, the backend
//! response envelope).

pub mod api;
pub mod config;
pub mod error;
pub mod navigation;
pub mod session;
pub mod storage;

// Re-export common error type
pub use error::RoostError;
