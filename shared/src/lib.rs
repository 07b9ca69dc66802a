//! Shared types for the comanda engine
//!
//! Common types used across the workspace: data models, the order
//! command/event/snapshot vocabulary, notification intents, and error
//! classification.

pub mod error;
pub mod models;
pub mod notification;
pub mod order;

// Re-exports
pub use serde::{Deserialize, Serialize};
