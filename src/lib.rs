//! # placeholder-store
//!
//! Client-side data access for the JSONPlaceholder `/users` and `/posts`
//! resources.
//!
//! ## Features
//! - Accessors for users, posts and title search
//! - Shared state container with change subscriptions
//! - Command-channel actor for event-loop consumers
//! - YAML config with command-line and environment overrides
//!
//! ## Architecture
//! - Network Layer (reqwest) - one GET per accessor, JSON decoded
//! - Store Layer - last fetched collections behind a `watch` channel
//! - Store Actor (Tokio) - runs store operations on command

pub mod config;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::ApiError;
pub use messages::{StateField, StoreCommand, StoreEvent};
pub use models::{Address, Company, Post, User};
pub use network::{search_url, ApiClient};
pub use store::{ApiStore, StoreActor, StoreState};
