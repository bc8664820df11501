//! Message types for driving the store from an event loop.

pub mod store;

pub use store::{StateField, StoreCommand, StoreEvent};
