//! Network layer - remote resource accessors
//!
//! Each accessor performs a single HTTP GET and decodes the JSON body.

pub mod client;

pub use client::{search_url, ApiClient};
