//! Store state - pure data structure with no I/O logic

use serde::Serialize;

use crate::models::{Post, User};

/// Last-known collections fetched from the server
///
/// `users` and `posts` stay `None` until their first successful fetch. After
/// that each holds exactly the most recent response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StoreState {
    pub users: Option<Vec<User>>,
    pub posts: Option<Vec<Post>>,
    pub searched_posts: Vec<Post>,
    /// Never toggled by store operations; kept for consumers that bind to it
    pub loading: bool,
}

impl StoreState {
    pub fn new() -> Self {
        Self::default()
    }
}
