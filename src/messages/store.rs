//! Store messages - communication between a consumer and the store actor

use serde::Serialize;

/// Commands sent from a consumer to the store actor
#[derive(Debug, Clone)]
pub enum StoreCommand {
    /// Refetch all users
    FetchUsers { id: u64 },
    /// Refetch all posts
    FetchPosts { id: u64 },
    /// Replace search results with posts whose title matches `query`
    SearchPosts { id: u64, query: String },
    /// Stop accepting commands once in-flight operations finish
    Shutdown,
}

/// The state field an operation replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StateField {
    Users,
    Posts,
    SearchedPosts,
}

/// Events sent back from the store actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The field now holds the new response
    Updated { id: u64, field: StateField },
    /// The accessor failed; the field is unchanged
    Failed {
        id: u64,
        field: StateField,
        message: String,
    },
}

impl StoreEvent {
    pub fn id(&self) -> u64 {
        match self {
            StoreEvent::Updated { id, .. } | StoreEvent::Failed { id, .. } => *id,
        }
    }

    pub fn field(&self) -> StateField {
        match self {
            StoreEvent::Updated { field, .. } | StoreEvent::Failed { field, .. } => *field,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StoreEvent::Updated { .. })
    }
}
