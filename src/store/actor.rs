//! Store actor - runs store operations in the Tokio runtime on command

use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};

use crate::messages::{StateField, StoreCommand, StoreEvent};
use crate::store::ApiStore;

/// Store actor that turns commands into store operations
pub struct StoreActor {
    store: ApiStore,
    event_tx: mpsc::UnboundedSender<StoreEvent>,
    active_requests: JoinSet<()>,
}

impl StoreActor {
    pub fn new(store: ApiStore, event_tx: mpsc::UnboundedSender<StoreEvent>) -> Self {
        StoreActor {
            store,
            event_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<StoreCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(StoreCommand::Shutdown) | None => break,
                        Some(command) => self.dispatch(command),
                    }
                }

                Some(result) = self.active_requests.join_next() => {
                    reap(result);
                }
            }
        }

        // No cancellation: let in-flight operations land before exiting
        let pending = self.active_requests.len();
        if pending > 0 {
            tracing::info!(pending, "Waiting for in-flight operations");
        }
        while let Some(result) = self.active_requests.join_next().await {
            reap(result);
        }
    }

    fn dispatch(&mut self, command: StoreCommand) {
        let store = self.store.clone();
        let event_tx = self.event_tx.clone();

        self.active_requests.spawn(async move {
            let (id, field, result) = match command {
                StoreCommand::FetchUsers { id } => (id, StateField::Users, store.fetch_users().await),
                StoreCommand::FetchPosts { id } => (id, StateField::Posts, store.fetch_posts().await),
                StoreCommand::SearchPosts { id, query } => {
                    tracing::info!(id, query = %query, "Searching posts");
                    (id, StateField::SearchedPosts, store.search_posts(&query).await)
                }
                StoreCommand::Shutdown => return,
            };

            let event = match result {
                Ok(()) => {
                    tracing::info!(id, ?field, "Operation completed");
                    StoreEvent::Updated { id, field }
                }
                Err(e) => {
                    tracing::warn!(id, ?field, error = %e, "Operation failed");
                    StoreEvent::Failed {
                        id,
                        field,
                        message: e.to_string(),
                    }
                }
            };
            let _ = event_tx.send(event);
        });
    }
}

/// Log a task that ended without sending its event; returns true in that case
fn reap(result: Result<(), JoinError>) -> bool {
    match result {
        Ok(()) => false,
        Err(e) => {
            tracing::warn!(error = %e, panicked = e.is_panic(), "Store operation ended without an event");
            true
        }
    }
}
