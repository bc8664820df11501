//! Store layer - shared state holding the last fetched collections
//!
//! [`ApiStore`] wraps an [`ApiClient`] and a `watch` channel. Each operation
//! calls one accessor and replaces one state field when the response arrives.
//! Overlapping calls are not serialized, so whichever response lands last
//! wins. [`StoreActor`] drives the same operations from a command channel.

pub mod actor;
pub mod state;

pub use actor::StoreActor;
pub use state::StoreState;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::error::ApiError;
use crate::models::{Post, User};
use crate::network::ApiClient;

/// Shared reactive container; clones observe and mutate the same state
#[derive(Clone, Debug)]
pub struct ApiStore {
    client: ApiClient,
    state: Arc<watch::Sender<StoreState>>,
}

impl ApiStore {
    pub fn new(client: ApiClient) -> Self {
        let (state, _) = watch::channel(StoreState::new());
        ApiStore {
            client,
            state: Arc::new(state),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Receiver notified on every state replacement
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> StoreState {
        self.state.borrow().clone()
    }

    pub fn users(&self) -> Option<Vec<User>> {
        self.state.borrow().users.clone()
    }

    pub fn posts(&self) -> Option<Vec<Post>> {
        self.state.borrow().posts.clone()
    }

    pub fn searched_posts(&self) -> Vec<Post> {
        self.state.borrow().searched_posts.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Refetch `/users` and replace the stored collection
    pub async fn fetch_users(&self) -> Result<(), ApiError> {
        let users = self.client.fetch_users().await?;
        info!(count = users.len(), "Replacing users");
        self.state.send_modify(|state| state.users = Some(users));
        Ok(())
    }

    /// Refetch `/posts` and replace the stored collection
    pub async fn fetch_posts(&self) -> Result<(), ApiError> {
        let posts = self.client.fetch_posts().await?;
        info!(count = posts.len(), "Replacing posts");
        self.state.send_modify(|state| state.posts = Some(posts));
        Ok(())
    }

    /// Run a title search and replace the search results
    ///
    /// A blank query clears the results without a request.
    pub async fn search_posts(&self, query: &str) -> Result<(), ApiError> {
        let posts = self.client.search_posts(query).await?;
        info!(count = posts.len(), "Replacing searched posts");
        self.state.send_modify(|state| state.searched_posts = posts);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_for(server: &MockServer) -> ApiStore {
        ApiStore::new(ApiClient::new(server.uri(), "placeholder-store-test/0.1"))
    }

    fn posts_body(titles: &[&str]) -> serde_json::Value {
        let posts: Vec<serde_json::Value> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| json!({ "userId": 1, "id": i + 1, "title": title, "body": "b" }))
            .collect();
        serde_json::Value::Array(posts)
    }

    #[tokio::test]
    async fn test_fetch_users_stores_decoded_body() {
        let server = MockServer::start().await;
        let body = json!([{
            "id": 3,
            "name": "Clementine Bauch",
            "username": "Samantha",
            "email": "Nathan@yesenia.net",
            "address": { "street": "Douglas Extension", "suite": "Suite 847", "city": "McKenziehaven" },
            "phone": "1-463-123-4447",
            "website": "ramiro.info",
            "company": { "name": "Romaguera-Jacobson" }
        }]);

        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let store = store_for(&server);
        assert!(store.users().is_none());
        assert!(!store.is_loading());

        store.fetch_users().await.unwrap();

        let expected: Vec<User> = serde_json::from_value(body).unwrap();
        assert_eq!(store.users(), Some(expected));
    }

    #[tokio::test]
    async fn test_fetch_posts_twice_keeps_second_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(posts_body(&["first", "older"])))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(posts_body(&["second"])))
            .mount(&server)
            .await;

        let store = store_for(&server);
        store.fetch_posts().await.unwrap();
        assert_eq!(store.posts().unwrap().len(), 2);

        store.fetch_posts().await.unwrap();
        let posts = store.posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "second");
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_state() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(posts_body(&["kept"])))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let store = store_for(&server);
        store.fetch_posts().await.unwrap();

        let err = store.fetch_posts().await.unwrap_err();
        assert!(err.is_decode());
        assert_eq!(store.posts().unwrap()[0].title, "kept");
    }

    #[tokio::test]
    async fn test_blank_search_clears_results_without_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/posts"))
            .and(query_param("title_like", "qui"))
            .respond_with(ResponseTemplate::new(200).set_body_json(posts_body(&["qui est"])))
            .expect(1)
            .mount(&server)
            .await;

        let store = store_for(&server);
        store.search_posts("qui").await.unwrap();
        assert_eq!(store.searched_posts().len(), 1);

        store.search_posts("   ").await.unwrap();
        assert!(store.searched_posts().is_empty());
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_subscriber_sees_replacement() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(posts_body(&["seen"])))
            .mount(&server)
            .await;

        let store = store_for(&server);
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.clone().fetch_posts().await.unwrap();

        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update().clone();
        assert_eq!(state.posts.unwrap()[0].title, "seen");
        assert!(!state.loading);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_overlapping_searches_last_write_wins() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/posts"))
            .and(query_param("title_like", "slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(posts_body(&["slow"]))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .and(query_param("title_like", "fast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(posts_body(&["fast"])))
            .mount(&server)
            .await;

        let store = store_for(&server);
        let (slow, fast) = tokio::join!(store.search_posts("slow"), store.search_posts("fast"));
        slow.unwrap();
        fast.unwrap();

        // The earlier request resolved last and overwrote the newer result
        assert_eq!(store.searched_posts()[0].title, "slow");
    }
}
