//! HTTP client wrapper - one GET per accessor, body decoded as JSON
//!
//! Status codes are not inspected. Whatever the server sends back is handed
//! to the JSON decoder, so an error page surfaces as [`ApiError::Decode`].

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::constants::TITLE_FILTER_PARAM;
use crate::error::ApiError;
use crate::models::{Post, User};

/// Characters left unescaped in a URI component
const COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Strip whitespace plus the byte-order mark, which `str::trim` keeps
fn trim_query(query: &str) -> &str {
    query.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Build the title search URL, or `None` when the trimmed query is empty
pub fn search_url(base_url: &str, query: &str) -> Option<String> {
    let trimmed = trim_query(query);
    if trimmed.is_empty() {
        return None;
    }

    Some(format!(
        "{}/posts?{}={}",
        base_url.trim_end_matches('/'),
        TITLE_FILTER_PARAM,
        utf8_percent_encode(trimmed, COMPONENT_SET)
    ))
}

/// Accessors for the remote `/users` and `/posts` resources
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Self {
        let base_url = base_url.into();
        ApiClient {
            client: create_client(user_agent),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.base_url.clone(), &config.user_agent)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `/users`
    pub async fn fetch_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json(format!("{}/users", self.base_url)).await
    }

    /// GET `/users/{id}`
    pub async fn fetch_user(&self, user_id: u64) -> Result<User, ApiError> {
        self.get_json(format!("{}/users/{}", self.base_url, user_id)).await
    }

    /// GET `/posts`
    pub async fn fetch_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.get_json(format!("{}/posts", self.base_url)).await
    }

    /// GET `/posts/{id}`
    pub async fn fetch_post(&self, post_id: u64) -> Result<Post, ApiError> {
        self.get_json(format!("{}/posts/{}", self.base_url, post_id)).await
    }

    /// GET `/posts?title_like={query}`
    ///
    /// A blank query returns an empty list without touching the network.
    pub async fn search_posts(&self, query: &str) -> Result<Vec<Post>, ApiError> {
        match search_url(&self.base_url, query) {
            Some(url) => self.get_json(url).await,
            None => {
                debug!("Blank search query, skipping request");
                Ok(Vec::new())
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        info!(url = %url, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(url = %url, status, bytes = body.len(), "Response received");

        serde_json::from_str(&body).map_err(|source| {
            warn!(url = %url, status, error = %source, "Response body did not decode");
            ApiError::Decode { url, source }
        })
    }
}

/// Create an HTTP client with default configuration
pub fn create_client(user_agent: &str) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
