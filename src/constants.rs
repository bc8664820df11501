//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Remote host serving `/users` and `/posts`
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// User-Agent header sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("placeholder-store/", env!("CARGO_PKG_VERSION"));

/// Directory under the home directory holding `config.yaml`
pub const CONFIG_DIR_NAME: &str = ".placeholder-store";

pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Log file written by the binary, relative to the working directory
pub const LOG_FILE_NAME: &str = "placeholder-store.log";

/// Query parameter the server uses for substring title matching
pub const TITLE_FILTER_PARAM: &str = "title_like";
