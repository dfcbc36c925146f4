//! Configuration options for the Clarke client

use std::path::PathBuf;
use std::time::Duration;

/// Default number of rows per catalogue or contract page
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Configuration options for the Clarke client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Where the session record is persisted; `None` keeps the session in memory only
    pub session_path: Option<PathBuf>,

    /// Rows per page for supplier and contract listings
    pub page_size: u32,

    /// Minimum accepted password length during registration
    pub min_password_len: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            session_path: None,
            page_size: DEFAULT_PAGE_SIZE,
            min_password_len: 6,
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the path of the persisted session record
    pub fn with_session_path(mut self, value: impl Into<PathBuf>) -> Self {
        self.session_path = Some(value.into());
        self
    }

    /// Set the rows-per-page used for listings
    pub fn with_page_size(mut self, value: u32) -> Self {
        self.page_size = value;
        self
    }

    /// Set the minimum accepted password length
    pub fn with_min_password_len(mut self, value: usize) -> Self {
        self.min_password_len = value;
        self
    }
}
