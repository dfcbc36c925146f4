//! Clarke Marketplace Client Library
//!
//! A Rust client for the Clarke energy-marketplace GraphQL API: account
//! registration and login, the supplier catalogue with filtering and star
//! ratings, and contract lifecycle management. All business logic lives in
//! the remote API; this crate provides the typed operations, the persisted
//! session, and the two dashboard workflows.

pub mod auth;
pub mod config;
pub mod contracts;
pub mod dashboard;
pub mod error;
pub mod graphql;
pub mod operations;
pub mod router;
pub mod suppliers;
pub mod validation;

use std::sync::{Arc, Mutex};

use reqwest::Client;

use crate::auth::{AuthClient, Session, SessionStore};
use crate::config::ClientOptions;
use crate::contracts::ContractsClient;
use crate::dashboard::{SupplierDashboard, UserDashboard};
use crate::error::Error;
use crate::suppliers::SuppliersClient;

/// The main entry point for the Clarke marketplace client
pub struct Clarke {
    /// The GraphQL endpoint URL
    pub url: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
    /// Auth client for account management and sessions
    auth: AuthClient,
    /// The current session, shared with every sub-client
    session: Arc<Mutex<Option<Session>>>,
}

impl Clarke {
    /// Create a new client against a GraphQL endpoint
    ///
    /// # Example
    ///
    /// ```
    /// use clarke_client::Clarke;
    ///
    /// let clarke = Clarke::new("https://api.example.com/graphql");
    /// ```
    pub fn new(url: &str) -> Self {
        Self::new_with_options(url, ClientOptions::default())
    }

    /// Create a new client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use clarke_client::{Clarke, config::ClientOptions};
    ///
    /// let options = ClientOptions::default().with_session_path("/tmp/clarke-session.json");
    /// let clarke = Clarke::new_with_options("https://api.example.com/graphql", options);
    /// ```
    pub fn new_with_options(url: &str, options: ClientOptions) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().unwrap_or_else(|_| Client::new());

        let store = match &options.session_path {
            Some(path) => SessionStore::new(path),
            None => SessionStore::ephemeral(),
        };

        let session = Arc::new(Mutex::new(None));
        let auth = AuthClient::new(url, http_client.clone(), session.clone(), store, options.clone());

        Self {
            url: url.to_string(),
            http_client,
            options,
            auth,
            session,
        }
    }

    /// Get a reference to the auth client for login, registration, and sessions
    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// Create a client for the supplier catalogue and reviews
    pub fn suppliers(&self) -> SuppliersClient {
        SuppliersClient::new(&self.url, self.http_client.clone(), self.session.clone())
    }

    /// Create a client for contract queries and mutations
    pub fn contracts(&self) -> ContractsClient {
        ContractsClient::new(&self.url, self.http_client.clone(), self.session.clone())
    }

    /// Build the consumer dashboard for a user session
    pub fn user_dashboard(&self, session: Session) -> Result<UserDashboard, Error> {
        UserDashboard::new(self, session)
    }

    /// Build the supplier dashboard for a supplier session
    pub fn supplier_dashboard(&self, session: Session) -> Result<SupplierDashboard, Error> {
        SupplierDashboard::new(self, session)
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::{Role, Session, SessionStore};
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::router::Route;
    pub use crate::Clarke;
}
