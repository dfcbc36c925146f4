//! Authentication and account management for the Clarke marketplace

mod session;
mod types;

use std::sync::{Arc, Mutex};

use reqwest::Client;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::graphql::GraphQlRequest;
use crate::operations;
use crate::validation::{parse_cpf, validate_registration};

pub use session::*;
pub use types::*;

/// Client for login, registration, and session handling
///
/// Login and registration overwrite the persisted session wholesale;
/// signing out clears it wholesale. The in-memory copy is shared with the
/// other sub-clients so their requests carry the bearer token.
#[derive(Clone)]
pub struct AuthClient {
    /// The GraphQL endpoint
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// The current session
    session: Arc<Mutex<Option<Session>>>,

    /// Persisted session record
    store: SessionStore,

    /// Client options
    options: ClientOptions,
}

impl AuthClient {
    pub(crate) fn new(
        url: &str,
        client: Client,
        session: Arc<Mutex<Option<Session>>>,
        store: SessionStore,
        options: ClientOptions,
    ) -> Self {
        Self {
            url: url.to_string(),
            client,
            session,
            store,
            options,
        }
    }

    fn remember(&self, session: Session) -> Result<Session, Error> {
        self.store.save(&session)?;
        let mut current = self.session.lock().unwrap();
        *current = Some(session.clone());
        Ok(session)
    }

    /// Log a user in with email and password
    pub async fn login_user(&self, email: &str, password: &str) -> Result<Session, Error> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };

        let payload: UserAuthPayload = GraphQlRequest::new(&self.client, &self.url, operations::LOGIN_USER)
            .variable("input", &credentials)?
            .execute("loginUser")
            .await
            .map_err(|e| match e {
                Error::Api(msg) => Error::auth(msg),
                other => other,
            })?;

        self.remember(Session {
            token: payload.token,
            id: payload.user.id,
            email: Some(payload.user.email),
            name: Some(payload.user.name),
            role: Role::User,
        })
    }

    /// Log a supplier in with email and password
    pub async fn login_supplier(&self, email: &str, password: &str) -> Result<Session, Error> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };

        let payload: SupplierAuthPayload =
            GraphQlRequest::new(&self.client, &self.url, operations::LOGIN_SUPPLIER)
                .variable("input", &credentials)?
                .execute("loginSupplier")
                .await
                .map_err(|e| match e {
                    Error::Api(msg) => Error::auth(msg),
                    other => other,
                })?;

        self.remember(Session {
            token: payload.token,
            id: payload.supplier.id.to_string(),
            email: payload.supplier.email.clone(),
            name: Some(payload.supplier.name),
            role: Role::Supplier,
        })
    }

    /// Register a user account
    ///
    /// Validates the form locally first; when any field fails, returns
    /// [`Error::Validation`] with the per-field report and never contacts the
    /// network. On success the partial session (token, id, role) is persisted.
    pub async fn register_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        cpf: &str,
    ) -> Result<Session, Error> {
        let report =
            validate_registration(name, email, password, Some(cpf), self.options.min_password_len);
        if !report.is_valid() {
            return Err(Error::Validation(report));
        }

        let input = CreateUserInput {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            cpf: parse_cpf(cpf),
        };

        let payload: UserAuthPayload =
            GraphQlRequest::new(&self.client, &self.url, operations::CREATE_USER)
                .variable("input", &input)?
                .execute("createUser")
                .await?;

        self.remember(Session::partial(payload.token, payload.user.id, Role::User))
    }

    /// Register a supplier account; no CPF is collected
    pub async fn register_supplier(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, Error> {
        let report =
            validate_registration(name, email, password, None, self.options.min_password_len);
        if !report.is_valid() {
            return Err(Error::Validation(report));
        }

        let input = CreateSupplierInput {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        let payload: SupplierAuthPayload =
            GraphQlRequest::new(&self.client, &self.url, operations::CREATE_SUPPLIER)
                .variable("input", &input)?
                .execute("createSupplier")
                .await?;

        self.remember(Session::partial(
            payload.token,
            payload.supplier.id.to_string(),
            Role::Supplier,
        ))
    }

    /// Update the current user's account details
    pub async fn update_user(&self, input: &UpdateUserInput) -> Result<UserAccount, Error> {
        let token = {
            let current = self.session.lock().unwrap();
            match *current {
                Some(ref session) => session.token.clone(),
                None => return Err(Error::not_authenticated("no session")),
            }
        };

        GraphQlRequest::new(&self.client, &self.url, operations::UPDATE_USER)
            .bearer_auth(&token)
            .variable("input", input)?
            .execute("updateUser")
            .await
    }

    /// Sign out: clear the in-memory session and the persisted record
    pub fn sign_out(&self) -> Result<(), Error> {
        self.store.clear()?;
        let mut current = self.session.lock().unwrap();
        *current = None;
        Ok(())
    }

    /// Get the current session
    pub fn current_session(&self) -> Option<Session> {
        let current = self.session.lock().unwrap();
        current.clone()
    }

    /// Set the session directly, persisting it as a login would
    pub fn set_session(&self, session: Session) -> Result<(), Error> {
        self.remember(session).map(|_| ())
    }

    /// Load the persisted record back into memory, e.g. on startup
    pub fn restore(&self) -> Option<Session> {
        let restored = self.store.load()?;
        let mut current = self.session.lock().unwrap();
        *current = Some(restored.clone());
        Some(restored)
    }
}
