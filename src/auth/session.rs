//! Session persistence for the authenticated principal

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The role a session was opened under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// An energy consumer
    User,
    /// An energy supplier
    Supplier,
}

impl Role {
    /// The path segment used in dashboard routes (`user` / `supplier`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Supplier => "supplier",
        }
    }
}

/// The locally persisted record identifying the authenticated principal
///
/// Registration stores a partial record (token, id, role); login fills in
/// email and name as well. No expiry is tracked client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The API bearer token
    pub token: String,

    /// The principal's id (user or supplier, depending on `role`)
    pub id: String,

    /// The principal's email, when known
    pub email: Option<String>,

    /// The principal's display name, when known
    pub name: Option<String>,

    /// Which dashboard this session belongs to
    pub role: Role,
}

impl Session {
    /// Create the partial session persisted right after registration
    pub fn partial(token: String, id: String, role: Role) -> Self {
        Self {
            token,
            id,
            email: None,
            name: None,
            role,
        }
    }
}

/// A single serialized session record on disk
///
/// Stands in for the browser's local storage: one record, overwritten
/// wholesale on login or registration, removed wholesale on logout. A store
/// built without a path keeps nothing and loads nothing.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Create a store persisting to the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Create a store that persists nothing (in-memory sessions only)
    pub fn ephemeral() -> Self {
        Self { path: None }
    }

    /// Persist a session, replacing any previous record
    pub fn save(&self, session: &Session) -> Result<(), Error> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::general(format!("cannot create session dir: {}", e)))?;
        }

        let json = serde_json::to_vec(session)?;
        fs::write(path, json)
            .map_err(|e| Error::general(format!("cannot write session record: {}", e)))?;
        Ok(())
    }

    /// Load the persisted session, if any
    ///
    /// Fails soft: a missing or malformed record yields `None` rather than
    /// an error.
    pub fn load(&self) -> Option<Session> {
        let path = self.path.as_ref()?;
        let bytes = fs::read(path).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Remove the persisted session; removing an absent record is fine
    pub fn clear(&self) -> Result<(), Error> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::general(format!("cannot clear session record: {}", e))),
        }
    }
}
