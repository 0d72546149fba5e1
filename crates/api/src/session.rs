// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The signed-in session and where it is kept.
//!
//! A [`Session`] is populated by a successful login and cleared by logout or
//! by any 401 answer from the backend. It is passed around explicitly through
//! a [`SessionHandle`]; nothing reads it from ambient global state.

use crate::error::ApiError;
use condo_audit::NoteAuthor;
use condo_core::Actor;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Session roles as granted by the identity backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Full administrative access to the building.
    Admin,
    /// Elevated access scoped to one building. Equivalent to `Admin` for bookings.
    BuildingManager,
    /// Any other account.
    Resident,
}

impl Role {
    /// Returns the wire representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::BuildingManager => "BUILDING MANAGER",
            Self::Resident => "RESIDENT",
        }
    }

    /// Maps a backend role name. Unknown names are treated as residents.
    #[must_use]
    pub fn parse_str(s: &str) -> Self {
        match s.trim() {
            "ADMIN" => Self::Admin,
            "BUILDING MANAGER" => Self::BuildingManager,
            _ => Self::Resident,
        }
    }

    /// Returns true for administrators and building managers.
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        matches!(self, Self::Admin | Self::BuildingManager)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated user and their bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub building_id: Option<String>,
    pub unit_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub building_name: Option<String>,
    pub roles: Vec<String>,
}

impl Session {
    fn has_role(&self, role: Role) -> bool {
        self.roles.iter().any(|r| Role::parse_str(r) == role)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    #[must_use]
    pub fn is_building_manager(&self) -> bool {
        self.has_role(Role::BuildingManager)
    }

    /// Admins and building managers.
    #[must_use]
    pub fn is_staff(&self) -> bool {
        self.is_admin() || self.is_building_manager()
    }

    /// The most privileged role held.
    #[must_use]
    pub fn primary_role(&self) -> Role {
        if self.is_admin() {
            Role::Admin
        } else if self.is_building_manager() {
            Role::BuildingManager
        } else {
            Role::Resident
        }
    }

    /// `First Last`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The identity commands are applied for.
    #[must_use]
    pub fn to_actor(&self) -> Actor {
        Actor::new(
            self.user_id.clone(),
            self.building_id.clone(),
            self.unit_id.clone(),
            NoteAuthor::new(self.first_name.clone(), self.last_name.clone()),
            self.is_staff(),
        )
    }
}

/// Durable storage for the current session.
pub trait SessionStore: Send + Sync {
    /// Loads the stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` if the store exists but cannot be read.
    fn load(&self) -> Result<Option<Session>, ApiError>;

    /// Replaces the stored session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` if the session cannot be written.
    fn save(&self, session: &Session) -> Result<(), ApiError>;

    /// Removes the stored session. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` if the session cannot be removed.
    fn clear(&self) -> Result<(), ApiError>;
}

/// Keeps the session as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn storage_error(&self, err: impl std::fmt::Display) -> ApiError {
        ApiError::Storage {
            message: format!("{}: {err}", self.path.display()),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, ApiError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| self.storage_error(e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.storage_error(e)),
        }
    }

    fn save(&self, session: &Session) -> Result<(), ApiError> {
        let text: String =
            serde_json::to_string_pretty(session).map_err(|e| self.storage_error(e))?;
        std::fs::write(&self.path, text).map_err(|e| self.storage_error(e))
    }

    fn clear(&self) -> Result<(), ApiError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.storage_error(e)),
        }
    }
}

/// Keeps the session in memory only.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, ApiError> {
        Ok(self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, session: &Session) -> Result<(), ApiError> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ApiError> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Shared access to the current session and its store.
///
/// Clones share the same session; clearing through one clears it for all.
#[derive(Clone)]
pub struct SessionHandle {
    current: Arc<RwLock<Option<Session>>>,
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("signed_in", &self.current().is_some())
            .finish_non_exhaustive()
    }
}

impl SessionHandle {
    /// Creates a handle, restoring any session already in `store`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` if the store cannot be read.
    pub fn restore(store: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let session: Option<Session> = store.load()?;
        if let Some(s) = &session {
            debug!(user_id = %s.user_id, "Restored stored session");
        }
        Ok(Self {
            current: Arc::new(RwLock::new(session)),
            store,
        })
    }

    /// A handle with no session over an in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            store: Arc::new(MemorySessionStore::new()),
        }
    }

    /// A snapshot of the current session.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The current session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotAuthenticated` if nobody is signed in.
    pub fn require(&self) -> Result<Session, ApiError> {
        self.current().ok_or(ApiError::NotAuthenticated)
    }

    /// The bearer token, if signed in.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| s.token.clone())
    }

    /// Installs a new session and persists it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` if the session cannot be persisted. The
    /// in-memory session is still installed.
    pub fn set(&self, session: Session) -> Result<(), ApiError> {
        let result: Result<(), ApiError> = self.store.save(&session);
        info!(user_id = %session.user_id, role = %session.primary_role(), "Session started");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        result
    }

    /// Drops the session from memory and from the store.
    pub fn clear(&self) {
        let previous: Option<Session> = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear stored session");
        }
        if let Some(session) = previous {
            info!(user_id = %session.user_id, "Session cleared");
        }
    }
}
