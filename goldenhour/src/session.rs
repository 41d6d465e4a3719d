//! Session context and persistence.
//!
//! A [`Session`] is the explicit context object handed to every polling
//! loop - there is no ambient "current emergency" global. The [`SessionStore`]
//! persists the active emergency id to a small state file so a restarted
//! process can resume polling the same emergency, the way the original
//! dashboard kept it across page reloads.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// File name for the persisted emergency id inside the state directory.
const SESSION_FILE: &str = "current_emergency_id";

/// Context for one emergency's polling loops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Identifier returned by the triage endpoint.
    pub emergency_id: String,
}

impl Session {
    /// Create a session for an emergency id.
    pub fn new(emergency_id: impl Into<String>) -> Self {
        Self {
            emergency_id: emergency_id.into(),
        }
    }
}

/// Session persistence errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Failed to read the session file
    #[error("Failed to read session file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write the session file
    #[error("Failed to write session file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// File-backed store for the active emergency id.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store rooted at the given state directory.
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        Self {
            path: state_dir.as_ref().join(SESSION_FILE),
        }
    }

    /// Load the persisted session, if any.
    ///
    /// A missing file or an empty file means no active session.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| SessionError::Read {
            path: self.path.clone(),
            source,
        })?;

        let id = contents.trim();
        if id.is_empty() {
            return Ok(None);
        }

        Ok(Some(Session::new(id)))
    }

    /// Persist a session, creating the state directory if needed.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| SessionError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        fs::write(&self.path, &session.emergency_id).map_err(|source| SessionError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!(emergency_id = %session.emergency_id, path = %self.path.display(), "Session saved");
        Ok(())
    }

    /// Remove the persisted session. Removing a session that does not exist
    /// is not an error.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Write {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_is_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        let session = Session::new("emer_rahul_sharma_45");

        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), Some(session));
    }

    #[test]
    fn test_save_creates_state_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("state"));

        store.save(&Session::new("e1")).unwrap();
        assert_eq!(store.load().unwrap(), Some(Session::new("e1")));
    }

    #[test]
    fn test_clear_removes_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        store.save(&Session::new("e1")).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);

        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_empty_file_is_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        fs::write(dir.path().join(SESSION_FILE), "  \n").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
