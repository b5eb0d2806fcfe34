//! Persisted key-value store holding the signed-in user.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use shared::domain::{SessionUser, SESSION_USER_KEY};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store i/o failure at '{}': {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("malformed session entry '{key}': {source}")]
    Json {
        key: String,
        source: serde_json::Error,
    },
    #[error("session store lock poisoned")]
    Poisoned,
}

pub trait SessionStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove_item(&self, key: &str) -> Result<(), SessionError>;
}

pub fn current_session_user(
    store: &dyn SessionStore,
) -> Result<Option<SessionUser>, SessionError> {
    let Some(raw) = store.get_item(SESSION_USER_KEY)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| SessionError::Json {
            key: SESSION_USER_KEY.to_string(),
            source,
        })
}

pub fn store_session_user(store: &dyn SessionStore, user: &SessionUser) -> Result<(), SessionError> {
    let raw = serde_json::to_string(user).map_err(|source| SessionError::Json {
        key: SESSION_USER_KEY.to_string(),
        source,
    })?;
    store.set_item(SESSION_USER_KEY, &raw)
}

pub fn clear_session_user(store: &dyn SessionStore) -> Result<(), SessionError> {
    store.remove_item(SESSION_USER_KEY)
}

#[derive(Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(user: &SessionUser) -> Result<Self, SessionError> {
        let store = Self::new();
        store_session_user(&store, user)?;
        Ok(store)
    }
}

impl SessionStore for MemorySessionStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        let guard = self.entries.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(guard.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut guard = self.entries.lock().map_err(|_| SessionError::Poisoned)?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        let mut guard = self.entries.lock().map_err(|_| SessionError::Poisoned)?;
        guard.remove(key);
        Ok(())
    }
}

/// JSON object on disk, rewritten on every mutation.
pub struct FileSessionStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileSessionStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => HashMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| SessionError::Json {
                key: path.display().to_string(),
                source,
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(source) => return Err(SessionError::Io { path, source }),
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), SessionError> {
        let io_err = |source: io::Error| SessionError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let raw = serde_json::to_string_pretty(entries).map_err(|source| SessionError::Json {
            key: self.path.display().to_string(),
            source,
        })?;
        fs::write(&self.path, raw).map_err(io_err)
    }
}

impl SessionStore for FileSessionStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        let guard = self.entries.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(guard.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut guard = self.entries.lock().map_err(|_| SessionError::Poisoned)?;
        guard.insert(key.to_string(), value.to_string());
        self.persist(&guard)
    }

    fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        let mut guard = self.entries.lock().map_err(|_| SessionError::Poisoned)?;
        if guard.remove(key).is_some() {
            self.persist(&guard)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
