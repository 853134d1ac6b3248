//! Session context: the one place the bearer token and role live.
//!
//! Every component reads the session through [`SessionContext`] and every change
//! goes through its three update paths (`sign_in`, `sign_out`, `expire`).
//! Subscribers are notified through a `watch` channel, which is how the booking
//! poller learns that it should stop.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::{error::ClientError, models::usermodel::UserRole};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: String,
}

impl Session {
    pub fn new(token: impl Into<String>, role: impl Into<String>) -> Self {
        Session {
            token: token.into(),
            role: role.into(),
        }
    }

    pub fn user_role(&self) -> Option<UserRole> {
        self.role.parse().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChange {
    SignedIn,
    SignedOut,
    /// Wiped because the server rejected the token.
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub session: Option<Session>,
    pub last_change: Option<SessionChange>,
}

/// Persistence for the token/role pair.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>, ClientError>;
    fn save(&self, session: &Session) -> Result<(), ClientError>;
    fn clear(&self) -> Result<(), ClientError>;
}

/// JSON file on disk, the command-line stand-in for browser local storage.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSessionStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, ClientError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ClientError::Session(e.to_string())),
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) if !session.token.is_empty() => Ok(Some(session)),
            Ok(_) => Ok(None),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ClientError::Session(e.to_string()))?;
        }
        let raw = serde_json::to_string_pretty(session)
            .map_err(|e| ClientError::Session(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| ClientError::Session(e.to_string()))
    }

    fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Session(e.to_string())),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn with_session(session: Session) -> Self {
        MemorySessionStore {
            inner: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, ClientError> {
        let guard = self
            .inner
            .lock()
            .map_err(|_| ClientError::Session("session lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, session: &Session) -> Result<(), ClientError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| ClientError::Session("session lock poisoned".to_string()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| ClientError::Session("session lock poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}

pub struct SessionContext {
    store: Box<dyn SessionStore>,
    state: watch::Sender<SessionState>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("signed_in", &self.is_active())
            .field("role", &self.current().map(|s| s.role))
            .finish()
    }
}

impl SessionContext {
    pub fn new(store: impl SessionStore + 'static) -> Result<Arc<Self>, ClientError> {
        let session = store.load()?;
        let (state, _) = watch::channel(SessionState {
            session,
            last_change: None,
        });
        Ok(Arc::new(SessionContext {
            store: Box::new(store),
            state,
        }))
    }

    /// A context with nothing persisted, signed out.
    pub fn ephemeral() -> Arc<Self> {
        let (state, _) = watch::channel(SessionState::default());
        Arc::new(SessionContext {
            store: Box::new(MemorySessionStore::default()),
            state,
        })
    }

    pub fn current(&self) -> Option<Session> {
        self.state.borrow().session.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|s| s.token).filter(|t| !t.is_empty())
    }

    pub fn role(&self) -> Option<String> {
        self.current().map(|s| s.role)
    }

    pub fn user_role(&self) -> Option<UserRole> {
        self.current().and_then(|s| s.user_role())
    }

    pub fn is_active(&self) -> bool {
        self.token().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn sign_in(&self, token: impl Into<String>, role: impl Into<String>) -> Result<(), ClientError> {
        let session = Session::new(token, role);
        self.store.save(&session)?;
        tracing::info!("Signed in as {}", session.role);
        self.state.send_replace(SessionState {
            session: Some(session),
            last_change: Some(SessionChange::SignedIn),
        });
        Ok(())
    }

    pub fn sign_out(&self) -> Result<(), ClientError> {
        self.wipe(SessionChange::SignedOut)
    }

    /// Called when the server answers 401. Token and role go together.
    pub fn expire(&self) {
        if let Err(e) = self.wipe(SessionChange::Expired) {
            tracing::error!("Failed to clear expired session: {}", e);
        }
    }

    fn wipe(&self, change: SessionChange) -> Result<(), ClientError> {
        // In-memory state is cleared even when the store fails.
        self.state.send_replace(SessionState {
            session: None,
            last_change: Some(change),
        });
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let store = FileSessionStore::new(&path);

        assert_eq!(store.load().unwrap(), None);
        store.save(&Session::new("tok", "client")).unwrap();
        assert_eq!(store.load().unwrap(), Some(Session::new("tok", "client")));

        store.clear().unwrap();
        assert!(!path.exists());
        store.clear().unwrap();
    }

    #[test]
    fn garbage_file_reads_as_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(FileSessionStore::new(&path).load().unwrap(), None);
    }

    #[tokio::test]
    async fn subscribers_see_every_change() {
        let ctx = SessionContext::new(MemorySessionStore::default()).unwrap();
        let mut rx = ctx.subscribe();
        assert!(!ctx.is_active());

        ctx.sign_in("tok", "pro").unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().last_change, Some(SessionChange::SignedIn));
        assert_eq!(ctx.user_role(), Some(UserRole::Pro));

        ctx.expire();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().last_change, Some(SessionChange::Expired));
        assert_eq!(ctx.token(), None);
        assert_eq!(ctx.role(), None);
    }

    #[test]
    fn expire_wipes_the_store() {
        let ctx = SessionContext::new(MemorySessionStore::with_session(Session::new("t", "admin"))).unwrap();
        assert!(ctx.is_active());
        ctx.expire();
        assert_eq!(ctx.store.load().unwrap(), None);
    }
}
