//! Session manager: the handle-to-username table

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::{Error, Result};

/// An active login session
#[derive(Debug, Clone)]
pub struct Session {
    /// Bound username
    pub username: String,
    /// Session creation time
    pub created_at: DateTime<Utc>,
    /// Last login or resolve under this handle
    pub refreshed_at: DateTime<Utc>,
}

/// Binds opaque session handles to claimed usernames
///
/// A handle maps to exactly one username for its lifetime. Sessions expire
/// after `ttl_secs` of inactivity (0 = never); expired entries are dropped
/// when observed, since this core runs no background tasks.
#[derive(Debug)]
pub struct SessionManager {
    ttl_secs: u64,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl_secs,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Establish a session for the claimed username.
    ///
    /// The username is trimmed and must be non-empty; no credential is
    /// checked. A second login under the same username refreshes the
    /// existing session and returns its handle.
    pub fn login(&self, username: &str) -> Result<String> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::InvalidIdentity(
                "username must not be empty".to_string(),
            ));
        }

        let now = Utc::now();
        let mut sessions = self.sessions.write();
        sessions.retain(|_, s| !self.is_expired(s, now));

        let existing = sessions
            .iter()
            .find(|(_, s)| s.username == username)
            .map(|(handle, _)| handle.clone());
        if let Some(handle) = existing {
            if let Some(session) = sessions.get_mut(&handle) {
                session.refreshed_at = now;
            }
            return Ok(handle);
        }

        let handle = Uuid::new_v4().to_string();
        debug!("Created session for {}", username);
        sessions.insert(
            handle.clone(),
            Session {
                username: username.to_string(),
                created_at: now,
                refreshed_at: now,
            },
        );
        Ok(handle)
    }

    /// Resolve a handle back to its username.
    ///
    /// Fails with `NoActiveSession` if the handle is missing, unknown, or
    /// expired. Resolution counts as activity for the idle timeout.
    pub fn resolve(&self, handle: &str) -> Result<String> {
        let now = Utc::now();
        let mut sessions = self.sessions.write();

        match sessions.get_mut(handle) {
            Some(session) if self.is_expired(session, now) => {
                sessions.remove(handle);
                Err(Error::NoActiveSession)
            }
            Some(session) => {
                session.refreshed_at = now;
                Ok(session.username.clone())
            }
            None => Err(Error::NoActiveSession),
        }
    }

    /// Invalidate a handle. Unknown or already-invalid handles are not an
    /// error.
    pub fn logout(&self, handle: &str) {
        self.sessions.write().remove(handle);
    }

    fn is_expired(&self, session: &Session, now: DateTime<Utc>) -> bool {
        if self.ttl_secs == 0 {
            return false;
        }
        now - session.refreshed_at > Duration::seconds(self.ttl_secs as i64)
    }

    #[cfg(test)]
    fn backdate(&self, handle: &str, secs: i64) {
        if let Some(session) = self.sessions.write().get_mut(handle) {
            session.refreshed_at = session.refreshed_at - Duration::seconds(secs);
        }
    }
}
