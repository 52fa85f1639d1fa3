//! # Session persistence
//!
//! A [`Session`] is the authenticated client's bearer token plus the user
//! profile it belongs to. It is written as one JSON record into a single slot
//! of a [`KeyValueStore`], so it survives restarts and is replaced atomically.
//!
//! Components that need the session receive a [`SessionProvider`] instead of
//! reaching for a global store. [`SessionStore`] is the persistent
//! implementation; tests can hand in a `SessionStore<MemoryStore>`.
//!
//! Reading never fails: a missing slot, a record that does not parse, or a
//! record carrying an empty token all read back as "no session". Token expiry
//! is not tracked here; the service rejects stale tokens.

use serde::{Deserialize, Serialize};

use crate::kv::KeyValueStore;
use crate::models::User;

/// Slot name used when no other key is configured.
pub const DEFAULT_SESSION_KEY: &str = "session";

/// Bearer token and the user it was issued to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    /// Value of the `Authorization` header for this session.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Capability to read and replace the current session.
pub trait SessionProvider {
    fn get_session(&self) -> Option<Session>;
    fn set_session(&self, token: &str, user: &User);
    fn clear_session(&self);

    fn is_authenticated(&self) -> bool {
        self.get_session().is_some()
    }
}

impl<T: SessionProvider + ?Sized> SessionProvider for &T {
    fn get_session(&self) -> Option<Session> {
        (**self).get_session()
    }

    fn set_session(&self, token: &str, user: &User) {
        (**self).set_session(token, user)
    }

    fn clear_session(&self) {
        (**self).clear_session()
    }
}

/// [`SessionProvider`] persisting into one slot of a [`KeyValueStore`].
#[derive(Clone, Debug)]
pub struct SessionStore<K> {
    store: K,
    key: String,
}

impl<K: KeyValueStore> SessionStore<K> {
    pub fn new(store: K) -> Self {
        Self::with_key(store, DEFAULT_SESSION_KEY)
    }

    pub fn with_key(store: K, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }
}

impl<K: KeyValueStore> SessionProvider for SessionStore<K> {
    fn get_session(&self) -> Option<Session> {
        let raw = self.store.get_item(&self.key)?;
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) if !session.token.is_empty() => Some(session),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Ignoring unreadable session record: {}", e);
                None
            }
        }
    }

    fn set_session(&self, token: &str, user: &User) {
        let session = Session {
            token: token.to_string(),
            user: user.clone(),
        };
        match serde_json::to_string(&session) {
            Ok(json) => self.store.set_item(&self.key, &json),
            Err(e) => tracing::error!("Failed to serialize session: {}", e),
        }
    }

    fn clear_session(&self) {
        self.store.remove_item(&self.key);
    }
}
