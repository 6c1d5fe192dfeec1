//! Client session state: the single source of truth for who is logged in.
//!
//! DESIGN
//! ======
//! `SessionStore` owns the authenticated identity, the bearer credential,
//! and the injected storage capability that makes the pair durable across
//! page reloads. `SessionHandle` is the cloneable handle everything else
//! holds; the client is single-threaded so `Rc<RefCell<...>>` is enough.
//!
//! Subscribers are notified after every state change, always after storage
//! has been brought in line with memory, so UI observers never see the two
//! disagree.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::net::types::Identity;
use crate::util::storage::StorageAccess;

/// Storage key holding the raw bearer credential.
pub const TOKEN_KEY: &str = "auth_token";
/// Storage key holding the JSON-serialized identity.
pub const IDENTITY_KEY: &str = "user";

/// Errors from session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// `login` was handed an empty credential.
    #[error("login requires a non-empty credential")]
    InvalidCredentialInput,
}

/// Observable session state: who is logged in, and whether the initial
/// restore from storage is still running.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub identity: Option<Identity>,
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        // A fresh session starts in the restore phase.
        Self { identity: None, loading: true }
    }
}

/// Lifecycle phase derived from `SessionState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Initializing,
    Anonymous,
    Authenticated,
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Initializing
        } else if self.identity.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        }
    }
}

type Subscriber = Rc<dyn Fn(&SessionState)>;

struct SessionStore {
    state: SessionState,
    token: Option<String>,
    storage: Box<dyn StorageAccess>,
    subscribers: Vec<Subscriber>,
}

/// Cloneable handle to the shared session store.
#[derive(Clone)]
pub struct SessionHandle(Rc<RefCell<SessionStore>>);

impl SessionHandle {
    #[must_use]
    pub fn new(storage: Box<dyn StorageAccess>) -> Self {
        Self(Rc::new(RefCell::new(SessionStore {
            state: SessionState::default(),
            token: None,
            storage,
            subscribers: Vec::new(),
        })))
    }

    /// Restore a persisted session, once at startup.
    ///
    /// Adopts the stored credential/identity pair only when both are present
    /// and the identity parses; anything less purges both keys. Always ends
    /// the loading phase, including when storage is unavailable.
    pub fn restore(&self) {
        {
            let mut store = self.0.borrow_mut();
            let token = store.storage.get(TOKEN_KEY).filter(|t| !t.is_empty());
            let raw_identity = store.storage.get(IDENTITY_KEY);
            match (token, raw_identity) {
                (Some(token), Some(raw)) => match serde_json::from_str::<Identity>(&raw) {
                    Ok(identity) => {
                        store.token = Some(token);
                        store.state.identity = Some(identity);
                    }
                    Err(err) => {
                        log::warn!("stored identity unparsable, purging session: {err}");
                        store.storage.remove(TOKEN_KEY);
                        store.storage.remove(IDENTITY_KEY);
                    }
                },
                (token, raw_identity) => {
                    // Half a pair is as invalid as garbage.
                    if token.is_some() || raw_identity.is_some() {
                        store.storage.remove(TOKEN_KEY);
                        store.storage.remove(IDENTITY_KEY);
                    }
                }
            }
            store.state.loading = false;
        }
        self.notify();
    }

    /// Adopt a freshly issued identity/credential pair.
    ///
    /// Persists both keys before updating memory, so subscribers observe
    /// storage already consistent with the state they are handed. A login
    /// while already authenticated overwrites the prior identity.
    ///
    /// # Errors
    ///
    /// `InvalidCredentialInput` when the token is empty; nothing is written.
    pub fn login(&self, identity: Identity, token: &str) -> Result<(), SessionError> {
        if token.trim().is_empty() {
            return Err(SessionError::InvalidCredentialInput);
        }
        let json =
            serde_json::to_string(&identity).map_err(|_| SessionError::InvalidCredentialInput)?;
        {
            let mut store = self.0.borrow_mut();
            store.storage.set(TOKEN_KEY, token);
            store.storage.set(IDENTITY_KEY, &json);
            store.token = Some(token.to_owned());
            store.state.identity = Some(identity);
        }
        log::info!("session established");
        self.notify();
        Ok(())
    }

    /// Clear the session from storage and memory. Idempotent.
    pub fn logout(&self) {
        let changed = {
            let mut store = self.0.borrow_mut();
            store.storage.remove(TOKEN_KEY);
            store.storage.remove(IDENTITY_KEY);
            let changed = store.state.identity.is_some() || store.token.is_some();
            store.token = None;
            store.state.identity = None;
            changed
        };
        if changed {
            log::info!("session cleared");
            self.notify();
        }
    }

    /// Snapshot of the current bearer credential, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.0.borrow().token.clone()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.0.borrow().state.clone()
    }

    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.0.borrow().state.identity.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.0.borrow().state.is_authenticated()
    }

    /// Register an observer called after every state change.
    pub fn subscribe(&self, subscriber: impl Fn(&SessionState) + 'static) {
        self.0.borrow_mut().subscribers.push(Rc::new(subscriber));
    }

    fn notify(&self) {
        // Snapshot outside the borrow: subscribers may call back in.
        let (subscribers, state) = {
            let store = self.0.borrow();
            (store.subscribers.clone(), store.state.clone())
        };
        for subscriber in &subscribers {
            subscriber(&state);
        }
    }
}
