use super::*;
use crate::net::types::Role;
use crate::util::storage::{MemoryStorage, Unavailable};

fn identity(name: &str) -> Identity {
    Identity {
        id: 1,
        name: name.to_owned(),
        email: "a@b.com".to_owned(),
        role: Role::Member,
        is_active: true,
        created_at: None,
        updated_at: None,
    }
}

fn handle_with_memory() -> (SessionHandle, MemoryStorage) {
    let storage = MemoryStorage::new();
    (SessionHandle::new(Box::new(storage.clone())), storage)
}

// =============================================================
// Phases
// =============================================================

#[test]
fn fresh_session_is_initializing() {
    let (session, _storage) = handle_with_memory();
    assert_eq!(session.state().phase(), SessionPhase::Initializing);
    assert!(!session.is_authenticated());
}

#[test]
fn restore_on_empty_storage_ends_anonymous() {
    let (session, _storage) = handle_with_memory();
    session.restore();
    assert_eq!(session.state().phase(), SessionPhase::Anonymous);
}

#[test]
fn restore_without_storage_still_ends_loading() {
    let session = SessionHandle::new(Box::new(Unavailable));
    session.restore();
    let state = session.state();
    assert!(!state.loading);
    assert!(!state.is_authenticated());
}

// =============================================================
// Restore
// =============================================================

#[test]
fn restore_adopts_valid_pair() {
    let (session, storage) = handle_with_memory();
    let stored = identity("A");
    storage.set(TOKEN_KEY, "T1");
    storage.set(IDENTITY_KEY, &serde_json::to_string(&stored).expect("json"));

    session.restore();

    assert!(session.is_authenticated());
    assert_eq!(session.identity().expect("identity"), stored);
    assert_eq!(session.token().as_deref(), Some("T1"));
}

#[test]
fn restore_purges_malformed_identity() {
    let (session, storage) = handle_with_memory();
    storage.set(TOKEN_KEY, "T1");
    storage.set(IDENTITY_KEY, "{not json");

    session.restore();

    assert!(!session.is_authenticated());
    assert!(storage.get(TOKEN_KEY).is_none());
    assert!(storage.get(IDENTITY_KEY).is_none());
}

#[test]
fn restore_purges_half_a_pair() {
    let (session, storage) = handle_with_memory();
    storage.set(TOKEN_KEY, "T1");

    session.restore();

    assert!(!session.is_authenticated());
    assert!(storage.get(TOKEN_KEY).is_none());
}

#[test]
fn restore_treats_empty_token_as_missing() {
    let (session, storage) = handle_with_memory();
    storage.set(TOKEN_KEY, "");
    storage.set(IDENTITY_KEY, &serde_json::to_string(&identity("A")).expect("json"));

    session.restore();

    assert!(!session.is_authenticated());
    assert!(storage.get(IDENTITY_KEY).is_none());
}

// =============================================================
// Login
// =============================================================

#[test]
fn login_persists_both_keys_and_authenticates() {
    let (session, storage) = handle_with_memory();
    session.restore();

    session.login(identity("A"), "T1").expect("login");

    assert!(session.is_authenticated());
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("T1"));
    let stored: Identity =
        serde_json::from_str(&storage.get(IDENTITY_KEY).expect("stored")).expect("json");
    assert_eq!(stored.name, "A");
}

#[test]
fn login_rejects_empty_token_without_writes() {
    let (session, storage) = handle_with_memory();
    session.restore();

    let result = session.login(identity("A"), "  ");

    assert!(matches!(result, Err(SessionError::InvalidCredentialInput)));
    assert!(!session.is_authenticated());
    assert!(storage.get(TOKEN_KEY).is_none());
    assert!(storage.get(IDENTITY_KEY).is_none());
}

#[test]
fn login_while_authenticated_overwrites() {
    let (session, storage) = handle_with_memory();
    session.restore();
    session.login(identity("A"), "T1").expect("first login");

    session.login(identity("B"), "T2").expect("second login");

    assert_eq!(session.identity().expect("identity").name, "B");
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("T2"));
}

// =============================================================
// Logout
// =============================================================

#[test]
fn logout_clears_state_and_storage() {
    let (session, storage) = handle_with_memory();
    session.restore();
    session.login(identity("A"), "T1").expect("login");

    session.logout();

    assert!(!session.is_authenticated());
    assert!(session.token().is_none());
    assert!(storage.get(TOKEN_KEY).is_none());
    assert!(storage.get(IDENTITY_KEY).is_none());
}

#[test]
fn logout_is_idempotent() {
    let (session, _storage) = handle_with_memory();
    session.restore();
    session.logout();
    let first = session.state();
    session.logout();
    assert_eq!(session.state(), first);
}

// =============================================================
// Subscribers
// =============================================================

#[test]
fn subscribers_see_storage_consistent_with_state() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let storage = MemoryStorage::new();
    let session = SessionHandle::new(Box::new(storage.clone()));
    let observed: Rc<RefCell<Vec<(bool, Option<String>)>>> = Rc::new(RefCell::new(Vec::new()));

    let probe = storage.clone();
    let log = Rc::clone(&observed);
    session.subscribe(move |state| {
        log.borrow_mut().push((state.is_authenticated(), probe.get(TOKEN_KEY)));
    });

    session.restore();
    session.login(identity("A"), "T1").expect("login");
    session.logout();

    let observed = observed.borrow();
    assert_eq!(observed.len(), 3);
    // Restore of empty storage, then login, then logout.
    assert_eq!(observed[0], (false, None));
    assert_eq!(observed[1], (true, Some("T1".to_owned())));
    assert_eq!(observed[2], (false, None));
}

#[test]
fn logout_when_anonymous_does_not_notify() {
    use std::cell::Cell;
    use std::rc::Rc;

    let (session, _storage) = handle_with_memory();
    session.restore();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    session.subscribe(move |_| counter.set(counter.get() + 1));

    session.logout();
    session.logout();

    assert_eq!(calls.get(), 0);
}
