//! Durable client storage as an injected capability.
//!
//! The session store persists its credential and identity through this
//! seam rather than reaching for `localStorage` directly. In the browser
//! (`hydrate`) the Web Storage API backs it; everywhere else the
//! `Unavailable` implementation turns every access into a no-op, so
//! server rendering and native tests never touch browser state.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

/// Read/write/delete access to a string key-value space.
///
/// Implementations are expected to be best-effort: a failed write is
/// silently dropped, matching Web Storage behavior when quota is hit.
pub trait StorageAccess {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Storage backed by the browser's `localStorage`. Requires a window.
#[cfg(feature = "hydrate")]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
impl StorageAccess for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(key);
        }
    }
}

/// No-op storage for execution contexts without a browser.
pub struct Unavailable;

impl StorageAccess for Unavailable {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) {}

    fn remove(&self, _key: &str) {}
}

/// Pick the storage implementation for the current execution context.
#[must_use]
pub fn platform_storage() -> Box<dyn StorageAccess> {
    #[cfg(feature = "hydrate")]
    {
        if web_sys::window().is_some() {
            return Box::new(BrowserStorage);
        }
        Box::new(Unavailable)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Box::new(Unavailable)
    }
}

/// In-memory storage for unit tests. Clones share the same map so a test
/// can keep a handle for inspection after handing one to a store.
#[cfg(test)]
#[derive(Clone)]
pub struct MemoryStorage {
    entries: std::rc::Rc<std::cell::RefCell<std::collections::HashMap<String, String>>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self { entries: std::rc::Rc::new(std::cell::RefCell::new(std::collections::HashMap::new())) }
    }
}

#[cfg(test)]
impl StorageAccess for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
