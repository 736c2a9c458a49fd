//! Process-wide realm.
//!
//! Initialized empty on first use and never torn down. All access goes
//! through one mutex, so `get_or_create` is atomic per key across threads.

use std::sync::{LazyLock, Mutex, PoisonError};

use crate::identifier::Identifier;
use crate::realm::Realm;

static GLOBAL: LazyLock<Mutex<Realm>> = LazyLock::new(|| Mutex::new(Realm::new()));

/// Run `f` with exclusive access to the process-wide realm.
pub fn with_global<R>(f: impl FnOnce(&mut Realm) -> R) -> R {
    let mut realm = GLOBAL.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut realm)
}

/// `get_or_create` against the process-wide registry.
pub fn get_or_create(key: &str) -> Identifier {
    with_global(|realm| realm.get_or_create(key))
}

/// `key_for` against the process-wide registry.
pub fn key_for(id: Identifier) -> Option<String> {
    with_global(|realm| realm.key_for(id).map(str::to_owned))
}
