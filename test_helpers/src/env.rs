//! Guards for mutating environment variables in tests.
//!
//! Every mutation and every restoration happens under one global re-entrant
//! lock. Hold [`lock`] across several mutations when a test needs them to
//! appear atomically to other tests.
//!
//! # Examples
//!
//! ```
//! use scoped_config_test_helpers::env;
//!
//! let _guard = env::set_var("SCOPED_CONFIG_EXAMPLE", "prod.eu");
//! assert_eq!(std::env::var("SCOPED_CONFIG_EXAMPLE").ok().as_deref(), Some("prod.eu"));
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Restores one variable to its previous state when dropped.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _lock = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: environment writes are serialised by `ENV_MUTEX`.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: as above.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

/// Holds the environment lock until dropped.
#[must_use = "dropping releases the environment lock"]
pub struct EnvLock {
    _guard: ReentrantMutexGuard<'static, ()>,
}

impl fmt::Debug for EnvLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EnvLock")
    }
}

/// Acquire the environment lock.
pub fn lock() -> EnvLock {
    EnvLock {
        _guard: ENV_MUTEX.lock(),
    }
}

fn mutate(key: String, apply: impl FnOnce(&str)) -> EnvVarGuard {
    let _lock = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    apply(&key);
    EnvVarGuard { key, original }
}

/// Set `key` to `value` until the guard drops.
pub fn set_var(key: impl Into<String>, value: impl AsRef<OsStr>) -> EnvVarGuard {
    // SAFETY: `mutate` holds `ENV_MUTEX` while applying the change.
    mutate(key.into(), |k| unsafe { env::set_var(k, value.as_ref()) })
}

/// Unset `key` until the guard drops.
pub fn remove_var(key: impl Into<String>) -> EnvVarGuard {
    // SAFETY: `mutate` holds `ENV_MUTEX` while applying the change.
    mutate(key.into(), |k| unsafe { env::remove_var(k) })
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "SCOPED_CONFIG_TEST_HELPERS_ENV";

    #[test]
    fn restores_absent_variable() {
        let _lock = lock();
        let _cleared = remove_var(KEY);
        {
            let _guard = set_var(KEY, "one");
            assert_eq!(env::var(KEY).ok().as_deref(), Some("one"));
        }
        assert!(env::var_os(KEY).is_none());
    }

    #[test]
    fn nested_guards_restore_in_reverse_order() {
        let _lock = lock();
        let outer = set_var(KEY, "outer");
        let inner = set_var(KEY, "inner");
        assert_eq!(env::var(KEY).ok().as_deref(), Some("inner"));
        drop(inner);
        assert_eq!(env::var(KEY).ok().as_deref(), Some("outer"));
        drop(outer);
    }
}
