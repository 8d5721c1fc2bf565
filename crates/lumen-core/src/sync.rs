use std::sync::{Mutex, MutexGuard};

/// Extension trait for acquiring a `Mutex` regardless of poisoning.
///
/// A poisoned lock means another thread panicked while holding it; the
/// guarded data here (canned responses, call histories) stays usable, so
/// the poison flag carries no information we act on.
pub trait LockExt<T> {
    /// Locks the mutex, recovering the guard if the lock was poisoned.
    fn lock_unpoisoned(&self) -> MutexGuard<'_, T>;
}

impl<T> LockExt<T> for Mutex<T> {
    fn lock_unpoisoned(&self) -> MutexGuard<'_, T> {
        match self.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
