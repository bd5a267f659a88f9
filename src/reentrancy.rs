//! Debug-only reentrancy guard.
//!
//! The map calls into user code (`K: Hash`, `K: Eq`) while it walks a
//! bucket. Calling back into the same map from there is a bug in the
//! caller; in debug builds the guard turns it into a panic instead of a
//! confusing lookup result. Release builds compile the guard away.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-map flag. Guard each user-code section with
/// `let _g = self.reentrancy.enter();`.
#[derive(Debug)]
pub(crate) struct DebugReentrancy {
    #[cfg(debug_assertions)]
    busy: Cell<bool>,
    _not_sync: PhantomData<Cell<()>>,
}

impl DebugReentrancy {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            busy: Cell::new(false),
            _not_sync: PhantomData,
        }
    }

    /// Mark the map busy until the guard drops. Panics in debug builds if it
    /// is already busy.
    #[inline]
    pub(crate) fn enter(&self) -> ReentrancyGuard<'_> {
        #[cfg(debug_assertions)]
        assert!(
            !self.busy.replace(true),
            "reentrant call into LinkedHashMap from Hash or Eq"
        );
        ReentrancyGuard { owner: self }
    }
}

impl Default for DebugReentrancy {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) struct ReentrancyGuard<'a> {
    #[cfg_attr(not(debug_assertions), allow(dead_code))]
    owner: &'a DebugReentrancy,
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.busy.set(false);
    }
}
