//! Error type shared by the map, its handles and its configuration.

use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum MapError {
    /// A keyed lookup (`at`, `at_mut`) found no entry.
    #[error("key not found")]
    MissingKey,
    /// A handle was moved past either end, dereferenced at `end()`, used
    /// after its entry was erased, or presented to a map that did not issue it.
    #[error("invalid iterator operation")]
    InvalidIterator,
    #[error("load factor must be a positive, finite number")]
    InvalidLoadFactor,
}
