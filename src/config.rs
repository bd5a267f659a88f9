//! Construction-time configuration for `LinkedHashMap`.

use crate::error::MapError;

/// Bucket count a map starts with when none is given.
pub const DEFAULT_CAPACITY: usize = 16;
/// Average entries per bucket that triggers a grow.
pub const DEFAULT_LOAD_FACTOR: f64 = 4.0;

/// Initial bucket count and load factor of a map.
///
/// ```
/// use linked_hashmap::{Config, LinkedHashMap};
///
/// let config = Config::new(4, 0.75).unwrap();
/// let m: LinkedHashMap<&str, i32> = LinkedHashMap::with_config(config);
/// assert_eq!(m.capacity(), 4);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    capacity: usize,
    load_factor: f64,
}

impl Config {
    /// `capacity` is raised to at least one bucket; `load_factor` must be
    /// positive and finite.
    pub fn new(capacity: usize, load_factor: f64) -> Result<Self, MapError> {
        Self::default()
            .with_capacity(capacity)
            .with_load_factor(load_factor)
    }

    pub fn with_capacity(self, capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            ..self
        }
    }

    pub fn with_load_factor(self, load_factor: f64) -> Result<Self, MapError> {
        if !(load_factor.is_finite() && load_factor > 0.0) {
            return Err(MapError::InvalidLoadFactor);
        }
        Ok(Self {
            load_factor,
            ..self
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}
