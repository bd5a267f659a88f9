//! Resize policy: when the hash index doubles or halves its bucket count.

/// Grow when `len >= load_factor * capacity` after an insertion; shrink
/// when `len < capacity * load_factor / 2` after an erase. Capacity never
/// drops below one bucket.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct ResizePolicy {
    load_factor: f64,
}

impl ResizePolicy {
    pub(crate) fn new(load_factor: f64) -> Self {
        Self { load_factor }
    }

    pub(crate) fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// New bucket count after an insertion left `len` entries, if any.
    pub(crate) fn after_insert(&self, len: usize, capacity: usize) -> Option<usize> {
        if len as f64 >= self.load_factor * capacity as f64 {
            Some(capacity.saturating_mul(2))
        } else {
            None
        }
    }

    /// New bucket count after an erase left `len` entries, if any.
    pub(crate) fn after_erase(&self, len: usize, capacity: usize) -> Option<usize> {
        if capacity > 1 && (len as f64) < capacity as f64 * self.load_factor / 2.0 {
            Some(capacity / 2)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ResizePolicy;

    #[test]
    fn grows_at_threshold() {
        let p = ResizePolicy::new(2.0);
        assert_eq!(p.after_insert(7, 4), None);
        assert_eq!(p.after_insert(8, 4), Some(8));
        assert_eq!(p.after_insert(9, 8), None);
    }

    #[test]
    fn fractional_load_factor() {
        let p = ResizePolicy::new(0.75);
        assert_eq!(p.after_insert(11, 16), None);
        assert_eq!(p.after_insert(12, 16), Some(32));
        assert_eq!(p.after_insert(1, 1), Some(2));
    }

    #[test]
    fn shrinks_below_half_threshold_but_not_below_one() {
        let p = ResizePolicy::new(2.0);
        assert_eq!(p.after_erase(8, 8), None);
        assert_eq!(p.after_erase(7, 8), Some(4));
        assert_eq!(p.after_erase(0, 2), Some(1));
        assert_eq!(p.after_erase(0, 1), None);
    }
}
