//! Tuning knobs fixed at dictionary creation

/// Slot count used when no (or a zero) initial capacity is requested
pub const DICT_MIN_SIZE: usize = 8;

/// Capacity above which growth only keeps 2x headroom instead of 4x
pub const DICT_BIG_SIZE: usize = 65_536;

/// Configuration supplied when creating a `Dict`.
///
/// ```rust
/// use hood::{Dict, DictConfig};
///
/// let config = DictConfig::default().with_initial_capacity(32).with_big_table_threshold(1024);
/// let dict = Dict::with_config(config);
/// assert_eq!(dict.capacity(), 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictConfig {
    /// Starting slot count; zero falls back to [`DICT_MIN_SIZE`]
    pub initial_capacity: usize,
    /// Capacity above which the growth factor relaxes from 4x to 2x
    pub big_table_threshold: usize,
}

impl Default for DictConfig {
    fn default() -> Self {
        Self { initial_capacity: DICT_MIN_SIZE, big_table_threshold: DICT_BIG_SIZE }
    }
}

impl DictConfig {
    /// Sets the starting slot count
    #[must_use]
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets the capacity above which growth keeps only 2x headroom
    #[must_use]
    pub fn with_big_table_threshold(mut self, big_table_threshold: usize) -> Self {
        self.big_table_threshold = big_table_threshold;
        self
    }

    /// Slot count the first table is allocated with
    #[must_use]
    pub fn effective_capacity(&self) -> usize {
        if self.initial_capacity == 0 { DICT_MIN_SIZE } else { self.initial_capacity }
    }

    /// Load factor denominator targeted by a resize of a table with `capacity` slots
    #[must_use]
    pub fn growth_factor(&self, capacity: usize) -> usize {
        if capacity > self.big_table_threshold { 2 } else { 4 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DictConfig::default();
        assert_eq!(config.initial_capacity, 8);
        assert_eq!(config.big_table_threshold, 65_536);
        assert_eq!(config.effective_capacity(), 8);
    }

    #[test]
    fn test_zero_capacity_falls_back_to_minimum() {
        let config = DictConfig::default().with_initial_capacity(0);
        assert_eq!(config.effective_capacity(), DICT_MIN_SIZE);

        let config = DictConfig::default().with_initial_capacity(3);
        assert_eq!(config.effective_capacity(), 3);
    }

    #[test]
    fn test_growth_factor() {
        let config = DictConfig::default().with_big_table_threshold(100);
        assert_eq!(config.growth_factor(8), 4);
        assert_eq!(config.growth_factor(100), 4);
        assert_eq!(config.growth_factor(101), 2);
    }
}
