//! Utility functions and traits for `Dict`

use crate::{Dict, DictError};

/// Extension trait providing owned snapshots and membership checks
pub trait DictExtensions {
    /// Returns the keys as a Vec, in physical slot order
    fn keys(&self) -> Vec<String>;

    /// Returns the values as a Vec, in physical slot order
    fn values(&self) -> Vec<Option<String>>;

    /// Returns true if the dictionary contains the given key
    fn contains_key(&self, key: &str) -> bool;
}

impl DictExtensions for Dict {
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_string()).collect()
    }

    fn values(&self) -> Vec<Option<String>> {
        self.iter().map(|(_, v)| v.map(str::to_string)).collect()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.get_entry(key).is_some()
    }
}

/// Builds a `Dict` from an iterator of key/value pairs
///
/// # Errors
///
/// Returns the first error reported while inserting.
pub fn from_pairs<I, K, V>(iter: I) -> Result<Dict, DictError>
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut dict = Dict::new();
    dict.try_extend(iter)?;
    Ok(dict)
}
