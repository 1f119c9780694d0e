//! Fixed-capacity slot storage for the Robin Hood table

use std::collections::TryReserveError;

use crate::DictError;

/// An occupied slot: owned key/value plus the cached probe metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    /// The key, unique among live entries
    pub(crate) key: String,
    /// Optional value; a key without a value is still present
    pub(crate) value: Option<String>,
    /// Murmur digest of `key`, computed once on insertion
    pub(crate) hash: u64,
    /// Distance from the home slot (`hash % capacity`)
    pub(crate) dib: usize,
}

impl Entry {
    /// Copies `key` and `value` into owned strings without aborting on allocation failure
    pub(crate) fn try_new(key: &str, value: Option<&str>, hash: u64) -> Result<Self, DictError> {
        Ok(Self { key: try_own(key)?, value: value.map(try_own).transpose()?, hash, dib: 0 })
    }
}

/// Fallible counterpart of `str::to_owned`
pub(crate) fn try_own(s: &str) -> Result<String, TryReserveError> {
    let mut owned = String::new();
    owned.try_reserve_exact(s.len())?;
    owned.push_str(s);
    Ok(owned)
}

/// Slot array whose length is the dictionary capacity.
///
/// Positions handed out by [`SlotTable::home`] and [`SlotTable::next`] are always in range.
#[derive(Debug, Clone)]
pub(crate) struct SlotTable {
    /// `None` marks an empty slot
    slots: Vec<Option<Entry>>,
}

impl SlotTable {
    /// Allocates `capacity` empty slots (at least one)
    pub(crate) fn new(capacity: usize) -> Self {
        let mut slots = Vec::new();
        slots.resize_with(capacity.max(1), || None);
        Self { slots }
    }

    /// Allocates `capacity` empty slots, reporting allocation failure instead of aborting
    pub(crate) fn try_new(capacity: usize) -> Result<Self, DictError> {
        let capacity = capacity.max(1);
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        slots.resize_with(capacity, || None);
        Ok(Self { slots })
    }

    /// Number of slots
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Home position of `hash`
    #[allow(clippy::cast_possible_truncation, clippy::arithmetic_side_effects)]
    pub(crate) fn home(&self, hash: u64) -> usize {
        // the remainder is below `capacity`, so it fits back into usize
        (hash % self.slots.len() as u64) as usize
    }

    /// Position following `pos`, wrapping at the end of the table
    pub(crate) fn next(&self, pos: usize) -> usize {
        let next = pos.saturating_add(1);
        if next >= self.slots.len() { 0 } else { next }
    }

    /// Entry at `pos`, or `None` if the slot is empty
    pub(crate) fn get(&self, pos: usize) -> Option<&Entry> {
        self.slots.get(pos).and_then(Option::as_ref)
    }

    /// Mutable access to the occupied entry at `pos`
    pub(crate) fn get_mut(&mut self, pos: usize) -> Option<&mut Entry> {
        self.slots.get_mut(pos).and_then(Option::as_mut)
    }

    /// Raw slot at `pos`, empty or not
    pub(crate) fn slot_mut(&mut self, pos: usize) -> Option<&mut Option<Entry>> {
        self.slots.get_mut(pos)
    }

    /// Moves the entry out of `pos`, leaving the slot empty
    pub(crate) fn take(&mut self, pos: usize) -> Option<Entry> {
        self.slots.get_mut(pos).and_then(Option::take)
    }

    /// Stores `entry` at `pos`, overwriting whatever was there
    pub(crate) fn put(&mut self, pos: usize, entry: Entry) {
        if let Some(slot) = self.slots.get_mut(pos) {
            *slot = Some(entry);
        }
    }

    /// Empties every slot, keeping the capacity
    pub(crate) fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    /// Occupied slots with their physical index, in slot order
    pub(crate) fn occupied(&self) -> impl Iterator<Item = (usize, &Entry)> {
        self.slots.iter().enumerate().filter_map(|(pos, slot)| slot.as_ref().map(|e| (pos, e)))
    }

    /// Raw slots, used by the public iterator
    pub(crate) fn slots(&self) -> &[Option<Entry>] {
        &self.slots
    }

    /// Consumes the table, yielding live entries in physical slot order
    pub(crate) fn into_entries(self) -> impl Iterator<Item = Entry> {
        self.slots.into_iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, hash: u64) -> Entry {
        Entry { key: key.to_string(), value: None, hash, dib: 0 }
    }

    #[test]
    fn test_zero_capacity_rounds_up() {
        assert_eq!(SlotTable::new(0).capacity(), 1);
        assert!(SlotTable::try_new(0).is_ok_and(|t| t.capacity() == 1));
    }

    #[test]
    fn test_home_and_wraparound() {
        let table = SlotTable::new(8);
        assert_eq!(table.home(0), 0);
        assert_eq!(table.home(13), 5);
        assert_eq!(table.home(u64::MAX), 7);
        assert_eq!(table.next(3), 4);
        assert_eq!(table.next(7), 0);

        // capacity need not be a power of two
        let table = SlotTable::new(10);
        assert_eq!(table.home(23), 3);
        assert_eq!(table.next(9), 0);
    }

    #[test]
    fn test_take_and_put() {
        let mut table = SlotTable::new(4);
        table.put(2, entry("a", 2));
        assert_eq!(table.get(2).map(|e| e.key.as_str()), Some("a"));
        assert!(table.get(1).is_none());
        assert!(table.get(9).is_none());

        let moved = table.take(2);
        assert_eq!(moved.map(|e| e.hash), Some(2));
        assert!(table.get(2).is_none());
        assert!(table.take(2).is_none());
    }

    #[test]
    fn test_occupied_and_into_entries_follow_slot_order() {
        let mut table = SlotTable::new(4);
        table.put(3, entry("c", 3));
        table.put(0, entry("a", 0));

        let seen: Vec<(usize, &str)> =
            table.occupied().map(|(pos, e)| (pos, e.key.as_str())).collect();
        assert_eq!(seen, vec![(0, "a"), (3, "c")]);

        let keys: Vec<String> = table.into_entries().map(|e| e.key).collect();
        assert_eq!(keys, vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_clear() {
        let mut table = SlotTable::new(2);
        table.put(0, entry("a", 0));
        table.clear();
        assert_eq!(table.occupied().count(), 0);
        assert_eq!(table.capacity(), 2);
    }

    #[test]
    fn test_try_new_reports_overflow() {
        assert!(matches!(SlotTable::try_new(usize::MAX), Err(DictError::AllocationFailure(_))));
    }

    #[test]
    fn test_entry_copies_strings() {
        let key = String::from("key");
        let built = Entry::try_new(&key, Some("value"), 7);
        assert!(built.is_ok_and(|e| e.key == "key" && e.value.as_deref() == Some("value")));
        assert!(Entry::try_new("k", None, 0).is_ok_and(|e| e.value.is_none()));
    }
}
