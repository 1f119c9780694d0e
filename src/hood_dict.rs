use std::mem;

use tracing::{debug, trace, warn};

use crate::{
    DictConfig, DictError,
    murmur::murmur64,
    slot_table::{Entry, SlotTable, try_own},
};

/// A string-to-string dictionary using Robin Hood open addressing.
///
/// Collisions are resolved by linear probing where an incoming entry that has travelled
/// farther from its home slot steals the place of a richer occupant. Removal shifts the
/// following entries back instead of leaving tombstones, so lookups stop at the first
/// empty slot.
///
/// The table grows whenever an insertion would push the load factor above 2/3.
///
/// Note: This implementation is not thread-safe. Callers must serialize mutation.
#[derive(Debug, Clone)]
pub struct Dict {
    /// The slots storing the key/value pairs
    table: SlotTable,
    /// Number of occupied slots
    used: usize,
    /// Tuning supplied at creation, kept across resizes
    config: DictConfig,
}

impl Default for Dict {
    fn default() -> Self {
        Self::new()
    }
}

impl Dict {
    /// Creates an empty `Dict` with the default configuration (8 slots)
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DictConfig::default())
    }

    /// Creates an empty `Dict` with `capacity` slots; zero falls back to the minimum of 8
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(DictConfig::default().with_initial_capacity(capacity))
    }

    /// Creates an empty `Dict` from an explicit configuration
    #[must_use]
    pub fn with_config(config: DictConfig) -> Self {
        Self { table: SlotTable::new(config.effective_capacity()), used: 0, config }
    }

    /// Like [`Dict::with_config`], but reports a failed table allocation as an error
    ///
    /// # Errors
    ///
    /// Returns [`DictError::AllocationFailure`] if the slot array cannot be allocated.
    pub fn try_with_config(config: DictConfig) -> Result<Self, DictError> {
        Ok(Self { table: SlotTable::try_new(config.effective_capacity())?, used: 0, config })
    }

    /// Inserts `key` with an optional `value`.
    ///
    /// If the key is already present its value is replaced and the previous one dropped.
    ///
    /// # Errors
    ///
    /// - [`DictError::InvalidArgument`] for an empty key.
    /// - [`DictError::AllocationFailure`] or [`DictError::CapacityOverflow`] if the copies or
    ///   a required growth cannot be allocated. The dictionary is left unchanged.
    pub fn insert(&mut self, key: &str, value: Option<&str>) -> Result<(), DictError> {
        if key.is_empty() {
            return Err(DictError::InvalidArgument("empty key"));
        }

        let hash = murmur64(key);
        if let Some(pos) = self.find_slot(key, hash) {
            let value = value.map(try_own).transpose()?;
            if let Some(entry) = self.table.get_mut(pos) {
                entry.value = value;
            }
            trace!(key, hash, pos, "overwrote value");
            return Ok(());
        }

        let entry = Entry::try_new(key, value, hash)?;
        let used = self
            .used
            .checked_add(1)
            .ok_or_else(|| DictError::CapacityOverflow(self.table.capacity()))?;
        if exceeds_load(used, self.table.capacity()) {
            self.grow(used)?;
        }

        let pos = place(&mut self.table, entry);
        self.used = used;
        trace!(key, hash, pos, used, "inserted");
        Ok(())
    }

    /// Retrieves the value for `key`, or `default` if the key is absent.
    ///
    /// A key stored without a value yields `None`, not `default`.
    #[must_use]
    pub fn get<'a>(&'a self, key: &str, default: Option<&'a str>) -> Option<&'a str> {
        self.get_entry(key).unwrap_or(default)
    }

    /// Retrieves the value slot for `key`: `None` if absent, `Some(None)` if stored without a value
    #[must_use]
    pub fn get_entry(&self, key: &str) -> Option<Option<&str>> {
        if key.is_empty() {
            return None;
        }
        let pos = self.find_slot(key, murmur64(key))?;
        self.table.get(pos).map(|entry| entry.value.as_deref())
    }

    /// Removes `key`, returning whether an entry was removed
    pub fn remove(&mut self, key: &str) -> bool {
        if key.is_empty() {
            return false;
        }

        let hash = murmur64(key);
        let Some(pos) = self.find_slot(key, hash) else {
            return false;
        };

        drop(self.table.take(pos));
        self.used = self.used.saturating_sub(1);
        backward_shift(&mut self.table, pos);
        trace!(key, hash, pos, used = self.used, "removed");
        true
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.used
    }

    /// Returns true if the dictionary holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the configuration the dictionary was created with
    #[must_use]
    pub fn config(&self) -> &DictConfig {
        &self.config
    }

    /// Returns the current load factor of the dictionary
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.used as f64 / self.table.capacity() as f64
    }

    /// Removes every entry, keeping the current capacity
    pub fn clear(&mut self) {
        self.table.clear();
        self.used = 0;
    }

    /// Returns an iterator over the entries in physical slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter { slots: self.table.slots().iter() }
    }

    /// Inserts every pair of `iter`, stopping at the first failure
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`Dict::insert`]; earlier pairs stay inserted.
    pub fn try_extend<I, K, V>(&mut self, iter: I) -> Result<(), DictError>
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in iter {
            self.insert(key.as_ref(), value.as_ref().map(AsRef::as_ref))?;
        }
        Ok(())
    }

    /// Slot storage, for diagnostics
    pub(crate) fn table(&self) -> &SlotTable {
        &self.table
    }

    /// Walks the probe sequence of `key`, stopping at the first empty slot
    fn find_slot(&self, key: &str, hash: u64) -> Option<usize> {
        let mut pos = self.table.home(hash);
        for _ in 0..self.table.capacity() {
            match self.table.get(pos) {
                None => return None,
                Some(entry) if entry.hash == hash && entry.key == key => return Some(pos),
                Some(_) => pos = self.table.next(pos),
            }
        }
        None
    }

    /// Grows the table so that `used` entries satisfy the load-factor target, then
    /// rehashes every live entry into it.
    ///
    /// The fresh table is allocated before anything moves; on failure `self` is untouched.
    fn grow(&mut self, used: usize) -> Result<(), DictError> {
        let old_capacity = self.table.capacity();
        let factor = self.config.growth_factor(old_capacity);
        let floor = factor.saturating_mul(used);

        let mut new_capacity = old_capacity;
        while new_capacity <= floor {
            new_capacity = new_capacity
                .checked_mul(2)
                .ok_or(DictError::CapacityOverflow(old_capacity))?;
        }
        if new_capacity == old_capacity {
            return Ok(());
        }

        debug!(from = old_capacity, to = new_capacity, used = self.used, "resizing");
        let fresh = SlotTable::try_new(new_capacity).inspect_err(|err| {
            warn!(from = old_capacity, to = new_capacity, %err, "resize allocation failed");
        })?;

        let old_table = mem::replace(&mut self.table, fresh);
        for entry in old_table.into_entries() {
            place(&mut self.table, entry);
        }
        debug!(capacity = new_capacity, used = self.used, "resized");
        Ok(())
    }
}

/// `3 * used > 2 * capacity`
fn exceeds_load(used: usize, capacity: usize) -> bool {
    used.saturating_mul(3) > capacity.saturating_mul(2)
}

/// Places `entry` by Robin Hood probing and returns the slot it landed in.
///
/// An evicted occupant is carried and re-probed from its own home slot with its distance
/// reset, until some carried entry reaches an empty slot. The table must hold at least one
/// empty slot.
fn place(table: &mut SlotTable, entry: Entry) -> usize {
    let mut carry = entry;
    let mut landed = None;

    'carry: loop {
        carry.dib = 0;
        let mut pos = table.home(carry.hash);

        loop {
            // home/next never leave the table
            let Some(slot) = table.slot_mut(pos) else {
                return landed.unwrap_or(pos);
            };
            match slot {
                None => {
                    *slot = Some(carry);
                    return landed.unwrap_or(pos);
                }
                Some(occupant) => {
                    if occupant.dib < carry.dib {
                        // the poorer entry takes the slot, the richer one moves on
                        carry = mem::replace(occupant, carry);
                        if landed.is_none() {
                            landed = Some(pos);
                        }
                        continue 'carry;
                    }
                }
            }
            carry.dib = carry.dib.saturating_add(1);
            pos = table.next(pos);
        }
    }
}

/// Closes the gap left at `pos` by shifting displaced successors one slot back.
///
/// Stops at an empty slot or at an entry already sitting in its home slot.
fn backward_shift(table: &mut SlotTable, mut pos: usize) {
    loop {
        let next = table.next(pos);
        match table.get(next) {
            Some(entry) if entry.dib > 0 => {}
            _ => break,
        }
        let Some(mut moved) = table.take(next) else {
            break;
        };
        moved.dib = moved.dib.saturating_sub(1);
        table.put(pos, moved);
        pos = next;
    }
}

/// Iterator over the entries of a `Dict`, in physical slot order
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    /// Remaining slots
    slots: std::slice::Iter<'a, Option<Entry>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, Option<&'a str>);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots
            .find_map(|slot| slot.as_ref().map(|e| (e.key.as_str(), e.value.as_deref())))
    }
}

impl<'a> IntoIterator for &'a Dict {
    type Item = (&'a str, Option<&'a str>);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
