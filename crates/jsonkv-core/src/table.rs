//! Fixed-size hashtable with separate chaining.
//!
//! A [`Table`] is an array of primary slots addressed by [`hash_key`]. A key
//! that lands on a slot already holding a different key goes into that slot's
//! [`OverflowChain`]. The table never resizes.
//!
//! # Bookkeeping
//!
//! `count` is the number of occupied primary slots. Entries that live only in
//! an overflow chain are not counted; [`Table::len`] reports every stored key.
//! Deleting a primary entry whose chain is non-empty promotes the chain head
//! into the slot, so the slot stays occupied and `count` does not change.
//!
//! # Capacity
//!
//! `capacity` caps how many primary slots may be occupied and is at most the
//! slot count. An insert that needs a fresh primary slot while `count ==
//! capacity` fails with [`TableError::TableFull`]; updates of existing keys
//! and chain insertions are still accepted.

use crate::chain::{self, OverflowChain};
use crate::config::ParseConfig;
use crate::error::TableError;
use crate::value::TypedValue;
use log::{debug, trace, warn};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A stored key and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: String,
    pub value: TypedValue,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: TypedValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// An occupied primary slot and the entries that collided with it.
///
/// A slot with an empty primary position is represented as `None` in the
/// table, which also means its chain is empty.
#[derive(Debug, Clone)]
struct Slot {
    entry: Entry,
    overflow: OverflowChain,
}

/// Sum of the key's bytes modulo `slots`.
///
/// Anagrams such as `"ab"` and `"ba"` always collide.
pub fn hash_key(key: &str, slots: usize) -> usize {
    key.bytes()
        .fold(0usize, |sum, byte| sum.wrapping_add(usize::from(byte)))
        % slots
}

/// One level of the nested key/value store.
#[derive(Clone)]
pub struct Table {
    slots: Vec<Option<Box<Slot>>>,
    capacity: usize,
    count: usize,
}

impl Table {
    /// Create a table with `capacity` primary slots, all of which may be used.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self::with_slots(capacity, capacity)
    }

    /// Create a table with `slots` primary slots of which at most `capacity`
    /// may be occupied. `capacity` is clamped to `slots`.
    ///
    /// # Panics
    ///
    /// Panics if `slots` is zero.
    pub fn with_slots(slots: usize, capacity: usize) -> Self {
        assert!(slots > 0, "a table needs at least one slot");
        let mut table_slots = Vec::with_capacity(slots);
        table_slots.resize_with(slots, || None);
        Self {
            slots: table_slots,
            capacity: capacity.min(slots),
            count: 0,
        }
    }

    /// Create an empty table sized by `config`.
    pub fn from_config(config: &ParseConfig) -> Self {
        Self::with_slots(config.slots, config.capacity)
    }

    /// Number of primary slots (the hash modulus).
    pub fn slots(&self) -> usize {
        self.slots.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of occupied primary slots.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of entries held in overflow chains.
    pub fn chained(&self) -> usize {
        self.occupied().map(|slot| slot.overflow.len()).sum()
    }

    /// Number of stored keys, primary and chained.
    pub fn len(&self) -> usize {
        self.count + self.chained()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Primary slot index for `key` in this table.
    pub fn slot_index(&self, key: &str) -> usize {
        hash_key(key, self.slots.len())
    }

    /// Insert or update `key`.
    ///
    /// Returns the previous value when the key was already present. A
    /// `TableFull` error leaves the table unchanged.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: TypedValue,
    ) -> Result<Option<TypedValue>, TableError> {
        let key = key.into();
        let index = self.slot_index(&key);
        let capacity = self.capacity;

        match &mut self.slots[index] {
            Some(slot) if slot.entry.key == key => {
                trace!("update {key:?} in primary slot {index}");
                Ok(Some(std::mem::replace(&mut slot.entry.value, value)))
            }
            Some(slot) => {
                if let Some(entry) = slot.overflow.find_mut(&key) {
                    trace!("update {key:?} in overflow chain of slot {index}");
                    return Ok(Some(std::mem::replace(&mut entry.value, value)));
                }
                trace!("insert {key:?} into overflow chain of slot {index}");
                slot.overflow.push_back(Entry::new(key, value));
                Ok(None)
            }
            empty @ None => {
                if self.count == capacity {
                    debug!("table full ({capacity} slots occupied), rejecting {key:?}");
                    return Err(TableError::TableFull { key, capacity });
                }
                trace!("insert {key:?} into primary slot {index}");
                *empty = Some(Box::new(Slot {
                    entry: Entry::new(key, value),
                    overflow: OverflowChain::new(),
                }));
                self.count += 1;
                Ok(None)
            }
        }
    }

    /// Find the entry stored under `key`, primary slot first, then the chain.
    pub fn search(&self, key: &str) -> Option<&Entry> {
        let slot = self.slots[self.slot_index(key)].as_deref()?;
        if slot.entry.key == key {
            return Some(&slot.entry);
        }
        slot.overflow.find(key)
    }

    pub fn get(&self, key: &str) -> Option<&TypedValue> {
        self.search(key).map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut TypedValue> {
        let index = self.slot_index(key);
        let slot = self.slots[index].as_deref_mut()?;
        if slot.entry.key == key {
            return Some(&mut slot.entry.value);
        }
        slot.overflow.find_mut(key).map(|entry| &mut entry.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.search(key).is_some()
    }

    /// Follow a dot-separated path through nested tables, e.g. `"outer.inner"`.
    pub fn get_path(&self, path: &str) -> Option<&TypedValue> {
        let mut segments = path.split('.');
        let mut value = self.get(segments.next()?)?;
        for segment in segments {
            value = value.as_table()?.get(segment)?;
        }
        Some(value)
    }

    /// Remove `key` and return its value.
    ///
    /// A miss is reported as [`TableError::KeyNotFound`] and changes nothing.
    pub fn delete(&mut self, key: &str) -> Result<TypedValue, TableError> {
        let index = self.slot_index(key);
        let Some(slot) = self.slots[index].as_deref_mut() else {
            warn!("delete: key {key:?} does not exist");
            return Err(TableError::KeyNotFound(key.to_string()));
        };

        if slot.entry.key == key {
            return match slot.overflow.pop_front() {
                Some(promoted) => {
                    trace!("delete {key:?}, promote {:?} into slot {index}", promoted.key);
                    Ok(std::mem::replace(&mut slot.entry, promoted).value)
                }
                None => {
                    trace!("delete {key:?}, slot {index} now empty");
                    self.count -= 1;
                    match self.slots[index].take() {
                        Some(slot) => Ok(slot.entry.value),
                        None => Err(TableError::KeyNotFound(key.to_string())),
                    }
                }
            };
        }

        match slot.overflow.remove(key) {
            Some(entry) => {
                trace!("delete {key:?} from overflow chain of slot {index}");
                Ok(entry.value)
            }
            None => {
                warn!("delete: key {key:?} does not exist");
                Err(TableError::KeyNotFound(key.to_string()))
            }
        }
    }

    /// Drop every entry, keeping the slot array.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.count = 0;
    }

    /// Nesting depth: 1 for a table without nested tables.
    pub fn depth(&self) -> usize {
        1 + self
            .iter()
            .filter_map(|entry| entry.value.as_table())
            .map(Table::depth)
            .max()
            .unwrap_or(0)
    }

    /// Entries in rendering order: slot by slot, primary entry then chain.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: self.slots.iter(),
            current: None,
        }
    }

    /// Like [`iter`](Self::iter) but also yields the slot index and the
    /// position in the chain (`None` for the primary entry).
    pub fn iter_slots(&self) -> impl Iterator<Item = (usize, Option<usize>, &Entry)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_deref().map(|slot| (index, slot)))
            .flat_map(|(index, slot)| {
                std::iter::once((index, None, &slot.entry)).chain(
                    slot.overflow
                        .iter()
                        .enumerate()
                        .map(move |(pos, entry)| (index, Some(pos), entry)),
                )
            })
    }

    /// Consume the table and free everything it owns, nested tables included.
    pub fn teardown(self) {
        drop(self);
    }

    fn occupied(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter_map(|slot| slot.as_deref())
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|entry| (&entry.key, &entry.value)))
            .finish()
    }
}

/// Two tables are equal when they hold the same keys with equal values,
/// regardless of slot layout.
impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|entry| other.get(&entry.key) == Some(&entry.value))
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for entry in self {
            map.serialize_entry(&entry.key, &entry.value)?;
        }
        map.end()
    }
}

/// Iterator over a table's entries in rendering order.
pub struct Iter<'a> {
    slots: std::slice::Iter<'a, Option<Box<Slot>>>,
    current: Option<chain::Iter<'a>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(entry) = self.current.as_mut().and_then(Iterator::next) {
            return Some(entry);
        }
        let slot = self.slots.find_map(|slot| slot.as_deref())?;
        self.current = Some(slot.overflow.iter());
        Some(&slot.entry)
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Entry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
