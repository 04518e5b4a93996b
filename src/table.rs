//! An in-memory, case-insensitive [`EntryStore`].

use std::collections::BTreeMap;

use crate::entry::{Entry, EntryRepository, EntryStore};
use crate::error::DrawError;

/// Weighted entries keyed by case-folded id.
///
/// Ids are folded only for keying; each entry keeps its id as given.
/// Iteration follows folded-id order.
#[derive(Debug, Clone)]
pub struct EntryTable<T> {
    entries: BTreeMap<String, Entry<T>>,
    total_weight: u64,
}

impl<T> Default for EntryTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn fold(id: &str) -> String {
    id.to_lowercase()
}

impl<T> EntryTable<T> {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            total_weight: 0,
        }
    }

    /// Validate and insert one entry.
    ///
    /// Fails with [`DrawError::InvalidArgument`] for an invalid entry, an id
    /// already present (ignoring case), or a total weight overflow.
    pub fn add(
        &mut self,
        id: impl Into<String>,
        payload: T,
        weight: u32,
    ) -> Result<&mut Self, DrawError> {
        let entry = Entry::new(id, payload, weight)?;
        let key = fold(entry.id());
        if self.entries.contains_key(&key) {
            return Err(duplicate(entry.id()));
        }
        self.total_weight = self
            .total_weight
            .checked_add(u64::from(entry.weight()))
            .ok_or_else(|| DrawError::invalid("total weight overflows u64"))?;
        self.entries.insert(key, entry);
        Ok(self)
    }

    /// Insert every `(id, payload, weight)` or none of them.
    pub fn add_all<I, S>(&mut self, items: I) -> Result<&mut Self, DrawError>
    where
        I: IntoIterator<Item = (S, T, u32)>,
        S: Into<String>,
    {
        let mut staged = BTreeMap::new();
        let mut added = 0u64;
        for (id, payload, weight) in items {
            let entry = Entry::new(id, payload, weight)?;
            let key = fold(entry.id());
            if self.entries.contains_key(&key) || staged.contains_key(&key) {
                return Err(duplicate(entry.id()));
            }
            added = added
                .checked_add(u64::from(entry.weight()))
                .ok_or_else(|| DrawError::invalid("total weight overflows u64"))?;
            staged.insert(key, entry);
        }
        self.total_weight = self
            .total_weight
            .checked_add(added)
            .ok_or_else(|| DrawError::invalid("total weight overflows u64"))?;
        self.entries.append(&mut staged);
        Ok(self)
    }

    /// Remove the entry for `id` (any case), returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<Entry<T>> {
        let entry = self.entries.remove(&fold(id))?;
        self.total_weight -= u64::from(entry.weight());
        Some(entry)
    }

    /// Look up an entry by id, ignoring case.
    pub fn get(&self, id: &str) -> Option<&Entry<T>> {
        self.entries.get(&fold(id))
    }

    /// Whether an entry with this id (any case) exists.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(&fold(id))
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.total_weight = 0;
    }

    /// Number of distinct entries (not slots).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all weights, i.e. the population size.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Entries in folded-id order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> {
        self.entries.values()
    }
}

fn duplicate(id: &str) -> DrawError {
    DrawError::invalid(format!("duplicate entry id {id:?}"))
}

impl<'a, T> IntoIterator for &'a EntryTable<T> {
    type Item = &'a Entry<T>;
    type IntoIter = std::collections::btree_map::Values<'a, String, Entry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

impl<T> EntryRepository<T> for EntryTable<T> {
    fn entries<'a>(&'a self) -> impl Iterator<Item = &'a Entry<T>>
    where
        T: 'a,
    {
        self.iter()
    }

    fn total_weight(&self) -> u64 {
        self.total_weight
    }

    fn lookup(&self, id: &str) -> Option<&Entry<T>> {
        self.get(id)
    }
}

impl<T> EntryStore<T> for EntryTable<T> {
    fn remove(&mut self, id: &str) -> Option<Entry<T>> {
        EntryTable::remove(self, id)
    }
}
