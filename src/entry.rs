//! Weighted entries and the repository seam the engine reads them through.
//!
//! The engine never owns entries. It borrows them from an [`EntryRepository`]
//! for the length of one draw, and only a destructive draw goes through
//! [`EntryStore::remove`].

use crate::error::DrawError;

/// One weighted, uniquely identified candidate for selection.
///
/// An entry with weight `w` occupies exactly `w` slots of the sampling
/// population. Fields are private: once validated, an entry is immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<T> {
    id: String,
    payload: T,
    weight: u32,
}

impl<T> Entry<T> {
    /// Validate and build an entry.
    ///
    /// Fails with [`DrawError::InvalidArgument`] if `id` is empty (or only
    /// whitespace) or `weight == 0`.
    pub fn new(id: impl Into<String>, payload: T, weight: u32) -> Result<Self, DrawError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DrawError::invalid("entry id must not be empty"));
        }
        if weight == 0 {
            return Err(DrawError::invalid(format!(
                "weight of {id:?} must be >= 1 (got 0)"
            )));
        }
        Ok(Self {
            id,
            payload,
            weight,
        })
    }

    /// The id exactly as it was given.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The value carried alongside the id.
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Number of population slots this entry occupies.
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Consume the entry, keeping only its payload.
    pub fn into_payload(self) -> T {
        self.payload
    }
}

/// Read access to a set of weighted entries.
///
/// Implementations own id normalisation (e.g. case folding). The engine hands
/// ids back to [`lookup`](Self::lookup) exactly as [`entries`](Self::entries)
/// produced them.
pub trait EntryRepository<T> {
    /// Snapshot of all entries, in an arbitrary but fixed order.
    fn entries<'a>(&'a self) -> impl Iterator<Item = &'a Entry<T>>
    where
        T: 'a;

    /// Sum of all weights.
    fn total_weight(&self) -> u64;

    /// Resolve an id produced by [`entries`](Self::entries).
    fn lookup(&self, id: &str) -> Option<&Entry<T>>;
}

/// A repository that destructive draws may remove winners from.
pub trait EntryStore<T>: EntryRepository<T> {
    /// Remove and return the entry for `id`, or `None` if it is absent.
    fn remove(&mut self, id: &str) -> Option<Entry<T>>;
}
