//! Weighted selection without replacement.
//!
//! A draw builds the weighted population, shuffles it, then repeatedly pops
//! a uniformly chosen slot from what is left. Removing the slot stops that
//! unit of weight from winning twice; other slots of the same entry stay
//! eligible. Each call starts from a fresh population, so nothing carries
//! over between draws except the selector's entropy source.
//!
//! [`Selector::select`] only reads the repository and doubles as a preview.
//! [`Selector::draw`] runs the same algorithm and then removes the winners.

use std::collections::HashSet;

use rand::rngs::OsRng;
use rand::TryCryptoRng;

use crate::bounded::{BoundedRng, Reduction};
use crate::entry::{Entry, EntryRepository, EntryStore};
use crate::error::DrawError;
use crate::population::build_population;
use crate::shuffle::{shuffled, ShuffleMode};

/// Draws winners from an [`EntryRepository`].
///
/// Holds its own entropy source for its whole lifetime; every operation takes
/// `&mut self`, so access to the source is serialised.
#[derive(Debug)]
pub struct Selector<R = OsRng> {
    rng: BoundedRng<R>,
    shuffle: ShuffleMode,
}

impl Selector<OsRng> {
    /// A selector backed by the operating system's secure random source.
    pub fn new() -> Self {
        Self::with_rng(OsRng)
    }
}

impl Default for Selector<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TryCryptoRng> Selector<R> {
    /// A selector over a caller-supplied secure source (for tests/benchmarks).
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng: BoundedRng::new(rng),
            shuffle: ShuffleMode::default(),
        }
    }

    /// Select the shuffle variant applied to each population.
    pub fn with_shuffle(mut self, mode: ShuffleMode) -> Self {
        self.shuffle = mode;
        self
    }

    /// Select how raw entropy is reduced into indices.
    pub fn with_reduction(mut self, reduction: Reduction) -> Self {
        self.rng = self.rng.with_reduction(reduction);
        self
    }

    /// The shuffle variant in use.
    pub fn shuffle_mode(&self) -> ShuffleMode {
        self.shuffle
    }

    /// Release the entropy source.
    pub fn into_inner(self) -> R {
        self.rng.into_inner()
    }

    /// Uniform index in `[0, limit)`; see [`BoundedRng::next_index`].
    pub fn next_index(&mut self, limit: usize) -> Result<usize, DrawError> {
        self.rng.next_index(limit)
    }

    /// Shuffled copy of `items` using this selector's source and mode.
    pub fn shuffled<T: Clone>(&mut self, items: &[T]) -> Result<Vec<T>, DrawError> {
        shuffled(items, &mut self.rng, self.shuffle)
    }

    /// Pick `count` population slots without replacement.
    ///
    /// The repository is only read. Fails with
    /// [`DrawError::InvalidArgument`] if `count == 0`,
    /// [`DrawError::OutOfRange`] if `count` exceeds the total weight and
    /// [`DrawError::NotFound`] if a slot's id cannot be looked up.
    pub fn select<'a, T, S>(
        &mut self,
        repo: &'a S,
        count: usize,
    ) -> Result<Vec<&'a Entry<T>>, DrawError>
    where
        T: 'a,
        S: EntryRepository<T>,
    {
        if count == 0 {
            return Err(DrawError::invalid("number to select must be >= 1 (got 0)"));
        }
        let available = repo.total_weight();
        if count as u64 > available {
            return Err(DrawError::OutOfRange {
                requested: count,
                available,
            });
        }

        let population = build_population(repo.entries());
        if population.len() < count {
            // The repository's weight total disagrees with its entries.
            return Err(DrawError::OutOfRange {
                requested: count,
                available: population.len() as u64,
            });
        }
        let mut remaining = self.shuffled(&population)?;
        log::debug!(
            "selecting {count} of {} slots ({:?} shuffle)",
            remaining.len(),
            self.shuffle
        );

        let mut winners = Vec::with_capacity(count);
        for _ in 0..count {
            let k = self.rng.next_index(remaining.len())?;
            let id = remaining.swap_remove(k);
            let entry = repo
                .lookup(id)
                .ok_or_else(|| DrawError::NotFound(id.to_owned()))?;
            winners.push(entry);
        }
        Ok(winners)
    }

    /// Select `count` slots, then remove every winning entry from `store`.
    ///
    /// Winners are returned by value, one per winning slot, so an entry that
    /// won several slots appears that many times. If selection fails nothing
    /// is removed. If the store cannot remove a winner it just resolved, the
    /// draw fails with [`DrawError::NotFound`]; winners removed before that
    /// point stay removed.
    pub fn draw<T, S>(&mut self, store: &mut S, count: usize) -> Result<Vec<Entry<T>>, DrawError>
    where
        T: Clone,
        S: EntryStore<T>,
    {
        let winners: Vec<Entry<T>> = self
            .select(&*store, count)?
            .into_iter()
            .cloned()
            .collect();
        let mut removed = HashSet::new();
        for winner in &winners {
            // Repeat winners were already removed on their first slot.
            if !removed.insert(winner.id()) {
                continue;
            }
            if store.remove(winner.id()).is_none() {
                return Err(DrawError::NotFound(winner.id().to_owned()));
            }
        }
        log::info!(
            "drew {} winner slot(s); {} weight left in store",
            winners.len(),
            store.total_weight()
        );
        Ok(winners)
    }
}

/// Select `count` slots from `repo` with a fresh OS-backed [`Selector`].
pub fn select<T, S>(repo: &S, count: usize) -> Result<Vec<&Entry<T>>, DrawError>
where
    S: EntryRepository<T>,
{
    Selector::new().select(repo, count)
}

/// Shuffled copy of `items` with a fresh OS-backed [`Selector`].
pub fn shuffle<T: Clone>(items: &[T]) -> Result<Vec<T>, DrawError> {
    Selector::new().shuffled(items)
}
