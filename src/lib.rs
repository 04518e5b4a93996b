//! `chusen`: fair weighted drawings.
//!
//! Draws winners from a weighted pool so that every entry's chance is exactly
//! proportional to its weight, randomness comes from a cryptographically
//! secure source, and no population slot wins twice in one draw.
//!
//! Modules, leaf-first:
//! - `bounded`: unbiased integers in `[0, limit)` via rejection sampling.
//! - `population`: expand weighted entries into one slot per unit of weight.
//! - `shuffle`: shuffled copies of a sequence.
//! - `select`: selection without replacement (`select` preview, `draw`).
//! - `entry`: entries and the repository traits the engine reads through.
//! - `table`: a case-insensitive in-memory repository.
//!
//! ```
//! use chusen::{EntryTable, Selector};
//!
//! let mut pool = EntryTable::new();
//! pool.add("jen", (), 1)?.add("michael", (), 1)?.add("staci", (), 2)?;
//!
//! let winners = Selector::new().select(&pool, 2)?;
//! assert_eq!(winners.len(), 2);
//! # Ok::<(), chusen::DrawError>(())
//! ```

#![forbid(unsafe_code)]

pub mod bounded;
pub mod entry;
pub mod error;
pub mod population;
pub mod select;
pub mod shuffle;
pub mod table;

pub use bounded::{BoundedRng, Reduction};
pub use entry::{Entry, EntryRepository, EntryStore};
pub use error::DrawError;
pub use population::build_population;
pub use select::{select, shuffle, Selector};
pub use shuffle::{shuffled, ShuffleMode};
pub use table::EntryTable;
