//! Weighted population building.
//!
//! A weighted draw is turned into a uniform one by giving each entry one
//! slot per unit of weight: `{a: 2, b: 1}` becomes `[a, a, b]`.

use crate::entry::Entry;

/// Expand entries into one id per unit of weight, in enumeration order.
///
/// The result length is the sum of all weights; no entries gives an empty
/// population. Ids are borrowed verbatim.
pub fn build_population<'a, T: 'a>(
    entries: impl IntoIterator<Item = &'a Entry<T>>,
) -> Vec<&'a str> {
    let mut slots = Vec::new();
    for entry in entries {
        let id = entry.id();
        slots.extend(std::iter::repeat(id).take(entry.weight() as usize));
    }
    slots
}
