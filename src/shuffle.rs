//! Shuffling on top of [`BoundedRng`].
//!
//! Both variants shuffle a copy and leave the input alone. Uniformity is over
//! positions, so duplicate values are fine.
//!
//! [`ShuffleMode::FullRange`] swaps every position with one drawn over the
//! whole sequence. This is the historical behaviour and stays the default. It
//! always yields a permutation, but for `n >= 3` the `n^n` equally likely
//! swap sequences cannot spread evenly over `n!` orders, so some orders are
//! slightly more likely than others. [`ShuffleMode::FisherYates`] draws from
//! the shrinking range `[i, n)` and is exactly uniform, using `n - 1` draws
//! instead of `n`.
//!
//! Selection does not rely on the shuffle for fairness: each pick draws its
//! own uniform index over the remaining slots.

use rand::TryCryptoRng;

use crate::bounded::BoundedRng;
use crate::error::DrawError;

/// Which swap range the shuffle draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShuffleMode {
    /// Swap each position with one drawn from `[0, n)`.
    #[default]
    FullRange,
    /// Canonical Fisher–Yates: swap position `i` with one from `[i, n)`.
    FisherYates,
}

/// Return a shuffled copy of `items`.
pub fn shuffled<T: Clone, R: TryCryptoRng>(
    items: &[T],
    rng: &mut BoundedRng<R>,
    mode: ShuffleMode,
) -> Result<Vec<T>, DrawError> {
    let mut out = items.to_vec();
    let n = out.len();
    match mode {
        ShuffleMode::FullRange => {
            for i in 0..n {
                let j = rng.next_index(n)?;
                out.swap(i, j);
            }
        }
        ShuffleMode::FisherYates => {
            for i in 0..n.saturating_sub(1) {
                let j = i + rng.next_index(n - i)?;
                out.swap(i, j);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounded::Scripted;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    fn sorted<T: Ord + Clone>(v: &[T]) -> Vec<T> {
        let mut v = v.to_vec();
        v.sort();
        v
    }

    #[test]
    fn keeps_every_element() {
        let input = vec!["a", "a", "b", "c", "c", "c"];
        let mut rng = BoundedRng::new(ChaCha8Rng::seed_from_u64(3));
        for mode in [ShuffleMode::FullRange, ShuffleMode::FisherYates] {
            let out = shuffled(&input, &mut rng, mode).expect("shuffle");
            assert_eq!(sorted(&out), sorted(&input));
        }
        assert_eq!(input, ["a", "a", "b", "c", "c", "c"]);
    }

    #[test]
    fn empty_and_singleton() {
        let mut rng = BoundedRng::new(ChaCha8Rng::seed_from_u64(4));
        let empty: [u8; 0] = [];
        assert!(shuffled(&empty, &mut rng, ShuffleMode::FullRange)
            .expect("shuffle")
            .is_empty());
        assert_eq!(
            shuffled(&[7], &mut rng, ShuffleMode::FisherYates).expect("shuffle"),
            [7]
        );
    }

    /// Every order reachable from each script of indices, counted.
    fn enumerate_orders(mode: ShuffleMode, scripts: Vec<Vec<u32>>) -> HashMap<Vec<u8>, usize> {
        let mut counts = HashMap::new();
        for script in scripts {
            let mut rng = BoundedRng::new(Scripted::new(script));
            let out = shuffled(&[0u8, 1, 2], &mut rng, mode).expect("shuffle");
            *counts.entry(out).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn full_range_shuffle_is_not_exactly_uniform() {
        // 27 equally likely index sequences over 6 orders: the split is
        // 4/5/5/5/4/4, not 4.5 each. Kept on purpose; see module docs.
        let mut scripts = Vec::new();
        for a in 0..3 {
            for b in 0..3 {
                for c in 0..3 {
                    scripts.push(vec![a, b, c]);
                }
            }
        }
        let counts = enumerate_orders(ShuffleMode::FullRange, scripts);
        assert_eq!(counts.len(), 6);
        assert_eq!(counts.values().sum::<usize>(), 27);
        assert_eq!(counts.values().filter(|&&c| c == 5).count(), 3);
        assert_eq!(counts.values().filter(|&&c| c == 4).count(), 3);
    }

    #[test]
    fn fisher_yates_is_exactly_uniform() {
        let mut scripts = Vec::new();
        for a in 0..3 {
            for b in 0..2 {
                scripts.push(vec![a, b]);
            }
        }
        let counts = enumerate_orders(ShuffleMode::FisherYates, scripts);
        assert_eq!(counts.len(), 6);
        assert!(counts.values().all(|&c| c == 1));
    }

    #[test]
    fn successive_shuffles_usually_differ() {
        let input: Vec<u32> = (0..20).collect();
        let mut rng = BoundedRng::from_os();
        let mut identical = 0;
        for _ in 0..50 {
            let a = shuffled(&input, &mut rng, ShuffleMode::FullRange).expect("shuffle");
            let b = shuffled(&input, &mut rng, ShuffleMode::FullRange).expect("shuffle");
            if a == b {
                identical += 1;
            }
        }
        assert!(identical <= 1, "{identical} of 50 shuffle pairs agreed");
    }
}
