//! Unbiased bounded integers from a cryptographically secure source.
//!
//! Reducing a raw random word with `raw % limit` favours the low residues
//! whenever `limit` does not divide the word's range. [`BoundedRng`] removes
//! that bias with rejection sampling: for a `width`-bit draw, only values
//! below
//!
//! \[
//! \mathrm{zone} = \left\lfloor 2^{width} / limit \right\rfloor \cdot limit
//! \]
//!
//! are accepted, and every accepted value is reduced with `% limit`. The zone
//! holds exactly `zone / limit` preimages of each output, so all outputs are
//! equally likely. A rejected value is discarded and redrawn.
//!
//! Two reductions are available:
//! - [`Reduction::FullWidth`] (default): 32-bit draws, or 64-bit when
//!   `limit > 2^32`. At most half of the draws are ever rejected, and for
//!   small limits almost none are.
//! - [`Reduction::NarrowBytes`]: draw only as many bytes as `limit - 1`
//!   needs and reject at that width. Saves entropy per draw but rejects far
//!   more often for limits just above a power of 256.
//!
//! Only [`TryCryptoRng`] sources are accepted. The default is [`OsRng`].

use rand::rngs::OsRng;
use rand::TryCryptoRng;

use crate::error::DrawError;

/// How a raw draw is reduced into `[0, limit)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    /// Fixed-width (32/64-bit) draws with zone rejection.
    #[default]
    FullWidth,
    /// Minimal-byte draws with zone rejection at the narrow width.
    NarrowBytes,
}

/// Produces uniformly distributed indices in `[0, limit)`.
///
/// Owns its entropy source. The source cannot be reseeded or inspected
/// through this type; [`into_inner`](Self::into_inner) gives it back and
/// dropping the `BoundedRng` releases it.
#[derive(Debug)]
pub struct BoundedRng<R> {
    source: R,
    reduction: Reduction,
}

impl BoundedRng<OsRng> {
    /// A bounded RNG over the operating system's secure random source.
    pub fn from_os() -> Self {
        Self::new(OsRng)
    }
}

impl Default for BoundedRng<OsRng> {
    fn default() -> Self {
        Self::from_os()
    }
}

impl<R: TryCryptoRng> BoundedRng<R> {
    /// Wrap a caller-supplied secure source.
    ///
    /// Mostly useful for deterministic testing with a seeded CSPRNG such as
    /// `rand_chacha::ChaCha8Rng`.
    pub fn new(source: R) -> Self {
        Self {
            source,
            reduction: Reduction::default(),
        }
    }

    /// Select the reduction strategy.
    pub fn with_reduction(mut self, reduction: Reduction) -> Self {
        self.reduction = reduction;
        self
    }

    /// Release the entropy source.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Draw a uniformly distributed index in `[0, limit)`.
    ///
    /// Fails with [`DrawError::InvalidArgument`] when `limit == 0`, and with
    /// [`DrawError::Entropy`] if the source fails.
    pub fn next_index(&mut self, limit: usize) -> Result<usize, DrawError> {
        if limit == 0 {
            return Err(DrawError::invalid("limit must be >= 1 (got 0)"));
        }
        let limit = limit as u64;
        let bits = match self.reduction {
            Reduction::FullWidth if limit <= 1 << 32 => 32,
            Reduction::FullWidth => 64,
            Reduction::NarrowBytes => narrow_bytes(limit) * 8,
        };
        let zone = rejection_zone(bits, limit);

        loop {
            let raw = self.draw_bits(bits)?;
            if u128::from(raw) < zone {
                return Ok((raw % limit) as usize);
            }
            log::trace!("rejected draw {raw} (zone {zone}, limit {limit}, {bits} bits)");
        }
    }

    /// Draw exactly `bits` (a multiple of 8, at most 64) bits of entropy.
    fn draw_bits(&mut self, bits: u32) -> Result<u64, DrawError> {
        match bits {
            32 => self
                .source
                .try_next_u32()
                .map(u64::from)
                .map_err(|e| DrawError::Entropy(e.to_string())),
            64 => self
                .source
                .try_next_u64()
                .map_err(|e| DrawError::Entropy(e.to_string())),
            _ => {
                let n = (bits / 8) as usize;
                let mut buf = [0u8; 8];
                self.source
                    .try_fill_bytes(&mut buf[8 - n..])
                    .map_err(|e| DrawError::Entropy(e.to_string()))?;
                Ok(u64::from_be_bytes(buf))
            }
        }
    }
}

/// Largest multiple of `limit` that fits in `bits` bits (exclusive bound of
/// accepted draws).
fn rejection_zone(bits: u32, limit: u64) -> u128 {
    let span = 1u128 << bits;
    span / u128::from(limit) * u128::from(limit)
}

/// Bytes needed to represent every value in `[0, limit)`; at least one.
fn narrow_bytes(limit: u64) -> u32 {
    let max = limit - 1;
    let used_bits = u64::BITS - max.leading_zeros();
    used_bits.div_ceil(8).max(1)
}

/// Replays fixed words, so tests can pin down exact draw sequences.
#[cfg(test)]
pub(crate) struct Scripted(pub(crate) std::collections::VecDeque<u32>);

#[cfg(test)]
impl Scripted {
    pub(crate) fn new(words: impl IntoIterator<Item = u32>) -> Self {
        Self(words.into_iter().collect())
    }
}

#[cfg(test)]
impl rand::RngCore for Scripted {
    fn next_u32(&mut self) -> u32 {
        self.0.pop_front().expect("script exhausted")
    }
    fn next_u64(&mut self) -> u64 {
        u64::from(self.next_u32())
    }
    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for b in dst {
            *b = self.next_u32() as u8;
        }
    }
}

#[cfg(test)]
impl rand::CryptoRng for Scripted {}
