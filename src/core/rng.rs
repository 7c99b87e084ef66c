//! Deterministic teleport RNG.
//!
//! Teleport destinations must match the reference implementation bit for
//! bit, so the generator is fixed: PCG32 (64-bit LCG state, XSH-RR output)
//! seeded from the turn counter, with the reference bounded draw.
//!
//! ## Key Features
//!
//! - **Deterministic**: same turn + same stream = same sequence
//! - **Replayable**: seeding only depends on the turn number
//! - **Unbiased bounds**: rejection sampling below `(-bound) % bound`
//!
//! ```
//! use rust_wordgrid::core::TeleportRng;
//!
//! let mut a = TeleportRng::for_turn(5, TeleportRng::DEFAULT_STREAM);
//! let mut b = TeleportRng::for_turn(5, TeleportRng::DEFAULT_STREAM);
//!
//! assert_eq!(a.bounded(7), b.bounded(7));
//! ```

use rand::RngCore;
use rand_pcg::Pcg32;

/// PCG32 with the reference bounded-range draw.
#[derive(Clone, Debug)]
pub struct TeleportRng {
    inner: Pcg32,
    seed: u64,
}

impl TeleportRng {
    /// Stream selector used unless `EngineConfig` overrides it.
    pub const DEFAULT_STREAM: u64 = 0x0a02_bdbf_7bb3_c0a7;

    /// Create a generator from a raw seed and stream.
    #[must_use]
    pub fn new(seed: u64, stream: u64) -> Self {
        Self {
            inner: Pcg32::new(seed, stream),
            seed,
        }
    }

    /// Create the generator for a turn.
    #[must_use]
    pub fn for_turn(turn: u32, stream: u64) -> Self {
        Self::new(u64::from(turn), stream)
    }

    /// Next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    /// Uniform value in `0..bound`.
    ///
    /// Outputs below `2^32 % bound` are rejected, so the modulo that
    /// follows carries no bias. `bound` must be non-zero.
    pub fn bounded(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0, "bounded() needs a non-zero bound");
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let r = self.next_u32();
            if r >= threshold {
                return r % bound;
            }
        }
    }

    /// Uniform index into a collection of `len` elements.
    ///
    /// Returns `None` for an empty collection (and for lengths that do not
    /// fit the 32-bit generator).
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        let bound = u32::try_from(len).ok().filter(|&b| b > 0)?;
        Some(self.bounded(bound) as usize)
    }

    /// The seed this generator was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
