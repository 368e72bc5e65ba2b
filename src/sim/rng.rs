//! Level-generation random stream
//!
//! xorshift32, so that a seed produces the same layout on every platform.
//! Every generator draws from the one instance owned by `Game`; the draw
//! order inside each generator is part of its contract.

use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

/// Seed used when 0 is requested (xorshift has a fixed point at 0)
pub const DEFAULT_SEED: u32 = 123_456_789;

/// xorshift32 generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XorShift32 {
    state: u32,
}

impl Default for XorShift32 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl XorShift32 {
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { DEFAULT_SEED } else { seed };
        Self { state }
    }

    /// Reseed in place
    pub fn seed(&mut self, seed: u32) {
        *self = Self::new(seed);
    }

    /// Uniform in [0, 1], divided in f32
    pub fn next_f32(&mut self) -> f32 {
        self.next_u32() as f32 / u32::MAX as f32
    }

    /// Uniform in [0, n); 0 when n is 0
    #[inline]
    pub fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.next_u32() % n
    }

    /// Uniform index in [0, n) for slice access
    #[inline]
    pub fn index(&mut self, n: usize) -> usize {
        self.below(n as u32) as usize
    }

    /// True with probability 1/2, consuming one draw
    #[inline]
    pub fn coin(&mut self) -> bool {
        self.below(2) == 0
    }
}

impl RngCore for XorShift32 {
    /// Advance the state and return it
    #[inline]
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.next_u32());
        let hi = u64::from(self.next_u32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for XorShift32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
