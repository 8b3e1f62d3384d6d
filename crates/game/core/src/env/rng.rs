//! RNG oracle for dice rolls.
//!
//! Combat draws all of its randomness through [`RngOracle`], so a seeded
//! generator reproduces a whole session and a scripted one pins individual
//! die faces in tests.

/// Source of uniformly distributed random numbers.
pub trait RngOracle {
    /// Generate the next random u32 value.
    fn next_u32(&mut self) -> u32;

    /// Roll a die with N sides (1-N inclusive).
    fn roll_die(&mut self, sides: u32) -> u32 {
        (self.next_u32() % sides.max(1)) + 1
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// Implementation of the PCG-XSH-RR variant, which produces 32-bit output
/// from 64-bit state.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator whose sequence is fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            state: mix_seed(seed),
        }
    }

    /// Advance the PCG state by one step.
    ///
    /// Uses LCG (Linear Congruential Generator) formula:
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        // XOR upper bits with lower bits, shift right
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;

        // Use upper bits to determine rotation amount
        let rot = (state >> 59) as u32;

        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

/// Replays a fixed sequence of die faces, wrapping around when exhausted.
///
/// Faces are returned verbatim by [`RngOracle::roll_die`] as long as they fit
/// the die being rolled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedRng {
    faces: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        let faces: Vec<u32> = faces.into_iter().collect();
        Self {
            faces: if faces.is_empty() { vec![1] } else { faces },
            cursor: 0,
        }
    }

    /// Number of faces consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        let face = self.faces[self.cursor % self.faces.len()];
        self.cursor += 1;
        face.saturating_sub(1)
    }
}

/// Spreads the bits of a user-provided seed (SplitMix64 finalizer).
///
/// Small or sequential seeds such as `1, 2, 3` would otherwise start the
/// generator in nearly identical states.
pub fn mix_seed(seed: u64) -> u64 {
    let mut hash = seed.wrapping_add(0x9e3779b97f4a7c15);
    hash ^= hash >> 30;
    hash = hash.wrapping_mul(0xbf58476d1ce4e5b9);
    hash ^= hash >> 27;
    hash = hash.wrapping_mul(0x94d049bb133111eb);
    hash ^= hash >> 31;
    hash
}
