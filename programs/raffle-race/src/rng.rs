use anchor_lang::prelude::*;

use crate::error::RaceError;

/// Mixing function with strong avalanche properties
/// Each bit in the output has a ~50% chance of flipping when any input bit changes.
/// Based on splitmix64 algorithm used in high-quality PRNGs.
pub fn mix(a: u64, b: u64) -> u64 {
    let mut z = a.wrapping_add(b);

    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z = z ^ (z >> 31);

    z
}

/// Deterministic random stream over the splitmix64 mixing function.
/// Not cryptographically secure; the draw is promotional, not adversarial,
/// and the seed is published so anyone can replay it.
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        // splitmix64: advance by the golden-ratio increment, then finalize
        self.state = self.state.wrapping_add(0x9e3779b97f4a7c15);
        mix(self.state, 0)
    }
}

/// Maps a random draw to a range without introducing statistical bias
/// Standard modulo operations can bias results when the range isn't a power of 2.
/// This function uses specialized techniques based on range size to ensure fairness.
pub fn unbiased_range(rng: &mut Rng, range: u64) -> Result<u64> {
    if range == 0 {
        return Err(RaceError::Overflow.into());
    }

    // If range is a power of 2, we can use a simple mask which is unbiased
    if range.is_power_of_two() {
        return Ok(rng.next_u64() & (range - 1));
    }

    // For small ranges, simple modulo is fine as bias is minimal
    if range <= 256 {
        return Ok(rng.next_u64() % range);
    }

    // Find threshold value to ensure unbiased selection
    let threshold = u64::MAX - (u64::MAX % range);

    // Use rejection sampling with a limit on computational cost
    let mut value = rng.next_u64();

    // Cap iterations to ensure reasonable gas costs
    const MAX_ATTEMPTS: u8 = 3;

    for _ in 0..MAX_ATTEMPTS {
        // If value is below threshold, we can use modulo safely
        if value < threshold {
            return Ok(value % range);
        }

        value = rng.next_u64();
    }

    // Fallback case - the bias is minimal after this many redraws
    Ok(value % range)
}

/// Uniform Fisher-Yates permutation of `0..n`.
pub fn shuffle(rng: &mut Rng, n: u32) -> Result<Vec<u32>> {
    let mut perm: Vec<u32> = (0..n).collect();
    for i in (1..perm.len()).rev() {
        let j = unbiased_range(rng, (i + 1) as u64)? as usize;
        perm.swap(i, j);
    }
    Ok(perm)
}

/// Draws `k` distinct winner indices out of `0..n`: a uniformly random
/// permutation truncated to its first `k` entries. `k` greater than `n`
/// returns the whole permutation.
pub fn select_winners(seed: u64, n: u32, k: u32) -> Result<Vec<u32>> {
    let mut rng = Rng::new(seed);
    let mut perm = shuffle(&mut rng, n)?;
    perm.truncate(k as usize);
    Ok(perm)
}
