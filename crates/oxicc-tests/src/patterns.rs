//! Seeded test data
//!
//! Every generator takes a seed so failures reproduce.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Every 8-bit code value in order
pub fn ramp_u8() -> Vec<u8> {
    (0..=255).collect()
}

/// Random 8-bit samples
pub fn random_u8_line(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut line = vec![0u8; len];
    rng.fill_bytes(&mut line);
    line
}

/// Random floats in [0, 1]
pub fn random_unit_line(seed: u64, len: usize) -> Vec<f32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(0.0..=1.0)).collect()
}

/// Copy of `data` with `count` random bytes overwritten
///
/// The 4-byte size field is left alone so most mutants get past the header
/// checks and exercise the tag parsers.
pub fn mutate(data: &[u8], seed: u64, count: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = data.to_vec();
    if out.len() <= 4 {
        return out;
    }
    for _ in 0..count {
        let pos = rng.gen_range(4..out.len());
        out[pos] = rng.r#gen();
    }
    out
}

/// Copy of `data` cut to a random length
pub fn truncate(data: &[u8], seed: u64) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let len = rng.gen_range(0..data.len().max(1));
    data[..len].to_vec()
}
