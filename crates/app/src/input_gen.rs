//! Demo payload generation.
//!
//! The `--demo` mode needs a payload with visible structure: a mix of
//! text-like, repetitive, and random sections, generated from a seed so
//! runs are reproducible. The payload never contains 0x00: the
//! data-link trim cannot recover trailing zeros, and at a fragment
//! boundary any byte can end up trailing.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate a deterministic, zero-free sample payload.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    let mut remaining = size_bytes;
    while remaining > 0 {
        let section = remaining.min(512);
        let kind: u8 = rng.gen_range(0..3);

        match kind {
            // Text-like section
            0 => {
                let alphabet = b"abcdefghijklmnopqrstuvwxyz .!,\n";
                for _ in 0..section {
                    let idx = rng.gen_range(0..alphabet.len());
                    data.push(alphabet[idx]);
                }
            }

            // Repetitive section
            1 => {
                let byte_value: u8 = rng.gen_range(1..=255);
                data.extend(std::iter::repeat(byte_value).take(section));
            }

            // Random section
            _ => {
                for _ in 0..section {
                    data.push(rng.gen_range(1..=255u8));
                }
            }
        }

        remaining -= section;
    }

    data.truncate(size_bytes);
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_size() {
        for size in [0usize, 1, 100, 5000, 20_000] {
            assert_eq!(generate_sample_data(7, size).len(), size);
        }
    }

    #[test]
    fn test_determinism() {
        assert_eq!(generate_sample_data(42, 4000), generate_sample_data(42, 4000));
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(generate_sample_data(1, 1000), generate_sample_data(2, 1000));
    }

    #[test]
    fn test_no_zero_bytes() {
        for seed in 0..20 {
            let data = generate_sample_data(seed, 6000);
            assert!(data.iter().all(|&b| b != 0));
        }
    }
}
