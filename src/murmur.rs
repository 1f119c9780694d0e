//! 64-bit `MurmurHash64A` digest used to place keys

/// Multiplier of the 64-bit murmur mix
const M: u64 = 0xc6a4_a793_5bd1_e995;
/// Shift applied between multiplications
const R: u32 = 47;
/// Seed of every digest; the table never reseeds
const SEED: u64 = 0;

/// Hashes `key` with `MurmurHash64A` (seed 0, little-endian blocks).
///
/// The digest of the empty string is `0`.
///
/// ```rust
/// assert_eq!(hood::murmur64(""), 0);
/// assert_eq!(hood::murmur64("a"), hood::murmur64("a"));
/// ```
#[must_use]
pub fn murmur64(key: &str) -> u64 {
    murmur64_bytes(key.as_bytes())
}

/// Byte-level variant of [`murmur64`]
#[must_use]
pub fn murmur64_bytes(data: &[u8]) -> u64 {
    let len = u64::try_from(data.len()).unwrap_or(u64::MAX);
    let mut h = SEED ^ len.wrapping_mul(M);

    let mut blocks = data.chunks_exact(8);
    for block in blocks.by_ref() {
        let mut word = [0u8; 8];
        word.copy_from_slice(block);
        let mut k = u64::from_le_bytes(word);
        k = k.wrapping_mul(M);
        k ^= k >> R;
        k = k.wrapping_mul(M);
        h ^= k;
        h = h.wrapping_mul(M);
    }

    let tail = blocks.remainder();
    if !tail.is_empty() {
        for (offset, &byte) in tail.iter().enumerate().rev() {
            h ^= u64::from(byte) << (offset.wrapping_mul(8));
        }
        h = h.wrapping_mul(M);
    }

    h ^= h >> R;
    h = h.wrapping_mul(M);
    h ^= h >> R;
    h
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_string() {
        assert_eq!(murmur64(""), 0);
        assert_eq!(murmur64(""), murmur64_bytes(&[]));
    }

    #[test]
    fn test_known_digests() {
        // tail only, full block only, block plus tail
        assert_eq!(murmur64("a"), 0x0717_17d2_d36b_6b11);
        assert_eq!(murmur64("b"), 0xea8b_fc7d_922a_2a37);
        assert_eq!(murmur64("hello"), 0x1e68_d17c_457b_f117);
        assert_eq!(murmur64("abcdefgh"), 0xafdb_0257_ff41_aa98);
        assert_eq!(murmur64("abcdefgh12"), 0x6076_6cd9_cbd5_01fd);
        assert_eq!(murmur64("Robin Hood hashing"), 0x4ac4_3dae_2af3_e208);
    }

    #[test]
    fn test_length_is_mixed_in() {
        assert_ne!(murmur64_bytes(&[0]), murmur64_bytes(&[0, 0]));
        assert_ne!(murmur64_bytes(&[0; 8]), murmur64_bytes(&[0; 16]));
    }

    proptest! {
        #[test]
        fn prop_deterministic(key in ".*") {
            let digest = murmur64(&key);
            prop_assert_eq!(digest, murmur64(&key));
            prop_assert_eq!(digest, murmur64_bytes(key.as_bytes()));
        }
    }
}
