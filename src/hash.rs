//! Seeded shift-add-xor byte hash (djb2 xor variant) used for bucket placement.

/// Starting accumulator value.
pub const HASH_SEED: u32 = 5381;

/// Hash `bytes` into 32 bits. Deterministic and order-sensitive; not
/// collision resistant. The empty slice hashes to [`HASH_SEED`].
#[inline]
pub fn hash32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(HASH_SEED, |h, &b| {
        h.wrapping_add(h << 5) ^ u32::from(b)
    })
}
