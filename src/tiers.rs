//! Fixed ladder of prime bucket counts.
//!
//! A map's capacity is always one of these values. Growth advances one
//! tier at a time and stops at the last entry.

/// Bucket counts, ascending. Index into this table is the capacity tier.
pub static PRIME_CAPACITIES: [usize; 72] = [
    3, 7, 11, 17, 23, 29, 37, 47, 59, 71, 89, 107, 131, 163, 197, 239, 293, 353, 431, 521, 631,
    761, 919, 1103, 1327, 1597, 1931, 2333, 2801, 3371, 4049, 4861, 5839, 7013, 8419, 10103,
    12143, 14591, 17519, 21023, 25229, 30293, 36353, 43627, 52361, 62851, 75431, 90523, 108631,
    130363, 156437, 187751, 225307, 270371, 324449, 389357, 467237, 560689, 672827, 807403,
    968897, 1162687, 1395263, 1674319, 2009191, 2411033, 2893249, 3471899, 4166287, 4999559,
    5999471, 7199369,
];

/// Highest valid tier.
pub const MAX_TIER: usize = PRIME_CAPACITIES.len() - 1;

/// Clamp an arbitrary tier hint onto the ladder.
#[inline]
pub fn clamp_tier(tier: usize) -> usize {
    tier.min(MAX_TIER)
}

/// Bucket count for a (clamped) tier.
#[inline]
pub fn capacity_of(tier: usize) -> usize {
    PRIME_CAPACITIES[clamp_tier(tier)]
}

/// The tier after `tier`, or `None` once the ladder is exhausted.
#[inline]
pub fn next_tier(tier: usize) -> Option<usize> {
    if tier >= MAX_TIER {
        None
    } else {
        Some(tier + 1)
    }
}
