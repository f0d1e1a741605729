//! Bucket store: a fixed array of insertion-ordered chains.

use crate::tiers;
use crate::value::Value;
use std::collections::TryReserveError;

#[cfg(test)]
thread_local! {
    static FAIL_NEXT_REGROW: core::cell::Cell<bool> = const { core::cell::Cell::new(false) };
}

/// Make the next `try_regrow` on this thread fail before allocating.
#[cfg(test)]
pub(crate) fn fail_next_regrow() {
    FAIL_NEXT_REGROW.with(|f| f.set(true));
}

#[derive(Debug)]
pub(crate) struct Entry<'a> {
    pub(crate) key: Box<[u8]>,
    pub(crate) value: Value<'a>,
    // Placement always uses the stored hash; keys are never rehashed.
    pub(crate) hash: u32,
}

impl<'a> Entry<'a> {
    #[inline]
    fn matches(&self, key: &[u8]) -> bool {
        self.key.len() == key.len() && *self.key == *key
    }
}

pub(crate) type Bucket<'a> = Vec<Entry<'a>>;

#[derive(Debug)]
pub(crate) struct BucketStore<'a> {
    tier: usize,
    buckets: Vec<Bucket<'a>>,
}

impl<'a> BucketStore<'a> {
    pub(crate) fn new(tier: usize) -> Self {
        let tier = tiers::clamp_tier(tier);
        let mut buckets = Vec::new();
        buckets.resize_with(tiers::capacity_of(tier), Vec::new);
        Self { tier, buckets }
    }

    /// Allocate an empty store at `tier` (clamped onto the ladder).
    pub(crate) fn try_new(tier: usize) -> Result<Self, TryReserveError> {
        let tier = tiers::clamp_tier(tier);
        let cap = tiers::capacity_of(tier);
        let mut buckets = Vec::new();
        buckets.try_reserve_exact(cap)?;
        buckets.resize_with(cap, Vec::new);
        Ok(Self { tier, buckets })
    }

    #[inline]
    pub(crate) fn tier(&self) -> usize {
        self.tier
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub(crate) fn slot(&self, hash: u32) -> usize {
        hash as usize % self.buckets.len()
    }

    pub(crate) fn find(&self, hash: u32, key: &[u8]) -> Option<&Entry<'a>> {
        self.buckets[self.slot(hash)].iter().find(|e| e.matches(key))
    }

    pub(crate) fn find_mut(&mut self, hash: u32, key: &[u8]) -> Option<&mut Entry<'a>> {
        let slot = self.slot(hash);
        self.buckets[slot].iter_mut().find(|e| e.matches(key))
    }

    /// Append to the entry's chain. The caller has already ruled out a
    /// duplicate key; on failure the store is unchanged.
    pub(crate) fn try_push(&mut self, entry: Entry<'a>) -> Result<(), TryReserveError> {
        let slot = self.slot(entry.hash);
        let chain = &mut self.buckets[slot];
        chain.try_reserve(1)?;
        chain.push(entry);
        Ok(())
    }

    /// Unlink the entry for `key`, keeping the rest of its chain in order.
    pub(crate) fn remove(&mut self, hash: u32, key: &[u8]) -> Option<Entry<'a>> {
        let slot = self.slot(hash);
        let chain = &mut self.buckets[slot];
        let pos = chain.iter().position(|e| e.matches(key))?;
        Some(chain.remove(pos))
    }

    /// Take every chain out of the store, leaving empty buckets behind.
    pub(crate) fn take_chains(&mut self) -> impl Iterator<Item = Bucket<'a>> + '_ {
        self.buckets.iter_mut().map(std::mem::take)
    }

    pub(crate) fn chains(&self) -> &[Bucket<'a>] {
        &self.buckets
    }

    /// Build a store one tier up holding every entry of `self`.
    ///
    /// All allocation happens before any entry moves, so on `Err` the
    /// original store still holds everything it did before the call.
    pub(crate) fn try_regrow(&mut self, tier: usize) -> Result<BucketStore<'a>, TryReserveError> {
        #[cfg(test)]
        {
            if FAIL_NEXT_REGROW.with(|f| f.replace(false)) {
                return Err(Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err());
            }
        }
        let mut fresh = BucketStore::try_new(tier)?;

        let mut sizes: Vec<usize> = Vec::new();
        sizes.try_reserve_exact(fresh.capacity())?;
        sizes.resize(fresh.capacity(), 0);
        for e in self.buckets.iter().flatten() {
            sizes[fresh.slot(e.hash)] += 1;
        }
        for (chain, &n) in fresh.buckets.iter_mut().zip(&sizes) {
            chain.try_reserve_exact(n)?;
        }

        for chain in self.buckets.iter_mut() {
            for e in chain.drain(..) {
                let slot = fresh.slot(e.hash);
                // Capacity reserved above: this push does not allocate.
                fresh.buckets[slot].push(e);
            }
        }
        Ok(fresh)
    }
}
