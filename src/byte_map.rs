//! ByteMap: chained hash map over byte-slice keys and values.

use crate::bucket::{BucketStore, Entry};
use crate::error::{MapError, Result};
use crate::hash::hash32;
use crate::tiers;
use crate::value::{try_copy, Disposer, Value};
use core::fmt;
use core::ops::ControlFlow;

/// Tier used by [`ByteMap::new`].
pub const DEFAULT_TIER: usize = 0;

/// Byte-keyed map holding owned copies or borrowed `'a` slices as values.
///
/// Keys are always copied in. Values are either copied (`insert`,
/// `update`) or borrowed from the caller for `'a` (`insert_borrowed`,
/// `update_borrowed`). Capacity follows the prime ladder in
/// [`tiers`](crate::tiers) and advances one tier whenever the element
/// count reaches the bucket count.
pub struct ByteMap<'a> {
    store: BucketStore<'a>,
    len: usize,
    disposer: Option<Box<dyn Disposer + 'a>>,
}

impl<'a> ByteMap<'a> {
    pub fn new() -> Self {
        Self::with_tier(DEFAULT_TIER)
    }

    /// Create an empty map at `tier`, clamped to the top of the ladder.
    ///
    /// Aborts on allocation failure like other std collections; use
    /// [`try_with_tier`](Self::try_with_tier) to observe it instead.
    pub fn with_tier(tier: usize) -> Self {
        Self {
            store: BucketStore::new(tier),
            len: 0,
            disposer: None,
        }
    }

    pub fn try_with_tier(tier: usize) -> Result<Self> {
        Ok(Self {
            store: BucketStore::try_new(tier)?,
            len: 0,
            disposer: None,
        })
    }

    /// Create an empty map whose discarded owned values go to `disposer`.
    pub fn with_disposer<D>(tier: usize, disposer: D) -> Self
    where
        D: Disposer + 'a,
    {
        let mut map = Self::with_tier(tier);
        map.disposer = Some(Box::new(disposer));
        map
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current bucket count.
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Current position on the capacity ladder.
    pub fn tier(&self) -> usize {
        self.store.tier()
    }

    /// Value bytes for `key`, or [`MapError::NotFound`].
    pub fn select(&self, key: &[u8]) -> Result<&[u8]> {
        self.get(key).ok_or(MapError::NotFound)
    }

    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.get_value(key).map(Value::as_bytes)
    }

    /// Stored value for `key`, including whether the map owns it.
    pub fn get_value(&self, key: &[u8]) -> Option<&Value<'a>> {
        self.store.find(hash32(key), key).map(|e| &e.value)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.store.find(hash32(key), key).is_some()
    }

    /// Insert a copy of `value` under `key`. Fails with
    /// [`MapError::DuplicateKey`] if `key` is present; never overwrites.
    pub fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let hash = hash32(key);
        if self.store.find(hash, key).is_some() {
            return Err(MapError::DuplicateKey);
        }
        let value = Value::Owned(try_copy(value)?);
        self.insert_new(hash, key, value)
    }

    /// Insert a reference to caller-owned `value` under `key`.
    pub fn insert_borrowed(&mut self, key: &[u8], value: &'a [u8]) -> Result<()> {
        let hash = hash32(key);
        if self.store.find(hash, key).is_some() {
            return Err(MapError::DuplicateKey);
        }
        self.insert_new(hash, key, Value::Borrowed(value))
    }

    /// Replace the owned value stored under `key`, or insert it if absent.
    ///
    /// Fails with [`MapError::OwnershipMismatch`] if `key` currently holds
    /// a borrowed value.
    pub fn update(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let hash = hash32(key);
        let Some(entry) = self.store.find_mut(hash, key) else {
            let value = Value::Owned(try_copy(value)?);
            return self.insert_new(hash, key, value);
        };
        if !entry.value.is_owned() {
            return Err(MapError::OwnershipMismatch);
        }
        let fresh = Value::Owned(try_copy(value)?);
        let old = std::mem::replace(&mut entry.value, fresh);
        discard(&mut self.disposer, old);
        Ok(())
    }

    /// Replace the borrowed value stored under `key`, or insert it if absent.
    ///
    /// Fails with [`MapError::OwnershipMismatch`] if `key` currently holds
    /// an owned value.
    pub fn update_borrowed(&mut self, key: &[u8], value: &'a [u8]) -> Result<()> {
        let hash = hash32(key);
        match self.store.find_mut(hash, key) {
            Some(entry) if entry.value.is_owned() => Err(MapError::OwnershipMismatch),
            Some(entry) => {
                entry.value = Value::Borrowed(value);
                Ok(())
            }
            None => self.insert_new(hash, key, Value::Borrowed(value)),
        }
    }

    /// Remove `key`. Remaining entries of its bucket keep their order.
    pub fn delete(&mut self, key: &[u8]) -> Result<()> {
        let entry = self
            .store
            .remove(hash32(key), key)
            .ok_or(MapError::NotFound)?;
        self.len -= 1;
        // Unlinked and counted before any user code runs.
        discard(&mut self.disposer, entry.value);
        Ok(())
    }

    /// Visit every entry in bucket order, then insertion order within a
    /// bucket. Stops at, and returns, the first `Break`.
    pub fn foreach<B, F>(&self, mut f: F) -> ControlFlow<B>
    where
        F: FnMut(&[u8], &[u8]) -> ControlFlow<B>,
    {
        self.iter().try_for_each(|(k, v)| f(k, v))
    }

    pub fn iter(&self) -> Iter<'_, 'a> {
        let empty: &[Entry<'a>] = &[];
        Iter {
            chains: self.store.chains().iter(),
            current: empty.iter(),
            remaining: self.len,
        }
    }

    /// Drop every entry, keeping the current tier.
    pub fn purge(&mut self) {
        let Self {
            store,
            len,
            disposer,
        } = self;
        *len = 0;
        for chain in store.take_chains() {
            for entry in chain {
                discard(disposer, entry.value);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn chain_lengths(&self) -> Vec<usize> {
        self.store.chains().iter().map(Vec::len).collect()
    }

    fn insert_new(&mut self, hash: u32, key: &[u8], value: Value<'a>) -> Result<()> {
        let entry = Entry {
            key: try_copy(key)?,
            value,
            hash,
        };
        self.store.try_push(entry)?;
        self.len += 1;
        self.maybe_grow();
        Ok(())
    }

    fn maybe_grow(&mut self) {
        if self.len < self.store.capacity() {
            return;
        }
        let Some(next) = tiers::next_tier(self.store.tier()) else {
            return;
        };
        match self.store.try_regrow(next) {
            Ok(fresh) => {
                log::debug!(
                    "kvmap: grew from {} to {} buckets at {} entries",
                    self.store.capacity(),
                    fresh.capacity(),
                    self.len
                );
                self.store = fresh;
            }
            Err(err) => log::debug!(
                "kvmap: growth to tier {} abandoned at {} entries: {}",
                next,
                self.len,
                err
            ),
        }
    }
}

/// Release a value the map no longer holds. Only owned values reach the disposer.
fn discard<'a>(disposer: &mut Option<Box<dyn Disposer + 'a>>, value: Value<'a>) {
    if let (Value::Owned(bytes), Some(d)) = (value, disposer.as_mut()) {
        d.dispose(bytes);
    }
}

impl Default for ByteMap<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ByteMap<'_> {
    fn drop(&mut self) {
        if self.disposer.is_some() {
            self.purge();
        }
    }
}

impl fmt::Debug for ByteMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteMap")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("tier", &self.tier())
            .field("disposer", &self.disposer.is_some())
            .finish()
    }
}

/// Iterator over `(key, value)` byte slices in bucket order.
pub struct Iter<'m, 'a> {
    chains: core::slice::Iter<'m, Vec<Entry<'a>>>,
    current: core::slice::Iter<'m, Entry<'a>>,
    remaining: usize,
}

impl<'m, 'a> Iterator for Iter<'m, 'a> {
    type Item = (&'m [u8], &'m [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.current.next() {
                self.remaining -= 1;
                return Some((&e.key[..], e.value.as_bytes()));
            }
            self.current = self.chains.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_, '_> {}

impl<'m, 'a> IntoIterator for &'m ByteMap<'a> {
    type Item = (&'m [u8], &'m [u8]);
    type IntoIter = Iter<'m, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
