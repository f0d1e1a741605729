//! kvmap: a single-threaded, chained hash map from byte-slice keys to
//! byte-slice values, with typed adapters for C strings and big-endian
//! `u64`s.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a dictionary that commits to no key or value type and keeps
//!   allocation behavior explicit.
//! - Layers:
//!   - `hash`: seeded 32-bit shift-add-xor hash over bytes.
//!   - `tiers`: static ladder of prime bucket counts.
//!   - `bucket`: fixed array of insertion-ordered chains; every entry
//!     stores its key hash so rehashing never re-reads key bytes.
//!   - `ByteMap<'a>`: select/insert/update/delete/foreach/purge and
//!     growth on top of the bucket store.
//!   - `typed`: `CStr`, `u64`-key and `u64`-value wrappers that only
//!     encode and delegate.
//!
//! Constraints
//! - Single-threaded; no locks or atomics.
//! - Keys are unique; `insert` never overwrites, `update` upserts.
//! - Keys are always copied. A value is either an owned copy or a borrow
//!   of caller data for `'a`; the mode is fixed per key by the call that
//!   created it and `update` cannot switch it.
//! - Every failure leaves the map as it was. Memory exhaustion surfaces as
//!   `MapError::Alloc` rather than aborting.
//!
//! Growth
//! - After each successful insert, `len >= capacity` advances one tier.
//! - The next bucket array and each destination chain are fully allocated
//!   before the first entry moves. If any allocation fails the map keeps
//!   its old array and all entries; the caller is not told.
//! - The last tier never grows. Deletes never shrink.
//!
//! Disposal
//! - An optional `Disposer` receives owned values as they leave the map
//!   (delete, replace, purge, drop). It runs after the entry is unlinked.
//!
//! Notes and non-goals
//! - Iteration order is bucket order, then insertion order within a
//!   bucket. It is not stable across growth.
//! - No persistence, no cryptographic hashing, no shrinking.

mod bucket;
mod byte_map;
mod byte_map_proptest;
mod error;
pub mod hash;
pub mod tiers;
mod typed;
mod value;

// Public surface
pub use byte_map::{ByteMap, Iter, DEFAULT_TIER};
pub use error::{MapError, Result};
pub use typed::{decode_u64, encode_u64, U64_WIDTH};
pub use value::{Disposer, Value};
