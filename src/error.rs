use std::collections::TryReserveError;
use thiserror::Error;

/// Failures reported by [`ByteMap`](crate::ByteMap) operations.
///
/// Every failure leaves the map exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The key is not present.
    #[error("key not found")]
    NotFound,

    /// `insert` on a key that is already present.
    #[error("duplicate key")]
    DuplicateKey,

    /// `update` tried to switch a value between owned and borrowed storage.
    #[error("value ownership mode mismatch")]
    OwnershipMismatch,

    /// A memory request failed.
    #[error("allocation failure: {0}")]
    Alloc(#[from] TryReserveError),
}

pub type Result<T> = std::result::Result<T, MapError>;
