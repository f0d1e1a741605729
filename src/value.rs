//! Stored values and their disposal.

use std::collections::TryReserveError;

/// A value held by the map, tagged with who owns its storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<'a> {
    /// Copied into the map; released (or handed to the disposer) when the
    /// entry is removed, replaced, or the map is purged or dropped.
    Owned(Box<[u8]>),
    /// Caller-owned; the map keeps the reference only.
    Borrowed(&'a [u8]),
}

impl<'a> Value<'a> {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Value::Owned(b) => b,
            Value::Borrowed(b) => b,
        }
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, Value::Owned(_))
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// Receives owned values as the map discards them.
///
/// Any `FnMut(Box<[u8]>)` is a disposer. Borrowed values are never passed
/// here since the map does not own them.
pub trait Disposer {
    fn dispose(&mut self, value: Box<[u8]>);
}

impl<F> Disposer for F
where
    F: FnMut(Box<[u8]>),
{
    #[inline]
    fn dispose(&mut self, value: Box<[u8]>) {
        self(value)
    }
}

/// Copy `bytes` into a fresh allocation, reporting failure instead of aborting.
pub(crate) fn try_copy(bytes: &[u8]) -> Result<Box<[u8]>, TryReserveError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(bytes.len())?;
    buf.extend_from_slice(bytes);
    Ok(buf.into_boxed_slice())
}
