//! Typed adapters over the byte-oriented [`ByteMap`] API.
//!
//! These add no state. String keys are matched including their NUL
//! terminator. Integers are stored big-endian so that byte order of the
//! encoding agrees with numeric order.

use crate::byte_map::ByteMap;
use crate::error::{MapError, Result};
use core::ffi::CStr;

/// Width of an encoded integer.
pub const U64_WIDTH: usize = core::mem::size_of::<u64>();

/// Big-endian encoding of `v`.
#[inline]
pub fn encode_u64(v: u64) -> [u8; U64_WIDTH] {
    v.to_be_bytes()
}

/// Decode a big-endian integer; `None` unless `bytes` is exactly 8 bytes wide.
#[inline]
pub fn decode_u64(bytes: &[u8]) -> Option<u64> {
    let raw: [u8; U64_WIDTH] = bytes.try_into().ok()?;
    Some(u64::from_be_bytes(raw))
}

impl<'a> ByteMap<'a> {
    // String key -> blob value.

    pub fn select_str(&self, key: &CStr) -> Result<&[u8]> {
        self.select(key.to_bytes_with_nul())
    }

    pub fn insert_str(&mut self, key: &CStr, value: &[u8]) -> Result<()> {
        self.insert(key.to_bytes_with_nul(), value)
    }

    pub fn insert_str_borrowed(&mut self, key: &CStr, value: &'a [u8]) -> Result<()> {
        self.insert_borrowed(key.to_bytes_with_nul(), value)
    }

    pub fn update_str(&mut self, key: &CStr, value: &[u8]) -> Result<()> {
        self.update(key.to_bytes_with_nul(), value)
    }

    pub fn update_str_borrowed(&mut self, key: &CStr, value: &'a [u8]) -> Result<()> {
        self.update_borrowed(key.to_bytes_with_nul(), value)
    }

    pub fn delete_str(&mut self, key: &CStr) -> Result<()> {
        self.delete(key.to_bytes_with_nul())
    }

    // Integer key -> blob value.

    pub fn select_u64(&self, key: u64) -> Result<&[u8]> {
        self.select(&encode_u64(key))
    }

    pub fn insert_u64(&mut self, key: u64, value: &[u8]) -> Result<()> {
        self.insert(&encode_u64(key), value)
    }

    pub fn insert_u64_borrowed(&mut self, key: u64, value: &'a [u8]) -> Result<()> {
        self.insert_borrowed(&encode_u64(key), value)
    }

    pub fn update_u64(&mut self, key: u64, value: &[u8]) -> Result<()> {
        self.update(&encode_u64(key), value)
    }

    pub fn update_u64_borrowed(&mut self, key: u64, value: &'a [u8]) -> Result<()> {
        self.update_borrowed(&encode_u64(key), value)
    }

    pub fn delete_u64(&mut self, key: u64) -> Result<()> {
        self.delete(&encode_u64(key))
    }

    // Blob key -> integer value.

    /// Integer stored under `key`. A value of the wrong width reads as
    /// [`MapError::NotFound`].
    pub fn select_u64_value(&self, key: &[u8]) -> Result<u64> {
        decode_u64(self.select(key)?).ok_or(MapError::NotFound)
    }

    pub fn insert_u64_value(&mut self, key: &[u8], value: u64) -> Result<()> {
        self.insert(key, &encode_u64(value))
    }

    pub fn update_u64_value(&mut self, key: &[u8], value: u64) -> Result<()> {
        self.update(key, &encode_u64(value))
    }

    pub fn delete_u64_value(&mut self, key: &[u8]) -> Result<()> {
        self.delete(key)
    }

    // Integer key -> integer value.

    pub fn select_u64_u64(&self, key: u64) -> Result<u64> {
        self.select_u64_value(&encode_u64(key))
    }

    pub fn insert_u64_u64(&mut self, key: u64, value: u64) -> Result<()> {
        self.insert(&encode_u64(key), &encode_u64(value))
    }

    pub fn update_u64_u64(&mut self, key: u64, value: u64) -> Result<()> {
        self.update(&encode_u64(key), &encode_u64(value))
    }

    pub fn delete_u64_u64(&mut self, key: u64) -> Result<()> {
        self.delete_u64(key)
    }
}
