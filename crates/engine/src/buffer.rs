//! Byte-range views over the supported buffer representations.
//!
//! Three kinds of storage feed the engine with identical semantics:
//!
//! | Representation | Types |
//! |----------------|-------|
//! | Owned, mutable | `Vec<u8>`, `[u8; N]`, `bytes::BytesMut` |
//! | Immutable text | `str`, `String` |
//! | Shared region  | `bytes::Bytes`, `[u8]` borrowed from any backing memory |
//!
//! Every one of them reduces to a `(data, offset, length)` triple through
//! [`view`].

use bytes::{Bytes, BytesMut};

/// Out-of-range offset/length on a buffer view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("range offset={offset} length={length} out of bounds for buffer of {len} bytes")]
pub struct BufferError {
  pub offset: usize,
  pub length: usize,
  pub len: usize,
}

/// Anything that can be hashed as a contiguous run of bytes.
pub trait Buffer {
  fn as_bytes(&self) -> &[u8];
}

impl Buffer for [u8] {
  #[inline]
  fn as_bytes(&self) -> &[u8] {
    self
  }
}

impl<const N: usize> Buffer for [u8; N] {
  #[inline]
  fn as_bytes(&self) -> &[u8] {
    self
  }
}

impl Buffer for Vec<u8> {
  #[inline]
  fn as_bytes(&self) -> &[u8] {
    self
  }
}

impl Buffer for str {
  #[inline]
  fn as_bytes(&self) -> &[u8] {
    str::as_bytes(self)
  }
}

impl Buffer for String {
  #[inline]
  fn as_bytes(&self) -> &[u8] {
    String::as_bytes(self)
  }
}

impl Buffer for Bytes {
  #[inline]
  fn as_bytes(&self) -> &[u8] {
    self
  }
}

impl Buffer for BytesMut {
  #[inline]
  fn as_bytes(&self) -> &[u8] {
    self
  }
}

impl<B: Buffer + ?Sized> Buffer for &B {
  #[inline]
  fn as_bytes(&self) -> &[u8] {
    (**self).as_bytes()
  }
}

impl<B: Buffer + ?Sized> Buffer for &mut B {
  #[inline]
  fn as_bytes(&self) -> &[u8] {
    (**self).as_bytes()
  }
}

impl<B: Buffer + ?Sized> Buffer for Box<B> {
  #[inline]
  fn as_bytes(&self) -> &[u8] {
    (**self).as_bytes()
  }
}

/// Resolve an optional `(offset, length)` pair against `buf`.
///
/// - both omitted: the whole buffer
/// - only `offset`: from `offset` to the end
/// - only `length`: the first `length` bytes
///
/// # Errors
///
/// [`BufferError`] if the range does not fit inside the buffer.
pub fn view<B: Buffer + ?Sized>(buf: &B, offset: Option<usize>, length: Option<usize>) -> Result<&[u8], BufferError> {
  let bytes = buf.as_bytes();
  let len = bytes.len();
  let offset = offset.unwrap_or(0);
  let length = match length {
    Some(length) => length,
    None => len.saturating_sub(offset),
  };
  let out_of_bounds = BufferError { offset, length, len };
  let end = offset.checked_add(length).ok_or(out_of_bounds)?;
  bytes.get(offset..end).ok_or(out_of_bounds)
}
