//! Digest values.
//!
//! A [`Digest`] is an immutable, fixed-length byte string. The type parameter
//! records which primitive produced it so that digests of different kinds
//! cannot be compared or verified against each other by accident; the
//! kind-generic registry works with [`Erased`] digests instead, where that
//! check becomes the caller's obligation.

use core::{cmp::Ordering, fmt, hash, marker::PhantomData};

use subtle::ConstantTimeEq;
use traits::{MAX_DIGEST_SIZE, VerificationError};
use zeroize::Zeroize;

/// Tag for digests whose producing kind is tracked by the caller.
#[derive(Debug)]
pub enum Erased {}

/// Fixed-length digest produced by the primitive `T` (or [`Erased`]).
///
/// - `==` is constant-time in the digest contents.
/// - `Ord` is plain lexicographic byte order, for sorted containers only.
/// - `Display` prints lowercase hex.
pub struct Digest<T = Erased> {
  bytes: [u8; MAX_DIGEST_SIZE],
  len: u8,
  _kind: PhantomData<fn() -> T>,
}

impl<T> Digest<T> {
  /// Build a digest of `len` bytes by letting `fill` write them.
  #[inline]
  pub(crate) fn from_fn(len: usize, fill: impl FnOnce(&mut [u8])) -> Self {
    debug_assert!(len <= MAX_DIGEST_SIZE);
    let len = len.min(MAX_DIGEST_SIZE);
    let mut bytes = [0u8; MAX_DIGEST_SIZE];
    if let Some(out) = bytes.get_mut(..len) {
      fill(out);
    }
    Self {
      bytes,
      len: len as u8,
      _kind: PhantomData,
    }
  }

  #[inline]
  pub(crate) fn retag<U>(self) -> Digest<U> {
    Digest {
      bytes: self.bytes,
      len: self.len,
      _kind: PhantomData,
    }
  }

  /// Raw digest bytes.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    self.bytes.get(..usize::from(self.len)).unwrap_or_default()
  }

  /// Raw digest bytes as an owned vector.
  #[inline]
  #[must_use]
  pub fn to_raw(&self) -> Vec<u8> {
    self.as_bytes().to_vec()
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    usize::from(self.len)
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Lowercase hex encoding, `2 * len()` characters.
  #[must_use]
  pub fn to_hex(&self) -> String {
    hex::encode(self.as_bytes())
  }

  /// Drop the kind tag.
  #[inline]
  #[must_use]
  pub fn erase(self) -> Digest<Erased> {
    self.retag()
  }

  /// Constant-time check that `self` equals `expected`.
  ///
  /// # Errors
  ///
  /// [`VerificationError`] on mismatch.
  #[inline]
  pub fn verify(&self, expected: &Self) -> Result<(), VerificationError> {
    if self == expected {
      Ok(())
    } else {
      Err(VerificationError::new())
    }
  }
}

impl<T> Clone for Digest<T> {
  #[inline]
  fn clone(&self) -> Self {
    *self
  }
}

impl<T> Copy for Digest<T> {}

impl<T> PartialEq for Digest<T> {
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    self.as_bytes().ct_eq(other.as_bytes()).into()
  }
}

impl<T> Eq for Digest<T> {}

impl<T> PartialOrd for Digest<T> {
  #[inline]
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl<T> Ord for Digest<T> {
  #[inline]
  fn cmp(&self, other: &Self) -> Ordering {
    self.as_bytes().cmp(other.as_bytes())
  }
}

impl<T> hash::Hash for Digest<T> {
  fn hash<H: hash::Hasher>(&self, state: &mut H) {
    self.as_bytes().hash(state);
  }
}

impl<T> AsRef<[u8]> for Digest<T> {
  #[inline]
  fn as_ref(&self) -> &[u8] {
    self.as_bytes()
  }
}

/// Clears the bytes and leaves an empty digest. Used for key material such as
/// a hashed HMAC key; `Digest` is `Copy`, so earlier copies are unaffected.
impl<T> Zeroize for Digest<T> {
  fn zeroize(&mut self) {
    self.bytes.zeroize();
    self.len = 0;
  }
}

impl<T> fmt::Display for Digest<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_hex())
  }
}

impl<T> fmt::Debug for Digest<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Digest({self})")
  }
}

/// Malformed hex digest text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
  #[error("odd number of hex digits")]
  OddLength,
  #[error("invalid hex character {c:?} at index {index}")]
  InvalidCharacter { c: char, index: usize },
  #[error("expected {expected} hex digits, got {actual}")]
  Length { expected: usize, actual: usize },
}

/// Decode exactly `len` bytes of hex into a digest.
pub(crate) fn decode_hex<T>(len: usize, text: &str) -> Result<Digest<T>, HexError> {
  if text.len() % 2 != 0 {
    return Err(HexError::OddLength);
  }
  let expected = len * 2;
  if text.len() != expected {
    return Err(HexError::Length {
      expected,
      actual: text.len(),
    });
  }
  let mut result = Ok(());
  let digest = Digest::from_fn(len, |out| {
    result = hex::decode_to_slice(text, out).map_err(|e| match e {
      hex::FromHexError::InvalidHexCharacter { c, index } => HexError::InvalidCharacter { c, index },
      hex::FromHexError::OddLength => HexError::OddLength,
      hex::FromHexError::InvalidStringLength => HexError::Length {
        expected,
        actual: text.len(),
      },
    });
  });
  result.map(|()| digest)
}

/// Copy exactly `len` raw bytes into a digest; `None` on length mismatch.
pub(crate) fn from_raw<T>(len: usize, raw: &[u8]) -> Option<Digest<T>> {
  (raw.len() == len).then(|| Digest::from_fn(len, |out| out.copy_from_slice(raw)))
}

#[cfg(test)]
mod tests {
  use std::collections::{BTreeSet, HashSet};

  use super::*;

  fn digest(bytes: &[u8]) -> Digest {
    Digest::from_fn(bytes.len(), |out| out.copy_from_slice(bytes))
  }

  #[test]
  fn equality_is_bytewise() {
    let a = digest(&[1, 2, 3, 4]);
    assert_eq!(a, a);
    assert_eq!(a, digest(&[1, 2, 3, 4]));
    for i in 0..4 {
      let mut other = [1u8, 2, 3, 4];
      other[i] ^= 0x80;
      assert_ne!(a, digest(&other), "difference at byte {i}");
    }
    assert_ne!(a, digest(&[1, 2, 3]));
  }

  #[test]
  fn ordering_is_lexicographic() {
    let set: BTreeSet<Digest> = [digest(&[2, 0]), digest(&[1, 9]), digest(&[1, 0])].into_iter().collect();
    let ordered: Vec<Vec<u8>> = set.iter().map(Digest::to_raw).collect();
    assert_eq!(ordered, vec![vec![1, 0], vec![1, 9], vec![2, 0]]);

    let hashed: HashSet<Digest> = [digest(&[7]), digest(&[7])].into_iter().collect();
    assert_eq!(hashed.len(), 1);
  }

  #[test]
  fn hex_round_trip() {
    let d = digest(&[0xde, 0xad, 0xbe, 0xef]);
    assert_eq!(d.to_hex(), "deadbeef");
    assert_eq!(d.to_string(), "deadbeef");
    assert_eq!(format!("{d:?}"), "Digest(deadbeef)");
    assert_eq!(decode_hex::<Erased>(4, "deadbeef"), Ok(d));
    assert_eq!(decode_hex::<Erased>(4, "DEADBEEF"), Ok(d));
  }

  #[test]
  fn hex_errors() {
    assert_eq!(decode_hex::<Erased>(2, "abc"), Err(HexError::OddLength));
    assert_eq!(
      decode_hex::<Erased>(2, "ab"),
      Err(HexError::Length {
        expected: 4,
        actual: 2
      })
    );
    assert_eq!(
      decode_hex::<Erased>(2, "abzd"),
      Err(HexError::InvalidCharacter { c: 'z', index: 2 })
    );
  }

  #[test]
  fn raw_requires_exact_length() {
    assert_eq!(from_raw::<Erased>(2, &[1, 2]), Some(digest(&[1, 2])));
    assert_eq!(from_raw::<Erased>(2, &[1, 2, 3]), None);
  }

  #[test]
  fn zeroize_clears_contents() {
    let mut d = digest(&[0xa5; 48]);
    d.zeroize();
    assert!(d.is_empty());
    assert_eq!(d.bytes, [0u8; MAX_DIGEST_SIZE]);
    assert_eq!(d.to_hex(), "");
  }

  #[test]
  fn verify_reports_mismatch() {
    let a = digest(&[9; 32]);
    assert!(a.verify(&a).is_ok());
    assert_eq!(a.verify(&digest(&[8; 32])), Err(VerificationError::new()));
  }
}
