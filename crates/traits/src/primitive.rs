//! The primitive capability.
//!
//! A primitive is the mutable, fixed-size scratch state of one hash algorithm.
//! It knows nothing about buffers, duplication, or HMAC; those live in the
//! engine crate and are written once against this trait.

use crate::error::ParamError;

/// Largest digest any supported primitive produces (SHA-512, BLAKE2b).
pub const MAX_DIGEST_SIZE: usize = 64;

/// Largest compression block of any supported primitive (SHA-384/512, BLAKE2b).
pub const MAX_BLOCK_SIZE: usize = 128;

/// How a primitive turns a secret key into an authenticated digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keying {
  /// RFC 2104 HMAC: key normalized to one block, XORed with `ipad`/`opad`.
  Padded,
  /// Primitive-native keyed mode (BLAKE2). Keys up to `key_size_limit` bytes
  /// are absorbed by the primitive's own parameter block.
  Native {
    /// Longest accepted key, in bytes.
    key_size_limit: usize,
  },
}

impl Keying {
  /// Longest key the primitive accepts, or `None` when any length is fine.
  #[inline]
  #[must_use]
  pub const fn key_size_limit(self) -> Option<usize> {
    match self {
      Self::Padded => None,
      Self::Native { key_size_limit } => Some(key_size_limit),
    }
  }
}

/// Static shape of an engine instance.
///
/// For BLAKE2 the digest size is chosen when the engine is built and is part
/// of its identity; it never changes afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Descriptor {
  /// Compression block size in bytes (also the HMAC key-pad length).
  pub block_size: usize,
  /// Output length in bytes.
  pub digest_size: usize,
}

impl Descriptor {
  #[inline]
  #[must_use]
  pub const fn new(block_size: usize, digest_size: usize) -> Self {
    Self {
      block_size,
      digest_size,
    }
  }
}

/// Mutable hash state for a single algorithm.
///
/// Implementations are plain values: `Clone` is the duplication primitive the
/// engine relies on to present an immutable API. Nothing here is shared; a
/// value is owned by exactly one in-progress computation.
///
/// # Contract
///
/// - [`update`](Self::update) may be called any number of times, with any
///   chunking; the result depends only on the concatenated input.
/// - [`finalize_into`](Self::finalize_into) writes exactly
///   [`digest_size`](Self::digest_size) bytes. Afterwards the state is
///   structurally valid but must not be continued.
pub trait Primitive: Clone + Send + Sync + 'static {
  /// Short lowercase algorithm name, e.g. `"sha256"`.
  const NAME: &'static str;

  /// Compression block size in bytes.
  const BLOCK_SIZE: usize;

  /// Output length of [`init`](Self::init); the maximum for variable-output
  /// families.
  const DIGEST_SIZE: usize;

  /// Authentication mode used by the HMAC layer.
  const KEYING: Keying;

  /// Fresh state, ready to absorb data.
  #[must_use]
  fn init() -> Self;

  /// Absorb `data`.
  fn update(&mut self, data: &[u8]);

  /// Pad, finish, and write the digest into `out`.
  ///
  /// `out.len()` must equal [`digest_size`](Self::digest_size).
  fn finalize_into(&mut self, out: &mut [u8]);

  /// Output length this state was initialized for.
  #[inline]
  #[must_use]
  fn digest_size(&self) -> usize {
    Self::DIGEST_SIZE
  }

  /// Size of the scratch state in bytes.
  #[inline]
  #[must_use]
  fn context_size() -> usize {
    core::mem::size_of::<Self>()
  }

  /// Fresh state with a caller-chosen output length and optional key.
  ///
  /// Only primitives with [`Keying::Native`] support this; the default
  /// implementation fails with [`ParamError::Unkeyed`].
  ///
  /// # Errors
  ///
  /// - [`ParamError::KeyTooLong`] if `key.len()` exceeds the key size limit.
  /// - [`ParamError::DigestSize`] if `outlen` is zero or above [`Self::DIGEST_SIZE`].
  fn with_outlen_and_key(outlen: usize, key: &[u8]) -> Result<Self, ParamError> {
    let _ = (outlen, key);
    Err(ParamError::Unkeyed)
  }
}

/// Validate keyed-mode parameters against a primitive's limits.
///
/// Shared by native-keyed implementations so every backend rejects the same
/// inputs before doing any work.
///
/// # Errors
///
/// Same as [`Primitive::with_outlen_and_key`].
#[inline]
pub fn check_keyed_params<P: Primitive>(outlen: usize, key: &[u8]) -> Result<(), ParamError> {
  let Some(limit) = P::KEYING.key_size_limit() else {
    return Err(ParamError::Unkeyed);
  };
  if key.len() > limit {
    return Err(ParamError::KeyTooLong { len: key.len(), limit });
  }
  if outlen == 0 || outlen > P::DIGEST_SIZE {
    return Err(ParamError::DigestSize {
      len: outlen,
      max: P::DIGEST_SIZE,
    });
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Clone)]
  struct Sum(u8);

  impl Primitive for Sum {
    const NAME: &'static str = "sum";
    const BLOCK_SIZE: usize = 4;
    const DIGEST_SIZE: usize = 1;
    const KEYING: Keying = Keying::Padded;

    fn init() -> Self {
      Self(0)
    }
    fn update(&mut self, data: &[u8]) {
      self.0 = data.iter().fold(self.0, |acc, &b| acc.wrapping_add(b));
    }
    fn finalize_into(&mut self, out: &mut [u8]) {
      out[0] = self.0;
    }
  }

  #[derive(Clone)]
  struct KeyedSum(u8, usize);

  impl Primitive for KeyedSum {
    const NAME: &'static str = "keyed-sum";
    const BLOCK_SIZE: usize = 4;
    const DIGEST_SIZE: usize = 8;
    const KEYING: Keying = Keying::Native { key_size_limit: 4 };

    fn init() -> Self {
      Self(0, Self::DIGEST_SIZE)
    }
    fn update(&mut self, data: &[u8]) {
      self.0 = data.iter().fold(self.0, |acc, &b| acc.wrapping_add(b));
    }
    fn finalize_into(&mut self, out: &mut [u8]) {
      out.fill(self.0);
    }
    fn digest_size(&self) -> usize {
      self.1
    }
    fn with_outlen_and_key(outlen: usize, key: &[u8]) -> Result<Self, ParamError> {
      check_keyed_params::<Self>(outlen, key)?;
      let mut s = Self(0, outlen);
      s.update(key);
      Ok(s)
    }
  }

  #[test]
  fn unkeyed_default_rejects_keyed_init() {
    assert_eq!(Sum::with_outlen_and_key(1, b"").err(), Some(ParamError::Unkeyed));
    assert_eq!(Sum::KEYING.key_size_limit(), None);
  }

  #[test]
  fn keyed_params_are_checked() {
    assert!(KeyedSum::with_outlen_and_key(8, b"abcd").is_ok());
    assert_eq!(
      KeyedSum::with_outlen_and_key(8, b"abcde").err(),
      Some(ParamError::KeyTooLong { len: 5, limit: 4 })
    );
    assert_eq!(
      KeyedSum::with_outlen_and_key(0, b"").err(),
      Some(ParamError::DigestSize { len: 0, max: 8 })
    );
    assert_eq!(
      KeyedSum::with_outlen_and_key(9, b"").err(),
      Some(ParamError::DigestSize { len: 9, max: 8 })
    );
    assert_eq!(KeyedSum::with_outlen_and_key(3, b"").map(|s| s.digest_size()), Ok(3));
  }

  #[test]
  fn context_size_is_state_size() {
    assert_eq!(Sum::context_size(), 1);
    assert_eq!(Sum::init().digest_size(), 1);
  }
}
