//! HMAC construction.
//!
//! Two protocols, chosen by [`Primitive::KEYING`]:
//!
//! - [`Keying::Padded`]: RFC 2104. The key is hashed if longer than a block,
//!   zero-padded to one block, and XORed with `0x36` (inner) / `0x5c` (outer).
//! - [`Keying::Native`]: BLAKE2 keyed mode. The key goes into the primitive's
//!   parameter block; no XOR pads are involved. This is not RFC 2104 HMAC-BLAKE2
//!   but serves the same purpose with a single pass.

use core::fmt;

use traits::{Keying, Primitive};
use zeroize::Zeroizing;

use crate::{
  Error,
  buffer::{Buffer, view},
  digest::Digest,
  engine::Engine,
  raw::{self, Context},
};

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// In-progress MAC computation.
pub struct HmacState<P: Primitive> {
  inner: Context<P>,
  /// Outer context already seeded with the outer pad; `None` in native keyed mode.
  outer: Option<Context<P>>,
}

impl<P: Primitive> HmacState<P> {
  #[inline]
  pub fn update<B: Buffer + ?Sized>(&mut self, buf: &B) {
    raw::update(&mut self.inner, buf);
  }

  #[must_use]
  pub fn finish(mut self) -> Digest<P> {
    let inner = raw::finalize(&mut self.inner);
    match self.outer {
      Some(mut outer) => {
        raw::update(&mut outer, inner.as_bytes());
        raw::finalize(&mut outer)
      }
      None => inner,
    }
  }
}

impl<P: Primitive> fmt::Debug for HmacState<P> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("HmacState")
      .field("algorithm", &P::NAME)
      .field("keying", &P::KEYING)
      .finish_non_exhaustive()
  }
}

impl<P: Primitive> Engine<P> {
  /// Start a MAC computation under `key`.
  ///
  /// # Errors
  ///
  /// [`Error::Param`] if the primitive is natively keyed and `key` exceeds its
  /// key size limit. Nothing is hashed in that case.
  pub fn hmac_init<K: Buffer + ?Sized>(&self, key: &K) -> Result<HmacState<P>, Error> {
    let key = key.as_bytes();
    match P::KEYING {
      Keying::Padded => Ok(self.padded_init(key)),
      Keying::Native { .. } => Ok(HmacState {
        inner: raw::init_with(self.digest_size(), key)?,
        outer: None,
      }),
    }
  }

  fn padded_init(&self, key: &[u8]) -> HmacState<P> {
    // A long key is replaced by its digest, which must then fit in one block.
    const { assert!(P::DIGEST_SIZE <= P::BLOCK_SIZE) };

    let mut block = Zeroizing::new(vec![0u8; P::BLOCK_SIZE]);
    if key.len() > P::BLOCK_SIZE {
      let hashed = Zeroizing::new(self.digest(key));
      block.iter_mut().zip(hashed.as_bytes()).for_each(|(b, k)| *b = *k);
    } else {
      block.iter_mut().zip(key).for_each(|(b, k)| *b = *k);
    }

    let inner_pad = Zeroizing::new(block.iter().map(|b| b ^ IPAD).collect::<Vec<u8>>());
    let outer_pad = Zeroizing::new(block.iter().map(|b| b ^ OPAD).collect::<Vec<u8>>());

    HmacState {
      inner: self.feed(self.empty(), inner_pad.as_slice()),
      outer: Some(self.feed(self.empty(), outer_pad.as_slice())),
    }
  }

  /// MAC of the concatenation of `chunks` under `key`.
  ///
  /// # Errors
  ///
  /// See [`hmac_init`](Self::hmac_init).
  pub fn hmac_iter<K, I>(&self, key: &K, chunks: I) -> Result<Digest<P>, Error>
  where
    K: Buffer + ?Sized,
    I: IntoIterator,
    I::Item: Buffer,
  {
    let mut state = self.hmac_init(key)?;
    for chunk in chunks {
      state.update(&chunk);
    }
    Ok(state.finish())
  }

  /// MAC of `buf` under `key`.
  ///
  /// # Errors
  ///
  /// See [`hmac_init`](Self::hmac_init).
  pub fn hmac<K, B>(&self, key: &K, buf: &B) -> Result<Digest<P>, Error>
  where
    K: Buffer + ?Sized,
    B: Buffer + ?Sized,
  {
    self.hmac_iter(key, [buf.as_bytes()])
  }

  /// MAC of `buf[offset..offset + length]` under `key`.
  ///
  /// # Errors
  ///
  /// [`Error::Buffer`] for a bad range, otherwise see [`hmac_init`](Self::hmac_init).
  pub fn hmac_range<K, B>(
    &self,
    key: &K,
    buf: &B,
    offset: Option<usize>,
    length: Option<usize>,
  ) -> Result<Digest<P>, Error>
  where
    K: Buffer + ?Sized,
    B: Buffer + ?Sized,
  {
    let bytes = view(buf, offset, length)?;
    self.hmac_iter(key, [bytes])
  }

  /// Recompute the MAC of `chunks` and compare it with `tag` in constant time.
  ///
  /// # Errors
  ///
  /// [`Error::Verification`] on mismatch, or any error of [`hmac_iter`](Self::hmac_iter).
  pub fn hmac_verify<K, I>(&self, key: &K, chunks: I, tag: &Digest<P>) -> Result<(), Error>
  where
    K: Buffer + ?Sized,
    I: IntoIterator,
    I::Item: Buffer,
  {
    Ok(self.hmac_iter(key, chunks)?.verify(tag)?)
  }
}
