//! Immutable engine.
//!
//! Every operation here is value-returning: the context passed in is
//! duplicated first and never mutated, so one intermediate state can fan out
//! into any number of independent continuations.
//!
//! ```
//! use engine::Engine;
//! use hashes::native::Sha256;
//!
//! let sha256 = Engine::<Sha256>::new();
//! let prefix = sha256.feed(sha256.empty(), "common prefix ");
//! let a = sha256.get(&sha256.feed(&prefix, "a"));
//! let b = sha256.get(&sha256.feed(&prefix, "b"));
//!
//! assert_eq!(a, sha256.digest("common prefix a"));
//! assert_eq!(b, sha256.digest("common prefix b"));
//! ```

use core::{cmp::Ordering, fmt};

use traits::{Descriptor, Primitive};

use crate::{
  Error,
  buffer::{Buffer, view},
  digest::{self, Digest},
  raw::{self, Context},
};

/// Copy-on-write hashing over the primitive `P`.
pub struct Engine<P: Primitive> {
  empty: Context<P>,
}

impl<P: Primitive> Engine<P> {
  /// Engine with the primitive's default output length.
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self { empty: raw::init() }
  }

  /// Engine producing `digest_size`-byte outputs (BLAKE2 families).
  ///
  /// # Errors
  ///
  /// [`Error::Param`] if `P` has no variable-output mode or `digest_size` is
  /// outside `1..=P::DIGEST_SIZE`.
  pub fn with_digest_size(digest_size: usize) -> Result<Self, Error> {
    Ok(Self {
      empty: raw::init_with(digest_size, &[])?,
    })
  }

  #[inline]
  #[must_use]
  pub fn descriptor(&self) -> Descriptor {
    Descriptor::new(P::BLOCK_SIZE, self.digest_size())
  }

  #[inline]
  #[must_use]
  pub fn block_size(&self) -> usize {
    P::BLOCK_SIZE
  }

  #[inline]
  #[must_use]
  pub fn digest_size(&self) -> usize {
    self.empty.digest_size()
  }

  /// Shared zero-state prototype.
  #[inline]
  #[must_use]
  pub fn empty(&self) -> &Context<P> {
    &self.empty
  }

  /// Fresh, independently owned copy of [`empty`](Self::empty).
  #[inline]
  #[must_use]
  pub fn init(&self) -> Context<P> {
    self.empty.duplicate()
  }

  /// `ctx` followed by `buf`, as a new context.
  #[must_use]
  pub fn feed<B: Buffer + ?Sized>(&self, ctx: &Context<P>, buf: &B) -> Context<P> {
    let mut next = ctx.duplicate();
    raw::update(&mut next, buf);
    next
  }

  /// `ctx` followed by `buf[offset..offset + length]`, as a new context.
  ///
  /// # Errors
  ///
  /// [`Error::Buffer`] if the range is out of bounds.
  pub fn feed_range<B: Buffer + ?Sized>(
    &self,
    ctx: &Context<P>,
    buf: &B,
    offset: Option<usize>,
    length: Option<usize>,
  ) -> Result<Context<P>, Error> {
    let bytes = view(buf, offset, length)?;
    Ok(self.feed(ctx, bytes))
  }

  /// `ctx` followed by every chunk of `chunks`, in order, as a new context.
  ///
  /// `ctx` is duplicated once for the whole sequence.
  #[must_use]
  pub fn feed_iter<I>(&self, ctx: &Context<P>, chunks: I) -> Context<P>
  where
    I: IntoIterator,
    I::Item: Buffer,
  {
    let mut next = ctx.duplicate();
    for chunk in chunks {
      raw::update(&mut next, &chunk);
    }
    next
  }

  /// Digest of everything fed into `ctx`; `ctx` stays usable.
  #[must_use]
  pub fn get(&self, ctx: &Context<P>) -> Digest<P> {
    raw::finalize(&mut ctx.duplicate())
  }

  /// One-shot digest of `buf`.
  #[must_use]
  pub fn digest<B: Buffer + ?Sized>(&self, buf: &B) -> Digest<P> {
    raw::finalize(&mut self.feed(&self.empty, buf))
  }

  /// One-shot digest of `buf[offset..offset + length]`.
  ///
  /// # Errors
  ///
  /// [`Error::Buffer`] if the range is out of bounds.
  pub fn digest_range<B: Buffer + ?Sized>(
    &self,
    buf: &B,
    offset: Option<usize>,
    length: Option<usize>,
  ) -> Result<Digest<P>, Error> {
    Ok(self.digest(view(buf, offset, length)?))
  }

  /// One-shot digest of the concatenation of `chunks`.
  #[must_use]
  pub fn digest_iter<I>(&self, chunks: I) -> Digest<P>
  where
    I: IntoIterator,
    I::Item: Buffer,
  {
    raw::finalize(&mut self.feed_iter(&self.empty, chunks))
  }

  /// Constant-time equality.
  #[inline]
  #[must_use]
  pub fn equal(&self, a: &Digest<P>, b: &Digest<P>) -> bool {
    a == b
  }

  /// Lexicographic byte order.
  #[inline]
  #[must_use]
  pub fn compare(&self, a: &Digest<P>, b: &Digest<P>) -> Ordering {
    a.cmp(b)
  }

  #[inline]
  #[must_use]
  pub fn to_hex(&self, d: &Digest<P>) -> String {
    d.to_hex()
  }

  /// Parse exactly `2 * digest_size()` hex digits.
  ///
  /// # Errors
  ///
  /// [`Error::Hex`] on odd length, non-hex characters, or wrong length.
  pub fn of_hex(&self, text: &str) -> Result<Digest<P>, Error> {
    Ok(digest::decode_hex(self.digest_size(), text)?)
  }

  /// Like [`of_hex`](Self::of_hex) but skips ASCII whitespace anywhere in `text`.
  ///
  /// # Errors
  ///
  /// Same as [`of_hex`](Self::of_hex), measured after whitespace removal.
  pub fn consistent_of_hex(&self, text: &str) -> Result<Digest<P>, Error> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    self.of_hex(&compact)
  }

  /// Digest from exactly `digest_size()` raw bytes.
  ///
  /// # Errors
  ///
  /// [`Error::Length`] if `raw` has the wrong length.
  pub fn of_raw(&self, raw: &[u8]) -> Result<Digest<P>, Error> {
    digest::from_raw(self.digest_size(), raw).ok_or(Error::Length {
      expected: self.digest_size(),
      actual: raw.len(),
    })
  }

  /// Write `d` as lowercase hex.
  ///
  /// # Errors
  ///
  /// Propagates formatter errors.
  #[inline]
  pub fn pretty_print(&self, f: &mut impl fmt::Write, d: &Digest<P>) -> fmt::Result {
    f.write_str(&d.to_hex())
  }
}

impl<P: Primitive> Default for Engine<P> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<P: Primitive> Clone for Engine<P> {
  #[inline]
  fn clone(&self) -> Self {
    Self {
      empty: self.empty.duplicate(),
    }
  }
}

impl<P: Primitive> fmt::Debug for Engine<P> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Engine")
      .field("algorithm", &P::NAME)
      .field("block_size", &P::BLOCK_SIZE)
      .field("digest_size", &self.digest_size())
      .finish()
  }
}
