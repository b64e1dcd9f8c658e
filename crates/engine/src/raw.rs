//! In-place engine.
//!
//! These operations mutate a caller-owned [`Context`] directly and never
//! copy it. They are the building blocks of the immutable [`crate::Engine`];
//! use them when you own the context and do not need the old state back.

use core::fmt;

use traits::{ParamError, Primitive};

use crate::{
  buffer::{Buffer, BufferError, view},
  digest::Digest,
};

/// Scratch state of one in-progress hash computation.
///
/// A context is owned by exactly one computation. It is deliberately not
/// `Clone`: copies are made with [`duplicate`](Self::duplicate), which is what
/// the immutable engine calls at every public boundary.
pub struct Context<P: Primitive> {
  state: P,
}

impl<P: Primitive> Context<P> {
  #[inline]
  pub(crate) fn from_state(state: P) -> Self {
    Self { state }
  }

  /// Independent copy of this context.
  #[inline]
  #[must_use]
  pub fn duplicate(&self) -> Self {
    Self {
      state: self.state.clone(),
    }
  }

  /// Output length this context will produce.
  #[inline]
  #[must_use]
  pub fn digest_size(&self) -> usize {
    self.state.digest_size()
  }

  /// Size in bytes of the primitive's scratch state.
  #[inline]
  #[must_use]
  pub fn context_size() -> usize {
    P::context_size()
  }
}

impl<P: Primitive> fmt::Debug for Context<P> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Context")
      .field("algorithm", &P::NAME)
      .field("digest_size", &self.digest_size())
      .finish_non_exhaustive()
  }
}

/// Fresh context with the primitive's default output length.
#[inline]
#[must_use]
pub fn init<P: Primitive>() -> Context<P> {
  Context::from_state(P::init())
}

/// Fresh keyed / variable-output context.
///
/// # Errors
///
/// [`ParamError`] if the primitive has no keyed mode or the parameters exceed
/// its limits.
#[inline]
pub fn init_with<P: Primitive>(outlen: usize, key: &[u8]) -> Result<Context<P>, ParamError> {
  P::with_outlen_and_key(outlen, key).map(Context::from_state)
}

/// Absorb the whole of `buf`.
#[inline]
pub fn update<P: Primitive, B: Buffer + ?Sized>(ctx: &mut Context<P>, buf: &B) {
  ctx.state.update(buf.as_bytes());
}

/// Absorb `buf[offset..offset + length]` (see [`view`] for defaults).
///
/// # Errors
///
/// [`BufferError`] if the range is out of bounds; `ctx` is left untouched.
#[inline]
pub fn update_range<P: Primitive, B: Buffer + ?Sized>(
  ctx: &mut Context<P>,
  buf: &B,
  offset: Option<usize>,
  length: Option<usize>,
) -> Result<(), BufferError> {
  ctx.state.update(view(buf, offset, length)?);
  Ok(())
}

/// Finish the computation.
///
/// `ctx` is left structurally valid but must not be continued.
#[inline]
#[must_use]
pub fn finalize<P: Primitive>(ctx: &mut Context<P>) -> Digest<P> {
  let len = ctx.state.digest_size();
  Digest::from_fn(len, |out| ctx.state.finalize_into(out))
}
