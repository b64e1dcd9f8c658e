//! Object-safe view of an engine.
//!
//! [`Engine<P>`] is generic and so cannot be stored in a table keyed by a
//! runtime algorithm choice. [`DynEngine`] erases `P`: digests come back as
//! [`Digest<Erased>`] and streaming state as a boxed [`DynState`].

use core::fmt;

use traits::{Descriptor, Primitive};

use crate::{
  Error,
  digest::{Digest, Erased},
  engine::Engine,
  hmac::HmacState,
  raw::{self, Context},
};

/// Type-erased in-progress computation (plain digest or MAC).
pub trait DynState: Send {
  fn update(&mut self, data: &[u8]);

  fn finish(self: Box<Self>) -> Digest<Erased>;
}

impl<P: Primitive> DynState for Context<P> {
  #[inline]
  fn update(&mut self, data: &[u8]) {
    raw::update(self, data);
  }

  fn finish(mut self: Box<Self>) -> Digest<Erased> {
    raw::finalize(&mut self).erase()
  }
}

impl<P: Primitive> DynState for HmacState<P> {
  #[inline]
  fn update(&mut self, data: &[u8]) {
    HmacState::update(self, data);
  }

  fn finish(self: Box<Self>) -> Digest<Erased> {
    HmacState::finish(*self).erase()
  }
}

/// Engine whose primitive is chosen at runtime.
pub trait DynEngine: Send + Sync + fmt::Debug {
  /// Algorithm name of the underlying primitive.
  fn name(&self) -> &'static str;

  fn descriptor(&self) -> Descriptor;

  /// Fresh plain-digest state.
  fn start(&self) -> Box<dyn DynState>;

  /// Fresh MAC state under `key`.
  ///
  /// # Errors
  ///
  /// [`Error::Param`] for a key the primitive's native keyed mode rejects.
  fn start_hmac(&self, key: &[u8]) -> Result<Box<dyn DynState>, Error>;

  /// # Errors
  ///
  /// See [`Engine::of_hex`].
  fn of_hex(&self, text: &str) -> Result<Digest<Erased>, Error>;

  /// # Errors
  ///
  /// See [`Engine::consistent_of_hex`].
  fn consistent_of_hex(&self, text: &str) -> Result<Digest<Erased>, Error>;

  /// # Errors
  ///
  /// See [`Engine::of_raw`].
  fn of_raw(&self, raw: &[u8]) -> Result<Digest<Erased>, Error>;

  /// One-shot digest of `data`.
  fn digest(&self, data: &[u8]) -> Digest<Erased> {
    let mut state = self.start();
    state.update(data);
    state.finish()
  }
}

impl<P: Primitive> DynEngine for Engine<P> {
  fn name(&self) -> &'static str {
    P::NAME
  }

  fn descriptor(&self) -> Descriptor {
    Engine::descriptor(self)
  }

  fn start(&self) -> Box<dyn DynState> {
    Box::new(self.init())
  }

  fn start_hmac(&self, key: &[u8]) -> Result<Box<dyn DynState>, Error> {
    Ok(Box::new(self.hmac_init(key)?))
  }

  fn of_hex(&self, text: &str) -> Result<Digest<Erased>, Error> {
    Engine::of_hex(self, text).map(Digest::erase)
  }

  fn consistent_of_hex(&self, text: &str) -> Result<Digest<Erased>, Error> {
    Engine::consistent_of_hex(self, text).map(Digest::erase)
  }

  fn of_raw(&self, raw: &[u8]) -> Result<Digest<Erased>, Error> {
    Engine::of_raw(self, raw).map(Digest::erase)
  }

  fn digest(&self, data: &[u8]) -> Digest<Erased> {
    Engine::digest(self, data).erase()
  }
}
