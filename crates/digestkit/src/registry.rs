//! Kind → engine resolution.
//!
//! Fixed kinds resolve to one process-wide engine each. BLAKE2 kinds are
//! built on first use for every requested output length and cached for the
//! registry's lifetime; entries are never evicted. The cache lock is held
//! across construction, so concurrent first resolutions of the same length
//! build exactly one engine.

use core::{cmp::Ordering, fmt};
use std::{
  collections::HashMap,
  sync::{Arc, Mutex, OnceLock, PoisonError},
};

use engine::{Buffer, Digest, DynEngine, Engine};
use hashes::{Blake2Backend, Config, native, portable};

use crate::{Error, Kind};

type Shared = Arc<dyn DynEngine>;
type Cache = Mutex<HashMap<usize, Shared>>;

macro_rules! fixed_engine {
  ($primitive:ty) => {{
    static ENGINE: OnceLock<Shared> = OnceLock::new();
    Arc::clone(ENGINE.get_or_init(|| Arc::new(Engine::<$primitive>::new())))
  }};
}

/// Resolves [`Kind`]s to engines and dispatches kind-generic operations.
pub struct Registry {
  config: Config,
  blake2b: Cache,
  blake2s: Cache,
}

impl Registry {
  /// Registry using `config` to pick the BLAKE2 backend.
  #[must_use]
  pub fn with_config(config: Config) -> Self {
    Self {
      config,
      blake2b: Mutex::new(HashMap::new()),
      blake2s: Mutex::new(HashMap::new()),
    }
  }

  /// Process-wide registry configured from the environment
  /// (see [`Config::from_env`]).
  #[must_use]
  pub fn global() -> &'static Self {
    static GLOBAL: OnceLock<Registry> = OnceLock::new();
    GLOBAL.get_or_init(|| Self::with_config(Config::from_env()))
  }

  #[inline]
  #[must_use]
  pub fn config(&self) -> Config {
    self.config
  }

  /// Engine for `kind`.
  ///
  /// Resolving the same kind twice yields the same engine instance.
  ///
  /// # Errors
  ///
  /// [`Error::Engine`] wrapping [`traits::ParamError::DigestSize`] for a
  /// BLAKE2 length outside the family's range.
  pub fn resolve(&self, kind: Kind) -> Result<Shared, Error> {
    let kind = kind.validate()?;
    let backend = self.config.blake2_backend();
    Ok(match kind {
      Kind::Md5 => fixed_engine!(native::Md5),
      Kind::Sha1 => fixed_engine!(native::Sha1),
      Kind::Sha224 => fixed_engine!(native::Sha224),
      Kind::Sha256 => fixed_engine!(native::Sha256),
      Kind::Sha384 => fixed_engine!(native::Sha384),
      Kind::Sha512 => fixed_engine!(native::Sha512),
      Kind::Rmd160 => fixed_engine!(native::Rmd160),
      Kind::Blake2b(n) => cached(&self.blake2b, kind, n, || match backend {
        Blake2Backend::Simd => Ok(Arc::new(Engine::<native::Blake2b>::with_digest_size(n)?)),
        Blake2Backend::Portable => Ok(Arc::new(Engine::<portable::Blake2b>::with_digest_size(n)?)),
      })?,
      Kind::Blake2s(n) => cached(&self.blake2s, kind, n, || match backend {
        Blake2Backend::Simd => Ok(Arc::new(Engine::<native::Blake2s>::with_digest_size(n)?)),
        Blake2Backend::Portable => Ok(Arc::new(Engine::<portable::Blake2s>::with_digest_size(n)?)),
      })?,
    })
  }

  /// # Errors
  ///
  /// See [`resolve`](Self::resolve).
  pub fn digest<B: Buffer + ?Sized>(&self, kind: Kind, buf: &B) -> Result<Digest, Error> {
    Ok(self.resolve(kind)?.digest(buf.as_bytes()))
  }

  /// Digest of the concatenation of `chunks`.
  ///
  /// # Errors
  ///
  /// See [`resolve`](Self::resolve).
  pub fn digest_iter<I>(&self, kind: Kind, chunks: I) -> Result<Digest, Error>
  where
    I: IntoIterator,
    I::Item: Buffer,
  {
    let mut state = self.resolve(kind)?.start();
    for chunk in chunks {
      state.update(chunk.as_bytes());
    }
    Ok(state.finish())
  }

  /// # Errors
  ///
  /// See [`hmac_iter`](Self::hmac_iter).
  pub fn hmac<K, B>(&self, kind: Kind, key: &K, buf: &B) -> Result<Digest, Error>
  where
    K: Buffer + ?Sized,
    B: Buffer + ?Sized,
  {
    self.hmac_iter(kind, key, [buf.as_bytes()])
  }

  /// MAC of the concatenation of `chunks` under `key`.
  ///
  /// RFC 2104 for the fixed kinds, native keyed mode for BLAKE2.
  ///
  /// # Errors
  ///
  /// - See [`resolve`](Self::resolve).
  /// - [`traits::ParamError::KeyTooLong`] for a BLAKE2 key over the family
  ///   limit; no input is consumed in that case.
  pub fn hmac_iter<K, I>(&self, kind: Kind, key: &K, chunks: I) -> Result<Digest, Error>
  where
    K: Buffer + ?Sized,
    I: IntoIterator,
    I::Item: Buffer,
  {
    let mut state = self.resolve(kind)?.start_hmac(key.as_bytes())?;
    for chunk in chunks {
      state.update(chunk.as_bytes());
    }
    Ok(state.finish())
  }

  /// Constant-time equality of two digests produced under `kind`.
  ///
  /// # Errors
  ///
  /// See [`check`](Self::check).
  pub fn equal(&self, kind: Kind, a: &Digest, b: &Digest) -> Result<bool, Error> {
    self.check(kind, a)?;
    self.check(kind, b)?;
    Ok(a == b)
  }

  /// Lexicographic order of two digests produced under `kind`.
  ///
  /// # Errors
  ///
  /// See [`check`](Self::check).
  pub fn compare(&self, kind: Kind, a: &Digest, b: &Digest) -> Result<Ordering, Error> {
    self.check(kind, a)?;
    self.check(kind, b)?;
    Ok(a.cmp(b))
  }

  /// # Errors
  ///
  /// See [`check`](Self::check).
  pub fn to_hex(&self, kind: Kind, d: &Digest) -> Result<String, Error> {
    self.check(kind, d)?;
    Ok(d.to_hex())
  }

  /// # Errors
  ///
  /// Malformed hex or a length other than `2 * kind.digest_size()`.
  pub fn of_hex(&self, kind: Kind, text: &str) -> Result<Digest, Error> {
    Ok(self.resolve(kind)?.of_hex(text)?)
  }

  /// Like [`of_hex`](Self::of_hex), ignoring ASCII whitespace.
  ///
  /// # Errors
  ///
  /// Same as [`of_hex`](Self::of_hex).
  pub fn consistent_of_hex(&self, kind: Kind, text: &str) -> Result<Digest, Error> {
    Ok(self.resolve(kind)?.consistent_of_hex(text)?)
  }

  /// # Errors
  ///
  /// `raw` is not exactly `kind.digest_size()` bytes.
  pub fn of_raw(&self, kind: Kind, raw: &[u8]) -> Result<Digest, Error> {
    Ok(self.resolve(kind)?.of_raw(raw)?)
  }

  /// Write `d` as lowercase hex.
  ///
  /// # Errors
  ///
  /// See [`check`](Self::check); [`Error::Format`] if the writer fails.
  pub fn pretty_print(&self, kind: Kind, f: &mut impl fmt::Write, d: &Digest) -> Result<(), Error> {
    self.check(kind, d)?;
    Ok(f.write_str(&d.to_hex())?)
  }

  /// Confirm that `d` could have been produced under `kind`.
  ///
  /// # Errors
  ///
  /// - [`Error::Engine`] wrapping [`traits::ParamError::DigestSize`] for a
  ///   BLAKE2 length outside the family's range.
  /// - [`Error::Engine`] wrapping [`engine::Error::Length`] if `d` is not
  ///   `kind.digest_size()` bytes long.
  pub fn check(&self, kind: Kind, d: &Digest) -> Result<(), Error> {
    let expected = kind.validate()?.digest_size();
    if d.len() != expected {
      return Err(engine::Error::Length {
        expected,
        actual: d.len(),
      }
      .into());
    }
    Ok(())
  }
}

fn cached(
  cache: &Cache,
  kind: Kind,
  n: usize,
  build: impl FnOnce() -> Result<Shared, engine::Error>,
) -> Result<Shared, Error> {
  let mut engines = cache.lock().unwrap_or_else(PoisonError::into_inner);
  if let Some(engine) = engines.get(&n) {
    return Ok(Arc::clone(engine));
  }
  let engine = build()?;
  log::debug!("registry: built {kind} engine ({} entries cached)", engines.len() + 1);
  engines.insert(n, Arc::clone(&engine));
  Ok(engine)
}

impl Default for Registry {
  fn default() -> Self {
    Self::with_config(Config::default())
  }
}

impl fmt::Debug for Registry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let cached = |cache: &Cache| {
      let mut sizes: Vec<usize> = cache.lock().unwrap_or_else(PoisonError::into_inner).keys().copied().collect();
      sizes.sort_unstable();
      sizes
    };
    f.debug_struct("Registry")
      .field("backend", &self.config.blake2_backend())
      .field("blake2b", &cached(&self.blake2b))
      .field("blake2s", &cached(&self.blake2s))
      .finish()
  }
}
