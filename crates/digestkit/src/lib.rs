//! Cryptographic digests and HMAC over MD5, SHA-1, SHA-2, RIPEMD-160 and
//! BLAKE2, with an immutable API and runtime algorithm selection.
//!
//! # Quick Start
//!
//! ```
//! use digestkit::Kind;
//!
//! // Kind chosen at runtime
//! let d = digestkit::digest(Kind::Sha256, "abc")?;
//! assert_eq!(
//!   digestkit::to_hex(Kind::Sha256, &d)?,
//!   "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
//! );
//!
//! // BLAKE2 with a custom output length and native keying
//! let tag = digestkit::hmac(Kind::Blake2s(16), "secret", "message")?;
//! assert_eq!(tag.len(), 16);
//! # Ok::<(), digestkit::Error>(())
//! ```
//!
//! When the algorithm is known statically, use [`Engine`] directly; its
//! digests carry the primitive in their type:
//!
//! ```
//! use digestkit::{Engine, native::Sha256};
//!
//! let sha256 = Engine::<Sha256>::new();
//! let ctx = sha256.feed(sha256.empty(), "ab");
//! assert_eq!(sha256.get(&sha256.feed(&ctx, "c")), sha256.digest("abc"));
//! ```
//!
//! # Configuration
//!
//! | Variable | Values | Effect |
//! |----------|--------|--------|
//! | `DIGESTKIT_BLAKE2_FORCE` | `auto`, `portable`, `simd` | BLAKE2 backend used by [`Registry::global`] |
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]

use core::{cmp::Ordering, fmt};

mod error;
mod kind;
mod registry;

pub use engine::{
  Buffer, BufferError, Context, Digest, DynEngine, DynState, Engine, Erased, Error as EngineError, HexError, HmacState,
  raw, view,
};
pub use error::Error;
pub use hashes::{Blake2Backend, Blake2Force, Config, native, portable};
pub use kind::Kind;
pub use registry::Registry;
pub use traits::{Descriptor, Keying, ParamError, Primitive, VerificationError};

// =============================================================================
// Kind-generic dispatch over the global registry
// =============================================================================

/// Digest of `buf` under `kind`.
///
/// # Errors
///
/// Invalid BLAKE2 output length.
pub fn digest<B: Buffer + ?Sized>(kind: Kind, buf: &B) -> Result<Digest, Error> {
  Registry::global().digest(kind, buf)
}

/// Digest of the concatenation of `chunks` under `kind`.
///
/// # Errors
///
/// Invalid BLAKE2 output length.
pub fn digest_iter<I>(kind: Kind, chunks: I) -> Result<Digest, Error>
where
  I: IntoIterator,
  I::Item: Buffer,
{
  Registry::global().digest_iter(kind, chunks)
}

/// MAC of `buf` under `key`.
///
/// # Errors
///
/// Invalid BLAKE2 output length or key length.
pub fn hmac<K, B>(kind: Kind, key: &K, buf: &B) -> Result<Digest, Error>
where
  K: Buffer + ?Sized,
  B: Buffer + ?Sized,
{
  Registry::global().hmac(kind, key, buf)
}

/// MAC of the concatenation of `chunks` under `key`.
///
/// # Errors
///
/// Invalid BLAKE2 output length or key length.
pub fn hmac_iter<K, I>(kind: Kind, key: &K, chunks: I) -> Result<Digest, Error>
where
  K: Buffer + ?Sized,
  I: IntoIterator,
  I::Item: Buffer,
{
  Registry::global().hmac_iter(kind, key, chunks)
}

/// Constant-time equality of two digests produced under `kind`.
///
/// # Errors
///
/// Invalid BLAKE2 output length, or a digest of the wrong size for `kind`.
pub fn equal(kind: Kind, a: &Digest, b: &Digest) -> Result<bool, Error> {
  Registry::global().equal(kind, a, b)
}

/// Lexicographic order of two digests produced under `kind`.
///
/// # Errors
///
/// Same as [`equal`].
pub fn compare(kind: Kind, a: &Digest, b: &Digest) -> Result<Ordering, Error> {
  Registry::global().compare(kind, a, b)
}

/// # Errors
///
/// Same as [`equal`].
pub fn to_hex(kind: Kind, d: &Digest) -> Result<String, Error> {
  Registry::global().to_hex(kind, d)
}

/// # Errors
///
/// Malformed hex, or not exactly `2 * kind.digest_size()` digits.
pub fn of_hex(kind: Kind, text: &str) -> Result<Digest, Error> {
  Registry::global().of_hex(kind, text)
}

/// Like [`of_hex`], ignoring ASCII whitespace.
///
/// # Errors
///
/// Same as [`of_hex`].
pub fn consistent_of_hex(kind: Kind, text: &str) -> Result<Digest, Error> {
  Registry::global().consistent_of_hex(kind, text)
}

/// # Errors
///
/// `raw` is not exactly `kind.digest_size()` bytes.
pub fn of_raw(kind: Kind, raw: &[u8]) -> Result<Digest, Error> {
  Registry::global().of_raw(kind, raw)
}

/// Write `d` as lowercase hex.
///
/// # Errors
///
/// Same as [`equal`], or [`Error::Format`] if the writer fails.
pub fn pretty_print(kind: Kind, f: &mut impl fmt::Write, d: &Digest) -> Result<(), Error> {
  Registry::global().pretty_print(kind, f, d)
}

/// Output length of `kind` in bytes.
///
/// # Errors
///
/// Invalid BLAKE2 output length.
#[inline]
pub const fn digest_size(kind: Kind) -> Result<usize, ParamError> {
  match kind.validate() {
    Ok(kind) => Ok(kind.digest_size()),
    Err(err) => Err(err),
  }
}
