//! Error types for primitive configuration and MAC verification.
//!
//! Minimal, allocation-free error types. The engine and registry crates wrap
//! these in their own richer error enums.

use core::fmt;

/// Keyed-mode parameters rejected by a primitive.
///
/// Returned before any hashing work is done, so a failed call never yields a
/// partial digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ParamError {
  /// Key is longer than the primitive's keyed mode accepts.
  KeyTooLong {
    /// Length of the rejected key.
    len: usize,
    /// Longest accepted key.
    limit: usize,
  },
  /// Requested output length is zero or above the family maximum.
  DigestSize {
    /// Requested output length.
    len: usize,
    /// Largest output the primitive can produce.
    max: usize,
  },
  /// The primitive has no native keyed / variable-output mode.
  Unkeyed,
}

impl fmt::Display for ParamError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::KeyTooLong { len, limit } => write!(f, "key of {len} bytes exceeds the {limit}-byte limit"),
      Self::DigestSize { len, max } => write!(f, "digest size {len} outside 1..={max}"),
      Self::Unkeyed => f.write_str("primitive has no keyed mode"),
    }
  }
}

impl core::error::Error for ParamError {}

/// Verification failed.
///
/// Returned when a MAC tag does not match. Intentionally opaque to prevent
/// timing side-channels.
///
/// # Security
///
/// This error provides no details about the failure. The comparison that
/// produces it is constant-time in the engine crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct VerificationError;

impl VerificationError {
  /// Create a new verification error.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl Default for VerificationError {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for VerificationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("verification failed")
  }
}

impl core::error::Error for VerificationError {}
