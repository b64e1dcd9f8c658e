use traits::{ParamError, VerificationError};

use crate::{buffer::BufferError, digest::HexError};

/// Every way an engine operation can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
  /// Rejected key or output length.
  #[error(transparent)]
  Param(#[from] ParamError),
  /// Offset/length outside the input buffer.
  #[error(transparent)]
  Buffer(#[from] BufferError),
  /// Malformed hex digest.
  #[error(transparent)]
  Hex(#[from] HexError),
  /// Raw digest of the wrong length.
  #[error("expected a {expected}-byte digest, got {actual} bytes")]
  Length { expected: usize, actual: usize },
  /// MAC or digest mismatch.
  #[error(transparent)]
  Verification(#[from] VerificationError),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn messages_pass_through() {
    let err = Error::from(ParamError::KeyTooLong { len: 65, limit: 64 });
    assert_eq!(err.to_string(), "key of 65 bytes exceeds the 64-byte limit");
    let err = Error::Length {
      expected: 32,
      actual: 3,
    };
    assert_eq!(err.to_string(), "expected a 32-byte digest, got 3 bytes");
    assert_eq!(Error::from(VerificationError::new()).to_string(), "verification failed");
  }
}
