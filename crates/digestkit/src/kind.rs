//! Runtime algorithm selector.

use core::{fmt, str::FromStr};

use hashes::native;
use traits::{ParamError, Primitive};

use crate::Error;

/// Algorithm (and, for the BLAKE2 families, output length in bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
  Md5,
  Sha1,
  Sha224,
  Sha256,
  Sha384,
  Sha512,
  Rmd160,
  /// BLAKE2b with an `n`-byte digest, `1..=64`.
  Blake2b(usize),
  /// BLAKE2s with an `n`-byte digest, `1..=32`.
  Blake2s(usize),
}

impl Kind {
  /// BLAKE2b at its full 64-byte output.
  pub const BLAKE2B: Self = Self::Blake2b(native::Blake2b::DIGEST_SIZE);

  /// BLAKE2s at its full 32-byte output.
  pub const BLAKE2S: Self = Self::Blake2s(native::Blake2s::DIGEST_SIZE);

  /// Every kind that takes no parameter, plus the default-length BLAKE2 kinds.
  pub const DEFAULTS: [Self; 9] = [
    Self::Md5,
    Self::Sha1,
    Self::Sha224,
    Self::Sha256,
    Self::Sha384,
    Self::Sha512,
    Self::Rmd160,
    Self::BLAKE2B,
    Self::BLAKE2S,
  ];

  /// Algorithm family name, without any output length.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Md5 => native::Md5::NAME,
      Self::Sha1 => native::Sha1::NAME,
      Self::Sha224 => native::Sha224::NAME,
      Self::Sha256 => native::Sha256::NAME,
      Self::Sha384 => native::Sha384::NAME,
      Self::Sha512 => native::Sha512::NAME,
      Self::Rmd160 => native::Rmd160::NAME,
      Self::Blake2b(_) => native::Blake2b::NAME,
      Self::Blake2s(_) => native::Blake2s::NAME,
    }
  }

  #[must_use]
  pub const fn block_size(self) -> usize {
    match self {
      Self::Md5 => native::Md5::BLOCK_SIZE,
      Self::Sha1 => native::Sha1::BLOCK_SIZE,
      Self::Sha224 => native::Sha224::BLOCK_SIZE,
      Self::Sha256 => native::Sha256::BLOCK_SIZE,
      Self::Sha384 => native::Sha384::BLOCK_SIZE,
      Self::Sha512 => native::Sha512::BLOCK_SIZE,
      Self::Rmd160 => native::Rmd160::BLOCK_SIZE,
      Self::Blake2b(_) => native::Blake2b::BLOCK_SIZE,
      Self::Blake2s(_) => native::Blake2s::BLOCK_SIZE,
    }
  }

  /// Output length in bytes. For BLAKE2 this is the requested `n`, valid or not.
  #[must_use]
  pub const fn digest_size(self) -> usize {
    match self {
      Self::Md5 => native::Md5::DIGEST_SIZE,
      Self::Sha1 => native::Sha1::DIGEST_SIZE,
      Self::Sha224 => native::Sha224::DIGEST_SIZE,
      Self::Sha256 => native::Sha256::DIGEST_SIZE,
      Self::Sha384 => native::Sha384::DIGEST_SIZE,
      Self::Sha512 => native::Sha512::DIGEST_SIZE,
      Self::Rmd160 => native::Rmd160::DIGEST_SIZE,
      Self::Blake2b(n) | Self::Blake2s(n) => n,
    }
  }

  /// Check a BLAKE2 output length against its family maximum.
  ///
  /// # Errors
  ///
  /// [`ParamError::DigestSize`] if `n` is zero or too large.
  pub const fn validate(self) -> Result<Self, ParamError> {
    let max = match self {
      Self::Blake2b(_) => native::Blake2b::DIGEST_SIZE,
      Self::Blake2s(_) => native::Blake2s::DIGEST_SIZE,
      _ => return Ok(self),
    };
    let n = self.digest_size();
    if n == 0 || n > max {
      return Err(ParamError::DigestSize { len: n, max });
    }
    Ok(self)
  }
}

/// Canonical name: `sha256`, `blake2b` at full length, `blake2b-256` (bits)
/// otherwise.
impl fmt::Display for Kind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Self::Blake2b(n) if n != native::Blake2b::DIGEST_SIZE => write!(f, "{}-{}", self.name(), n.saturating_mul(8)),
      Self::Blake2s(n) if n != native::Blake2s::DIGEST_SIZE => write!(f, "{}-{}", self.name(), n.saturating_mul(8)),
      _ => f.write_str(self.name()),
    }
  }
}

impl FromStr for Kind {
  type Err = Error;

  /// Parse a canonical name (case-insensitive). `ripemd160` is accepted as an
  /// alias for `rmd160`.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let name = s.trim().to_ascii_lowercase();
    let kind = match name.as_str() {
      "md5" => Self::Md5,
      "sha1" => Self::Sha1,
      "sha224" => Self::Sha224,
      "sha256" => Self::Sha256,
      "sha384" => Self::Sha384,
      "sha512" => Self::Sha512,
      "rmd160" | "ripemd160" => Self::Rmd160,
      "blake2b" => Self::BLAKE2B,
      "blake2s" => Self::BLAKE2S,
      other => parse_blake2(other).ok_or_else(|| Error::UnknownKind(s.to_owned()))?,
    };
    Ok(kind.validate()?)
  }
}

fn parse_blake2(name: &str) -> Option<Kind> {
  if let Some(bits) = name.strip_prefix("blake2b-") {
    bytes_from_bits(bits).map(Kind::Blake2b)
  } else if let Some(bits) = name.strip_prefix("blake2s-") {
    bytes_from_bits(bits).map(Kind::Blake2s)
  } else {
    None
  }
}

fn bytes_from_bits(bits: &str) -> Option<usize> {
  if bits.is_empty() || !bits.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  let bits: usize = bits.parse().ok()?;
  (bits % 8 == 0).then_some(bits / 8)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sizes() {
    assert_eq!((Kind::Md5.block_size(), Kind::Md5.digest_size()), (64, 16));
    assert_eq!((Kind::Sha1.block_size(), Kind::Sha1.digest_size()), (64, 20));
    assert_eq!((Kind::Sha224.block_size(), Kind::Sha224.digest_size()), (64, 28));
    assert_eq!((Kind::Sha256.block_size(), Kind::Sha256.digest_size()), (64, 32));
    assert_eq!((Kind::Sha384.block_size(), Kind::Sha384.digest_size()), (128, 48));
    assert_eq!((Kind::Sha512.block_size(), Kind::Sha512.digest_size()), (128, 64));
    assert_eq!((Kind::Rmd160.block_size(), Kind::Rmd160.digest_size()), (64, 20));
    assert_eq!((Kind::Blake2b(20).block_size(), Kind::Blake2b(20).digest_size()), (128, 20));
    assert_eq!((Kind::Blake2s(16).block_size(), Kind::Blake2s(16).digest_size()), (64, 16));
  }

  #[test]
  fn blake2_lengths_are_validated() {
    assert_eq!(Kind::Blake2b(64).validate(), Ok(Kind::BLAKE2B));
    assert_eq!(Kind::Blake2s(1).validate(), Ok(Kind::Blake2s(1)));
    assert_eq!(
      Kind::Blake2b(0).validate(),
      Err(ParamError::DigestSize { len: 0, max: 64 })
    );
    assert_eq!(
      Kind::Blake2s(33).validate(),
      Err(ParamError::DigestSize { len: 33, max: 32 })
    );
  }

  #[test]
  fn names_round_trip() {
    for kind in Kind::DEFAULTS.into_iter().chain([Kind::Blake2b(32), Kind::Blake2s(16)]) {
      assert_eq!(kind.to_string().parse::<Kind>(), Ok(kind), "{kind}");
    }
    assert_eq!(Kind::Blake2b(32).to_string(), "blake2b-256");
    assert_eq!(Kind::BLAKE2S.to_string(), "blake2s");
    assert_eq!(" SHA256 ".parse::<Kind>(), Ok(Kind::Sha256));
    assert_eq!("ripemd160".parse::<Kind>(), Ok(Kind::Rmd160));
  }

  #[test]
  fn bad_names() {
    assert_eq!("sha3".parse::<Kind>(), Err(Error::UnknownKind("sha3".into())));
    assert_eq!("blake2b-12".parse::<Kind>(), Err(Error::UnknownKind("blake2b-12".into())));
    assert_eq!("blake2s-x".parse::<Kind>(), Err(Error::UnknownKind("blake2s-x".into())));
    for signed in ["blake2b-+256", "blake2s-+128", "blake2b- 256", "blake2b-"] {
      assert_eq!(signed.parse::<Kind>(), Err(Error::UnknownKind(signed.into())), "{signed}");
    }
    assert_eq!(
      "blake2s-512".parse::<Kind>().map_err(|e| e.as_param()),
      Err(Some(ParamError::DigestSize { len: 64, max: 32 }))
    );
  }
}
