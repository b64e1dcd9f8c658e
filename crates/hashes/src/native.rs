//! Platform-accelerated primitives.
//!
//! Thin adapters that expose third-party kernels through [`Primitive`]:
//!
//! - MD5, SHA-1, SHA-2, RIPEMD-160: RustCrypto (`md-5`, `sha1`, `sha2`,
//!   `ripemd`). `sha1`/`sha2` select SHA-NI / ARMv8 SHA kernels at runtime.
//! - BLAKE2b / BLAKE2s: `blake2b_simd` / `blake2s_simd` (AVX2, SSE4.1).
//!
//! The adapters add no buffering of their own; every byte goes straight to
//! the wrapped state.

use digest::Digest as _;
use traits::{Keying, ParamError, Primitive, check_keyed_params};

macro_rules! rustcrypto_primitive {
  ($(#[$meta:meta])* $name:ident => $inner:ty, $algo:literal, block = $block:literal, digest = $digest:literal) => {
    $(#[$meta])*
    #[derive(Clone)]
    pub struct $name($inner);

    impl Primitive for $name {
      const NAME: &'static str = $algo;
      const BLOCK_SIZE: usize = $block;
      const DIGEST_SIZE: usize = $digest;
      const KEYING: Keying = Keying::Padded;

      #[inline]
      fn init() -> Self {
        Self(<$inner>::new())
      }

      #[inline]
      fn update(&mut self, data: &[u8]) {
        self.0.update(data);
      }

      #[inline]
      fn finalize_into(&mut self, out: &mut [u8]) {
        out.copy_from_slice(&self.0.finalize_reset());
      }
    }
  };
}

rustcrypto_primitive!(
  /// MD5 (RFC 1321).
  Md5 => md5::Md5, "md5", block = 64, digest = 16
);
rustcrypto_primitive!(
  /// SHA-1 (FIPS 180-4).
  Sha1 => sha1::Sha1, "sha1", block = 64, digest = 20
);
rustcrypto_primitive!(
  /// SHA-224 (FIPS 180-4).
  Sha224 => sha2::Sha224, "sha224", block = 64, digest = 28
);
rustcrypto_primitive!(
  /// SHA-256 (FIPS 180-4).
  Sha256 => sha2::Sha256, "sha256", block = 64, digest = 32
);
rustcrypto_primitive!(
  /// SHA-384 (FIPS 180-4).
  Sha384 => sha2::Sha384, "sha384", block = 128, digest = 48
);
rustcrypto_primitive!(
  /// SHA-512 (FIPS 180-4).
  Sha512 => sha2::Sha512, "sha512", block = 128, digest = 64
);
rustcrypto_primitive!(
  /// RIPEMD-160.
  Rmd160 => ripemd::Ripemd160, "rmd160", block = 64, digest = 20
);

/// BLAKE2b backed by `blake2b_simd`.
#[derive(Clone)]
pub struct Blake2b {
  state: blake2b_simd::State,
  outlen: usize,
}

impl Primitive for Blake2b {
  const NAME: &'static str = "blake2b";
  const BLOCK_SIZE: usize = blake2b_simd::BLOCKBYTES;
  const DIGEST_SIZE: usize = blake2b_simd::OUTBYTES;
  const KEYING: Keying = Keying::Native {
    key_size_limit: blake2b_simd::KEYBYTES,
  };

  #[inline]
  fn init() -> Self {
    Self {
      state: blake2b_simd::Params::new().to_state(),
      outlen: Self::DIGEST_SIZE,
    }
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.state.update(data);
  }

  #[inline]
  fn finalize_into(&mut self, out: &mut [u8]) {
    out.copy_from_slice(self.state.finalize().as_bytes());
  }

  #[inline]
  fn digest_size(&self) -> usize {
    self.outlen
  }

  fn with_outlen_and_key(outlen: usize, key: &[u8]) -> Result<Self, ParamError> {
    check_keyed_params::<Self>(outlen, key)?;
    Ok(Self {
      state: blake2b_simd::Params::new().hash_length(outlen).key(key).to_state(),
      outlen,
    })
  }
}

/// BLAKE2s backed by `blake2s_simd`.
#[derive(Clone)]
pub struct Blake2s {
  state: blake2s_simd::State,
  outlen: usize,
}

impl Primitive for Blake2s {
  const NAME: &'static str = "blake2s";
  const BLOCK_SIZE: usize = blake2s_simd::BLOCKBYTES;
  const DIGEST_SIZE: usize = blake2s_simd::OUTBYTES;
  const KEYING: Keying = Keying::Native {
    key_size_limit: blake2s_simd::KEYBYTES,
  };

  #[inline]
  fn init() -> Self {
    Self {
      state: blake2s_simd::Params::new().to_state(),
      outlen: Self::DIGEST_SIZE,
    }
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.state.update(data);
  }

  #[inline]
  fn finalize_into(&mut self, out: &mut [u8]) {
    out.copy_from_slice(self.state.finalize().as_bytes());
  }

  #[inline]
  fn digest_size(&self) -> usize {
    self.outlen
  }

  fn with_outlen_and_key(outlen: usize, key: &[u8]) -> Result<Self, ParamError> {
    check_keyed_params::<Self>(outlen, key)?;
    Ok(Self {
      state: blake2s_simd::Params::new().hash_length(outlen).key(key).to_state(),
      outlen,
    })
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use super::*;

  fn digest<P: Primitive>(data: &[u8]) -> Vec<u8> {
    let mut state = P::init();
    state.update(data);
    let mut out = alloc::vec![0u8; state.digest_size()];
    state.finalize_into(&mut out);
    out
  }

  fn hex(bytes: &[u8]) -> alloc::string::String {
    use core::fmt::Write as _;
    let mut s = alloc::string::String::new();
    for b in bytes {
      let _ = write!(s, "{b:02x}");
    }
    s
  }

  #[test]
  fn known_answers() {
    assert_eq!(hex(&digest::<Md5>(b"")), "d41d8cd98f00b204e9800998ecf8427e");
    assert_eq!(hex(&digest::<Sha1>(b"abc")), "a9993e364706816aba3e25717850c26c9cd0d89d");
    assert_eq!(
      hex(&digest::<Sha224>(b"abc")),
      "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7"
    );
    assert_eq!(
      hex(&digest::<Sha256>(b"abc")),
      "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(hex(&digest::<Rmd160>(b"")), "9c1185a5c5e9fc54612808977ee8f548b2258d31");
    assert_eq!(hex(&digest::<Rmd160>(b"abc")), "8eb208f7e05d987a9b044a8e98c6b087f15a0bfc");
    assert_eq!(
      hex(&digest::<Blake2s>(b"")),
      "69217a3079908094e11121d042354a7c1f55b6482ca1a51e1b250dfd1ed0eef9"
    );
  }

  #[test]
  fn digest_sizes_match_outputs() {
    assert_eq!(digest::<Md5>(b"x").len(), Md5::DIGEST_SIZE);
    assert_eq!(digest::<Sha1>(b"x").len(), Sha1::DIGEST_SIZE);
    assert_eq!(digest::<Sha224>(b"x").len(), Sha224::DIGEST_SIZE);
    assert_eq!(digest::<Sha256>(b"x").len(), Sha256::DIGEST_SIZE);
    assert_eq!(digest::<Sha384>(b"x").len(), Sha384::DIGEST_SIZE);
    assert_eq!(digest::<Sha512>(b"x").len(), Sha512::DIGEST_SIZE);
    assert_eq!(digest::<Rmd160>(b"x").len(), Rmd160::DIGEST_SIZE);
    assert_eq!(digest::<Blake2b>(b"x").len(), Blake2b::DIGEST_SIZE);
  }

  #[test]
  fn blake2_variable_output() {
    let mut state = Blake2b::with_outlen_and_key(32, b"").unwrap();
    let mut out = [0u8; 32];
    state.finalize_into(&mut out);
    assert_eq!(
      hex(&out),
      "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
    );
    assert!(Blake2s::with_outlen_and_key(32, &[0u8; 33]).is_err());
  }
}
