//! BLAKE2b (RFC 7693), keyed and variable-output.
//!
//! Portable, `no_std`, pure Rust implementation.

#![allow(clippy::indexing_slicing)] // Compression schedule uses fixed indices

use traits::{Keying, ParamError, Primitive, check_keyed_params};

pub(crate) const BLOCK_LEN: usize = 128;
pub(crate) const OUT_LEN: usize = 64;
pub(crate) const KEY_LEN: usize = 64;

const IV: [u64; 8] = [
  0x6a09_e667_f3bc_c908,
  0xbb67_ae85_84ca_a73b,
  0x3c6e_f372_fe94_f82b,
  0xa54f_f53a_5f1d_36f1,
  0x510e_527f_ade6_82d1,
  0x9b05_688c_2b3e_6c1f,
  0x1f83_d9ab_fb41_bd6b,
  0x5be0_cd19_137e_2179,
];

const SIGMA: [[usize; 16]; 12] = [
  [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
  [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
  [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
  [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
  [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
  [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
  [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
  [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
  [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
  [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
  [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
  [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
];

#[inline(always)]
fn g(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize, x: u64, y: u64) {
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
  v[d] = (v[d] ^ v[a]).rotate_right(32);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = (v[b] ^ v[c]).rotate_right(24);
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
  v[d] = (v[d] ^ v[a]).rotate_right(16);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = (v[b] ^ v[c]).rotate_right(63);
}

fn compress(h: &mut [u64; 8], block: &[u8; BLOCK_LEN], t: u128, is_last: bool) {
  let (chunks, _) = block.as_chunks::<8>();
  let mut m = [0u64; 16];
  for (w, c) in m.iter_mut().zip(chunks) {
    *w = u64::from_le_bytes(*c);
  }

  let mut v = [0u64; 16];
  v[..8].copy_from_slice(h);
  v[8..].copy_from_slice(&IV);
  v[12] ^= t as u64;
  v[13] ^= (t >> 64) as u64;
  if is_last {
    v[14] = !v[14];
  }

  for s in &SIGMA {
    g(&mut v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
    g(&mut v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
    g(&mut v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
    g(&mut v, 3, 7, 11, 15, m[s[6]], m[s[7]]);

    g(&mut v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
    g(&mut v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
    g(&mut v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
    g(&mut v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
  }

  for i in 0..8 {
    h[i] ^= v[i] ^ v[i + 8];
  }
}

/// Portable BLAKE2b state.
#[derive(Clone)]
pub struct Blake2b {
  h: [u64; 8],
  buf: [u8; BLOCK_LEN],
  buf_len: usize,
  bytes_hashed: u128,
  outlen: usize,
}

impl Blake2b {
  fn with_params(outlen: usize, key: &[u8]) -> Self {
    debug_assert!((1..=OUT_LEN).contains(&outlen) && key.len() <= KEY_LEN);
    let mut h = IV;
    // Parameter block word 0: digest length, key length, fanout=1, depth=1.
    h[0] ^= 0x0101_0000 ^ ((key.len() as u64) << 8) ^ outlen as u64;
    let mut state = Self {
      h,
      buf: [0u8; BLOCK_LEN],
      buf_len: 0,
      bytes_hashed: 0,
      outlen,
    };
    if !key.is_empty() {
      // The zero-padded key is the first message block.
      state.buf[..key.len()].copy_from_slice(key);
      state.buf_len = BLOCK_LEN;
    }
    state
  }
}

impl Primitive for Blake2b {
  const NAME: &'static str = "blake2b";
  const BLOCK_SIZE: usize = BLOCK_LEN;
  const DIGEST_SIZE: usize = OUT_LEN;
  const KEYING: Keying = Keying::Native { key_size_limit: KEY_LEN };

  #[inline]
  fn init() -> Self {
    Self::with_params(OUT_LEN, &[])
  }

  fn update(&mut self, mut data: &[u8]) {
    if data.is_empty() {
      return;
    }

    if self.buf_len != 0 {
      let take = core::cmp::min(BLOCK_LEN - self.buf_len, data.len());
      self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&data[..take]);
      self.buf_len += take;
      data = &data[take..];

      // Keep a full block buffered until we know there is more input, so the
      // final block can be marked with the `is_last` flag.
      if self.buf_len == BLOCK_LEN && !data.is_empty() {
        self.bytes_hashed = self.bytes_hashed.wrapping_add(BLOCK_LEN as u128);
        compress(&mut self.h, &self.buf, self.bytes_hashed, false);
        self.buf_len = 0;
      }
    }

    let (blocks, rest) = data.as_chunks::<BLOCK_LEN>();
    if let Some((last, leading)) = blocks.split_last() {
      // With no trailing bytes, hold back the last full block for finalization.
      let to_compress = if rest.is_empty() { leading } else { blocks };
      for block in to_compress {
        self.bytes_hashed = self.bytes_hashed.wrapping_add(BLOCK_LEN as u128);
        compress(&mut self.h, block, self.bytes_hashed, false);
      }
      if rest.is_empty() {
        self.buf = *last;
        self.buf_len = BLOCK_LEN;
      }
    }

    if !rest.is_empty() {
      self.buf[..rest.len()].copy_from_slice(rest);
      self.buf_len = rest.len();
    }
  }

  fn finalize_into(&mut self, out: &mut [u8]) {
    debug_assert_eq!(out.len(), self.outlen);
    let len = self.buf_len;
    self.buf[len..].fill(0);
    let t = self.bytes_hashed.wrapping_add(len as u128);
    compress(&mut self.h, &self.buf, t, true);

    let mut full = [0u8; OUT_LEN];
    for (chunk, word) in full.chunks_exact_mut(8).zip(self.h) {
      chunk.copy_from_slice(&word.to_le_bytes());
    }
    out.copy_from_slice(&full[..self.outlen]);
  }

  #[inline]
  fn digest_size(&self) -> usize {
    self.outlen
  }

  fn with_outlen_and_key(outlen: usize, key: &[u8]) -> Result<Self, ParamError> {
    check_keyed_params::<Self>(outlen, key)?;
    Ok(Self::with_params(outlen, key))
  }
}
