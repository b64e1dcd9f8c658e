//! BLAKE2s (RFC 7693), keyed and variable-output.
//!
//! Portable, `no_std`, pure Rust implementation.

#![allow(clippy::indexing_slicing)] // Compression schedule uses fixed indices

use traits::{Keying, ParamError, Primitive, check_keyed_params};

pub(crate) const BLOCK_LEN: usize = 64;
pub(crate) const OUT_LEN: usize = 32;
pub(crate) const KEY_LEN: usize = 32;

const IV: [u32; 8] = [
  0x6A09_E667,
  0xBB67_AE85,
  0x3C6E_F372,
  0xA54F_F53A,
  0x510E_527F,
  0x9B05_688C,
  0x1F83_D9AB,
  0x5BE0_CD19,
];

const SIGMA: [[usize; 16]; 10] = [
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
];

#[inline(always)]
fn g(v: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize, x: u32, y: u32) {
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
  v[d] = (v[d] ^ v[a]).rotate_right(16);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = (v[b] ^ v[c]).rotate_right(12);
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
  v[d] = (v[d] ^ v[a]).rotate_right(8);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = (v[b] ^ v[c]).rotate_right(7);
}

fn compress(h: &mut [u32; 8], block: &[u8; BLOCK_LEN], t: u64, is_last: bool) {
  let (chunks, _) = block.as_chunks::<4>();
  let mut m = [0u32; 16];
  for (w, c) in m.iter_mut().zip(chunks) {
    *w = u32::from_le_bytes(*c);
  }

  let mut v = [0u32; 16];
  v[..8].copy_from_slice(h);
  v[8..].copy_from_slice(&IV);
  v[12] ^= t as u32;
  v[13] ^= (t >> 32) as u32;
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

/// Portable BLAKE2s state.
#[derive(Clone)]
pub struct Blake2s {
  h: [u32; 8],
  buf: [u8; BLOCK_LEN],
  buf_len: usize,
  bytes_hashed: u64,
  outlen: usize,
}

impl Blake2s {
  fn with_params(outlen: usize, key: &[u8]) -> Self {
    debug_assert!((1..=OUT_LEN).contains(&outlen) && key.len() <= KEY_LEN);
    let mut h = IV;
    h[0] ^= 0x0101_0000 ^ ((key.len() as u32) << 8) ^ outlen as u32;
    let mut state = Self {
      h,
      buf: [0u8; BLOCK_LEN],
      buf_len: 0,
      bytes_hashed: 0,
      outlen,
    };
    if !key.is_empty() {
      state.buf[..key.len()].copy_from_slice(key);
      state.buf_len = BLOCK_LEN;
    }
    state
  }

  #[inline]
  fn compress_full(&mut self, block: &[u8; BLOCK_LEN]) {
    self.bytes_hashed = self.bytes_hashed.wrapping_add(BLOCK_LEN as u64);
    compress(&mut self.h, block, self.bytes_hashed, false);
  }
}

impl Primitive for Blake2s {
  const NAME: &'static str = "blake2s";
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

      if self.buf_len == BLOCK_LEN && !data.is_empty() {
        let block = self.buf;
        self.compress_full(&block);
        self.buf_len = 0;
      }
    }

    let (blocks, rest) = data.as_chunks::<BLOCK_LEN>();
    if let Some((last, leading)) = blocks.split_last() {
      let to_compress = if rest.is_empty() { leading } else { blocks };
      for block in to_compress {
        self.compress_full(block);
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
    let t = self.bytes_hashed.wrapping_add(len as u64);
    compress(&mut self.h, &self.buf, t, true);

    let mut full = [0u8; OUT_LEN];
    for (chunk, word) in full.chunks_exact_mut(4).zip(self.h) {
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
