use criterion::{BenchmarkGroup, Throughput, measurement::WallTime};
use sha2::{Digest as _, Sha256};

/// Deterministic filler: SHA-256 over `seed || counter`, concatenated.
pub fn filler(len: usize, seed: u64) -> Vec<u8> {
  let mut out = Vec::with_capacity(len + 32);
  let mut counter = 0u64;
  while out.len() < len {
    let block = Sha256::new()
      .chain_update(seed.to_le_bytes())
      .chain_update(counter.to_le_bytes())
      .finalize();
    out.extend_from_slice(&block);
    counter += 1;
  }
  out.truncate(len);
  out
}

/// Message lengths around the 64- and 128-byte block boundaries, then bulk.
pub fn payloads() -> Vec<(usize, Vec<u8>)> {
  [0usize, 55, 64, 65, 127, 128, 1024, 16 * 1024, 1024 * 1024]
    .into_iter()
    .map(|len| (len, filler(len, 0xD16E_57)))
    .collect()
}

/// HMAC keys: under a block, exactly one SHA-256 block, and long enough to be
/// hashed first.
pub fn mac_keys() -> [(&'static str, Vec<u8>); 3] {
  [
    ("key16", filler(16, 1)),
    ("key64", filler(64, 2)),
    ("key200", filler(200, 3)),
  ]
}

pub fn throughput(group: &mut BenchmarkGroup<'_, WallTime>, len: usize) {
  group.throughput(match len {
    0 => Throughput::Elements(1),
    n => Throughput::Bytes(n as u64),
  });
}
