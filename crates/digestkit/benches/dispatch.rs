use core::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use digestkit::{Engine, Kind, native::Sha256};
use hmac::{Hmac, Mac};

mod common;

fn dispatch(c: &mut Criterion) {
  let inputs = common::payloads();
  let mut group = c.benchmark_group("digestkit/dispatch");
  let typed = Engine::<Sha256>::new();

  for (len, data) in &inputs {
    common::throughput(&mut group, *len);

    group.bench_with_input(BenchmarkId::new("sha256/typed", len), data, |b, d| {
      b.iter(|| black_box(typed.digest(black_box(d))))
    });
    group.bench_with_input(BenchmarkId::new("sha256/kind", len), data, |b, d| {
      b.iter(|| black_box(digestkit::digest(Kind::Sha256, black_box(d))))
    });
    group.bench_with_input(BenchmarkId::new("blake2b-256/kind", len), data, |b, d| {
      b.iter(|| black_box(digestkit::digest(Kind::Blake2b(32), black_box(d))))
    });
  }

  group.finish();
}

fn mac(c: &mut Criterion) {
  let inputs = common::payloads();
  let mut group = c.benchmark_group("digestkit/hmac");
  let key = common::filler(32, 0x5EED);

  for (len, data) in &inputs {
    common::throughput(&mut group, *len);

    group.bench_with_input(BenchmarkId::new("sha256/digestkit", len), data, |b, d| {
      b.iter(|| black_box(digestkit::hmac(Kind::Sha256, black_box(&key), black_box(d))))
    });
    group.bench_with_input(BenchmarkId::new("sha256/hmac", len), data, |b, d| {
      b.iter(|| {
        let mut mac = <Hmac<sha2::Sha256> as Mac>::new_from_slice(black_box(&key)).unwrap();
        mac.update(black_box(d));
        black_box(mac.finalize().into_bytes())
      })
    });
    group.bench_with_input(BenchmarkId::new("blake2s/digestkit", len), data, |b, d| {
      b.iter(|| black_box(digestkit::hmac(Kind::BLAKE2S, black_box(&key), black_box(d))))
    });
  }

  group.finish();
}

fn mac_keying(c: &mut Criterion) {
  let mut group = c.benchmark_group("digestkit/hmac-keying");
  let data = common::filler(64, 4);
  common::throughput(&mut group, data.len());

  for (label, key) in common::mac_keys() {
    group.bench_with_input(BenchmarkId::new("sha256", label), &key, |b, k| {
      b.iter(|| black_box(digestkit::hmac(Kind::Sha256, black_box(k), black_box(&data))))
    });
    // BLAKE2b keys are capped at 64 bytes.
    if key.len() <= 64 {
      group.bench_with_input(BenchmarkId::new("blake2b", label), &key, |b, k| {
        b.iter(|| black_box(digestkit::hmac(Kind::BLAKE2B, black_box(k), black_box(&data))))
      });
    }
  }

  group.finish();
}

criterion_group!(benches, dispatch, mac, mac_keying);
criterion_main!(benches);
