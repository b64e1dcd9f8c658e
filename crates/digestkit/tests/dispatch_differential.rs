use digestkit::{Blake2Force, Config, Kind, Registry};
use hmac::{Hmac, Mac};
use proptest::prelude::*;

fn kinds() -> impl Strategy<Value = Kind> {
  prop_oneof![
    proptest::sample::select(Kind::DEFAULTS.to_vec()),
    (1usize..=64).prop_map(Kind::Blake2b),
    (1usize..=32).prop_map(Kind::Blake2s),
  ]
}

fn chunks(data: &[u8], step: usize) -> Vec<&[u8]> {
  data.chunks(step.max(1)).collect()
}

proptest! {
  #[test]
  fn digest_iter_matches_one_shot(
    kind in kinds(),
    data in proptest::collection::vec(any::<u8>(), 0..2048),
    step in 1usize..300,
  ) {
    let whole = digestkit::digest(kind, &data).unwrap();
    prop_assert_eq!(whole.len(), kind.digest_size());
    prop_assert_eq!(digestkit::digest_iter(kind, chunks(&data, step)).unwrap(), whole);
  }

  #[test]
  fn hmac_iter_matches_one_shot(
    kind in kinds(),
    key in proptest::collection::vec(any::<u8>(), 0..=32),
    data in proptest::collection::vec(any::<u8>(), 0..1024),
    step in 1usize..200,
  ) {
    let whole = digestkit::hmac(kind, &key, &data).unwrap();
    prop_assert_eq!(whole.len(), kind.digest_size());
    prop_assert_eq!(digestkit::hmac_iter(kind, &key, chunks(&data, step)).unwrap(), whole);
  }

  #[test]
  fn sha2_hmac_matches_hmac_crate(
    key in proptest::collection::vec(any::<u8>(), 0..256),
    data in proptest::collection::vec(any::<u8>(), 0..1024),
  ) {
    let mut mac = <Hmac<sha2::Sha256> as Mac>::new_from_slice(&key).unwrap();
    mac.update(&data);
    let expected = mac.finalize().into_bytes().to_vec();
    prop_assert_eq!(digestkit::hmac(Kind::Sha256, &key, &data).unwrap().to_raw(), expected);

    let mut mac = <Hmac<sha2::Sha384> as Mac>::new_from_slice(&key).unwrap();
    mac.update(&data);
    let expected = mac.finalize().into_bytes().to_vec();
    prop_assert_eq!(digestkit::hmac(Kind::Sha384, &key, &data).unwrap().to_raw(), expected);
  }

  #[test]
  fn blake2_matches_blake2_crate(
    data in proptest::collection::vec(any::<u8>(), 0..2048),
    key in proptest::collection::vec(any::<u8>(), 1..=32),
  ) {
    use blake2::{Blake2bMac512, Blake2s256, Blake2sMac256, digest::{Digest as _, Mac as _}};

    prop_assert_eq!(
      digestkit::digest(Kind::BLAKE2S, &data).unwrap().to_raw(),
      Blake2s256::digest(&data).to_vec()
    );

    let mut mac = Blake2sMac256::new_from_slice(&key).unwrap();
    mac.update(&data);
    prop_assert_eq!(
      digestkit::hmac(Kind::BLAKE2S, &key, &data).unwrap().to_raw(),
      mac.finalize().into_bytes().to_vec()
    );

    let mut mac = Blake2bMac512::new_from_slice(&key).unwrap();
    mac.update(&data);
    prop_assert_eq!(
      digestkit::hmac(Kind::BLAKE2B, &key, &data).unwrap().to_raw(),
      mac.finalize().into_bytes().to_vec()
    );
  }

  #[test]
  fn forced_backends_agree(
    n in 1usize..=64,
    key in proptest::collection::vec(any::<u8>(), 0..=64),
    data in proptest::collection::vec(any::<u8>(), 0..1024),
  ) {
    let simd = Registry::with_config(Config::new(Blake2Force::Simd));
    let portable = Registry::with_config(Config::new(Blake2Force::Portable));
    let kind = Kind::Blake2b(n);
    prop_assert_eq!(simd.digest(kind, &data).unwrap(), portable.digest(kind, &data).unwrap());
    prop_assert_eq!(simd.hmac(kind, &key, &data).unwrap(), portable.hmac(kind, &key, &data).unwrap());
  }
}
