use hashes::native::{Sha224, Sha256, Sha384, Sha512};
use proptest::prelude::*;
use traits::Primitive;

fn streaming<P: Primitive>(data: &[u8]) -> Vec<u8> {
  let mut state = P::init();
  let mut i = 0usize;
  while i < data.len() {
    let step = (data[i] as usize % 97) + 1;
    let end = core::cmp::min(data.len(), i + step);
    state.update(&data[i..end]);
    i = end;
  }
  let mut out = vec![0u8; P::DIGEST_SIZE];
  state.finalize_into(&mut out);
  out
}

proptest! {
  #[test]
  fn sha2_streaming_matches_sha2(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
    use sha2::Digest as _;
    prop_assert_eq!(streaming::<Sha224>(&data), sha2::Sha224::digest(&data).to_vec());
    prop_assert_eq!(streaming::<Sha256>(&data), sha2::Sha256::digest(&data).to_vec());
    prop_assert_eq!(streaming::<Sha384>(&data), sha2::Sha384::digest(&data).to_vec());
    prop_assert_eq!(streaming::<Sha512>(&data), sha2::Sha512::digest(&data).to_vec());
  }
}
