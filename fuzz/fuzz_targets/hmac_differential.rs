//! Differential fuzzing of HMAC against the `hmac` crate.

#![no_main]

use arbitrary::Arbitrary;
use digestkit::Kind;
use hmac::{Hmac, Mac};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  key: Vec<u8>,
  data: Vec<u8>,
}

fuzz_target!(|input: Input| {
  check::<Hmac<sha2::Sha256>>(Kind::Sha256, &input.key, &input.data);
  check::<Hmac<sha2::Sha512>>(Kind::Sha512, &input.key, &input.data);
  check::<Hmac<md5::Md5>>(Kind::Md5, &input.key, &input.data);
});

fn check<M: Mac + hmac::digest::KeyInit>(kind: Kind, key: &[u8], data: &[u8]) {
  let ours = digestkit::hmac(kind, key, data).unwrap();

  let mut mac = <M as hmac::digest::KeyInit>::new_from_slice(key).unwrap();
  mac.update(data);
  let reference = mac.finalize().into_bytes();

  assert_eq!(
    ours.as_bytes(),
    reference.as_slice(),
    "{kind} mismatch: key_len={}, data_len={}",
    key.len(),
    data.len()
  );
}
