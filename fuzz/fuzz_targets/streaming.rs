//! Arbitrary chunkings of the same input must give the one-shot digest.

#![no_main]

use arbitrary::Arbitrary;
use digestkit::Kind;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  selector: u8,
  data: Vec<u8>,
  /// Chunk sizes for streaming updates
  chunk_sizes: Vec<usize>,
}

fuzz_target!(|input: Input| {
  let kind = match input.selector % 4 {
    0 => Kind::Sha256,
    1 => Kind::Rmd160,
    2 => Kind::Blake2b(usize::from(input.selector % 64) + 1),
    _ => Kind::Blake2s(usize::from(input.selector % 32) + 1),
  };

  let expected = digestkit::digest(kind, &input.data).unwrap();

  let mut chunks = Vec::new();
  let mut rest = input.data.as_slice();
  let mut idx = 0;
  while !rest.is_empty() {
    let size = if input.chunk_sizes.is_empty() {
      1
    } else {
      (input.chunk_sizes[idx % input.chunk_sizes.len()] % 256).max(1)
    };
    let (head, tail) = rest.split_at(size.min(rest.len()));
    chunks.push(head);
    rest = tail;
    idx += 1;
  }

  assert_eq!(digestkit::digest_iter(kind, chunks).unwrap(), expected, "{kind} streaming mismatch");
});
