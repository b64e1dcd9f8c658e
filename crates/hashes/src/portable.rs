//! Portable BLAKE2 kernels.
//!
//! Scalar implementations that run everywhere and support the full keyed,
//! variable-output parameter space. They are the fallback when SIMD kernels
//! are unavailable or forced off (see [`crate::config`]).

mod blake2b;
mod blake2s;

pub use blake2b::Blake2b;
pub use blake2s::Blake2s;
