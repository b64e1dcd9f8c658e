//! Hash primitives behind the [`traits::Primitive`] capability.
//!
//! This crate supplies the concrete compression functions the engine is
//! generic over. It is `no_std` compatible; the `std` feature (default)
//! enables runtime CPU feature detection in the SIMD backends and the
//! environment-driven [`config`].
//!
//! # Modules
//!
//! - [`native`] - Accelerated primitives for every supported algorithm.
//! - [`portable`] - Scalar BLAKE2b/BLAKE2s kernels (keyed, variable output).
//! - [`config`] - BLAKE2 backend selection.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod native;
pub mod portable;

pub use config::{Blake2Backend, Blake2Force, Config};
pub use traits::Primitive;
