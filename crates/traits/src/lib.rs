//! Core traits for the digestkit hashing engine.
//!
//! This crate defines the capability every hash primitive must provide before
//! the generic engine can wrap it. It is `no_std` compatible and has zero
//! dependencies.
//!
//! # Trait Hierarchy
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`Primitive`] | Mutable `init`/`update`/`finalize` scratch state for one algorithm |
//! | [`Keying`] | How a primitive authenticates: RFC 2104 padding or native keyed mode |
//! | [`Descriptor`] | `(block_size, digest_size)` pair of an engine instance |
//!
//! # Error Types
//!
//! - [`ParamError`] - Rejected key or output-length parameters
//! - [`VerificationError`] - Opaque error for MAC verification
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod error;
mod primitive;

pub use error::{ParamError, VerificationError};
pub use primitive::{Descriptor, Keying, MAX_BLOCK_SIZE, MAX_DIGEST_SIZE, Primitive, check_keyed_params};
