//! Generic digest engine.
//!
//! Everything here is written once against [`traits::Primitive`] and works
//! for any algorithm that implements it.
//!
//! # Layers
//!
//! | Layer | Mutates input? | Entry point |
//! |-------|----------------|-------------|
//! | In-place | yes | [`raw`] (`init`, `update`, `finalize`) |
//! | Immutable | no | [`Engine`] (`feed`, `get`, `digest`, ...) |
//! | HMAC | no | [`Engine::hmac`], [`Engine::hmac_iter`] |
//! | Type-erased | no | [`DynEngine`], [`DynState`] |
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]

mod buffer;
mod digest;
mod dynamic;
mod engine;
mod error;
mod hmac;
pub mod raw;

pub use buffer::{Buffer, BufferError, view};
pub use digest::{Digest, Erased, HexError};
pub use dynamic::{DynEngine, DynState};
pub use engine::Engine;
pub use error::Error;
pub use hmac::HmacState;
pub use raw::Context;
pub use traits::{Descriptor, Keying, ParamError, Primitive, VerificationError};
