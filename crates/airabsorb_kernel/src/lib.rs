//! Airabsorb Kernel - Opaque IR Kernel Abstraction
//!
//! This crate wraps the generated air-absorption numerical library behind a
//! small trait, including:
//! - A closed enumeration of the kernel's operation tags
//! - The `AbsorptionKernel` trait that the adapter layer programs against
//! - A deterministic stub backend for tests and host bring-up
//! - The raw FFI binding to the generated library (feature `generated`)
//!
//! # Architecture
//!
//! The generated library is a black box: it takes an operation tag, a sample
//! rate, and an input sample array, and produces an output array while
//! maintaining whatever filter state it needs internally. Nothing in this
//! crate interprets the numbers - it only marshals them across the boundary.

mod error;
#[cfg(feature = "generated")]
mod generated;
mod kernel;
mod op;
mod stub;

pub use error::KernelError;
#[cfg(feature = "generated")]
pub use generated::GeneratedKernel;
pub use kernel::AbsorptionKernel;
pub use op::{Operation, TAG_CAPACITY};
pub use stub::StubKernel;
