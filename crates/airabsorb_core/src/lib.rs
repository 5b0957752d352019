//! Airabsorb Core - Adapter Layer
//!
//! This crate wraps an [`AbsorptionKernel`] backend in the lifecycle and
//! validation the host contract needs, including:
//! - Explicit initialize/terminate state tracking
//! - Sample-rate and input validation against a runtime configuration
//! - Capacity-checked output copying (the kernel chooses the output length)
//! - A structured error type with a stable C fault-code mapping
//!
//! # Architecture
//!
//! ```text
//! Host (C ABI) ──▶ Absorption ──▶ AbsorptionKernel (generated lib or stub)
//!                     │
//!                     └── lifecycle + validation + fault mapping
//! ```
//!
//! The kernel holds whatever filter state `set_fs` establishes; this layer
//! holds none of its own beyond the lifecycle flag and configuration.

mod absorption;
mod config;
mod error;

pub use absorption::Absorption;
pub use config::AbsorptionConfig;
pub use error::{AbsorptionError, AbsorptionResult};

// Re-export kernel types for convenience
pub use airabsorb_kernel::{AbsorptionKernel, KernelError, Operation, StubKernel};
#[cfg(feature = "generated")]
pub use airabsorb_kernel::GeneratedKernel;
