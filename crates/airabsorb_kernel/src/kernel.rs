//! Absorption Kernel Trait
//!
//! Defines the interface the adapter layer programs against, so the real
//! generated library and a test stub are interchangeable.

use crate::error::KernelError;
use crate::op::Operation;

/// A backend implementing the generated library's entry-point contract
///
/// # Contract
///
/// - `run` is synchronous and completes before returning; no work is queued.
/// - For a fixed sample rate, identical inputs produce identical outputs.
/// - Backends are not assumed reentrant; callers must serialize calls.
/// - `initialize` must be called before `run`, and `terminate` after the
///   last `run`. A backend's behavior outside that window is its own affair;
///   the adapter layer guards the window.
pub trait AbsorptionKernel: Send {
    /// One-time setup of the kernel's internal state
    fn initialize(&mut self) -> Result<(), KernelError>;

    /// Invoke the kernel entry point
    ///
    /// `input` is the impulse response for [`Operation::Apply`]; for
    /// [`Operation::SetFs`] it is empty and the backend substitutes whatever
    /// placeholder its calling convention requires. The output length is
    /// chosen by the kernel, not the caller.
    fn run(
        &mut self,
        op: Operation,
        sample_rate: u32,
        input: &[f32],
    ) -> Result<Vec<f32>, KernelError>;

    /// One-time teardown of the kernel's internal state
    fn terminate(&mut self) -> Result<(), KernelError>;

    /// Human-readable backend name for debugging/logs
    fn name(&self) -> &'static str;
}
