//! Absorption Adapter - Main Entry Point
//!
//! `Absorption` owns a kernel backend and enforces the contract the host
//! relies on: an explicit initialize/terminate window, validated inputs, and
//! capacity-checked output copying. It keeps no signal state of its own -
//! whatever filter coefficients `set_fs` establishes live inside the kernel.
//!
//! Calls are synchronous and complete before returning. The kernel is not
//! assumed reentrant, so a shared instance must sit behind a lock (the ABI
//! layer does this).

use tracing::{debug, info, warn};

use airabsorb_kernel::{AbsorptionKernel, Operation};

use crate::config::AbsorptionConfig;
use crate::error::{AbsorptionError, AbsorptionResult};

/// Lifecycle window of the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Ready,
    Terminated,
}

/// Adapter around an absorption kernel backend
pub struct Absorption<K: AbsorptionKernel> {
    kernel: K,
    state: Lifecycle,
    config: AbsorptionConfig,
    /// Rate recorded by the last successful `set_fs`, for logging only
    sample_rate: Option<u32>,
}

impl<K: AbsorptionKernel> Absorption<K> {
    /// Create an adapter with default configuration
    pub fn new(kernel: K) -> Self {
        Self {
            kernel,
            state: Lifecycle::Created,
            config: AbsorptionConfig::default(),
            sample_rate: None,
        }
    }

    /// Create an adapter with custom limits
    pub fn with_config(kernel: K, config: AbsorptionConfig) -> AbsorptionResult<Self> {
        config.validate()?;
        Ok(Self {
            kernel,
            state: Lifecycle::Created,
            config,
            sample_rate: None,
        })
    }

    /// Initialize the kernel; must precede every other call
    pub fn initialize(&mut self) -> AbsorptionResult<()> {
        match self.state {
            Lifecycle::Ready => return Err(AbsorptionError::AlreadyInitialized),
            Lifecycle::Terminated => return Err(AbsorptionError::Terminated),
            Lifecycle::Created => {}
        }

        self.kernel.initialize()?;
        self.state = Lifecycle::Ready;
        info!("Absorption adapter initialized (backend: {})", self.kernel.name());
        Ok(())
    }

    /// Configure the kernel's operating sample rate
    ///
    /// The kernel precomputes its filter coefficients from this; the call
    /// carries no impulse response and produces no output.
    pub fn set_fs(&mut self, sample_rate: u32) -> AbsorptionResult<()> {
        self.ensure_ready()?;

        if !self.config.allows_sample_rate(sample_rate) {
            return Err(AbsorptionError::InvalidSampleRate(sample_rate));
        }

        self.kernel.run(Operation::SetFs, sample_rate, &[])?;
        self.sample_rate = Some(sample_rate);
        debug!("Sample rate set to {} Hz", sample_rate);
        Ok(())
    }

    /// Transform an impulse response
    ///
    /// The kernel chooses the output length. The produced samples are copied
    /// into `output` and the produced length returned; if `output` is too
    /// small the call fails with `InsufficientCapacity` and writes nothing.
    /// Calling without a prior `set_fs` is forwarded as-is (the kernel sees
    /// a zero rate with the apply tag, its own contract for that case).
    pub fn apply(&mut self, input: &[f32], output: &mut [f32]) -> AbsorptionResult<usize> {
        self.ensure_ready()?;

        if input.is_empty() {
            return Err(AbsorptionError::EmptyInput);
        }
        if input.len() > self.config.max_input_len {
            return Err(AbsorptionError::InputTooLong {
                len: input.len(),
                max: self.config.max_input_len,
            });
        }
        if self.sample_rate.is_none() {
            warn!("apply called before set_fs; kernel sees an unconfigured rate");
        }

        let produced = self.kernel.run(Operation::Apply, 0, input)?;
        if produced.len() > output.len() {
            return Err(AbsorptionError::InsufficientCapacity {
                required: produced.len(),
                capacity: output.len(),
            });
        }

        output[..produced.len()].copy_from_slice(&produced);
        debug!(
            "Applied absorption: {} samples in, {} samples out",
            input.len(),
            produced.len()
        );
        Ok(produced.len())
    }

    /// Tear the kernel down; the adapter is inert afterwards
    pub fn terminate(&mut self) -> AbsorptionResult<()> {
        match self.state {
            Lifecycle::Created => return Err(AbsorptionError::NotInitialized),
            Lifecycle::Terminated => return Err(AbsorptionError::Terminated),
            Lifecycle::Ready => {}
        }

        self.kernel.terminate()?;
        self.state = Lifecycle::Terminated;
        info!("Absorption adapter terminated");
        Ok(())
    }

    /// Whether the adapter is inside its initialize/terminate window
    pub fn is_ready(&self) -> bool {
        self.state == Lifecycle::Ready
    }

    /// Rate recorded by the last successful `set_fs`, if any
    pub fn sample_rate(&self) -> Option<u32> {
        self.sample_rate
    }

    /// Configured limits
    pub fn config(&self) -> &AbsorptionConfig {
        &self.config
    }

    fn ensure_ready(&self) -> AbsorptionResult<()> {
        match self.state {
            Lifecycle::Ready => Ok(()),
            Lifecycle::Created => Err(AbsorptionError::NotInitialized),
            Lifecycle::Terminated => Err(AbsorptionError::Terminated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airabsorb_kernel::{KernelError, StubKernel};

    fn ready_adapter() -> Absorption<StubKernel> {
        let mut adapter = Absorption::new(StubKernel::new());
        adapter.initialize().unwrap();
        adapter
    }

    #[test]
    fn test_initialize_then_terminate() {
        let mut adapter = Absorption::new(StubKernel::new());
        assert!(adapter.initialize().is_ok());
        assert!(adapter.is_ready());
        assert!(adapter.terminate().is_ok());
        assert!(!adapter.is_ready());
    }

    #[test]
    fn test_double_initialize_fails() {
        let mut adapter = ready_adapter();
        assert_eq!(
            adapter.initialize().unwrap_err(),
            AbsorptionError::AlreadyInitialized
        );
    }

    #[test]
    fn test_apply_before_initialize_fails() {
        let mut adapter = Absorption::new(StubKernel::new());
        let mut out = [0.0_f32; 4];
        assert_eq!(
            adapter.apply(&[1.0], &mut out).unwrap_err(),
            AbsorptionError::NotInitialized
        );
    }

    #[test]
    fn test_calls_after_terminate_fail() {
        let mut adapter = ready_adapter();
        adapter.terminate().unwrap();

        assert_eq!(adapter.set_fs(48_000).unwrap_err(), AbsorptionError::Terminated);
        let mut out = [0.0_f32; 4];
        assert_eq!(
            adapter.apply(&[1.0], &mut out).unwrap_err(),
            AbsorptionError::Terminated
        );
        assert_eq!(adapter.terminate().unwrap_err(), AbsorptionError::Terminated);
    }

    #[test]
    fn test_set_fs_validates_rate() {
        let mut adapter = ready_adapter();
        assert!(adapter.set_fs(48_000).is_ok());
        assert_eq!(adapter.sample_rate(), Some(48_000));

        assert_eq!(
            adapter.set_fs(1_000).unwrap_err(),
            AbsorptionError::InvalidSampleRate(1_000)
        );
        // Last good rate sticks
        assert_eq!(adapter.sample_rate(), Some(48_000));
    }

    #[test]
    fn test_apply_is_deterministic() {
        let mut adapter = ready_adapter();
        adapter.set_fs(44_100).unwrap();

        let input = [0.5_f32, -0.25, 0.125, 1.0];
        let mut out_a = [0.0_f32; 8];
        let mut out_b = [0.0_f32; 8];

        let n_a = adapter.apply(&input, &mut out_a).unwrap();
        let n_b = adapter.apply(&input, &mut out_b).unwrap();

        assert_eq!(n_a, n_b);
        assert_eq!(out_a[..n_a], out_b[..n_b]);
    }

    #[test]
    fn test_apply_single_sample() {
        let mut adapter = ready_adapter();
        adapter.set_fs(48_000).unwrap();

        let mut out = [0.0_f32; 4];
        let n = adapter.apply(&[0.7], &mut out).unwrap();
        assert!(n <= out.len());
    }

    #[test]
    fn test_apply_rejects_empty_input() {
        let mut adapter = ready_adapter();
        let mut out = [0.0_f32; 4];
        assert_eq!(
            adapter.apply(&[], &mut out).unwrap_err(),
            AbsorptionError::EmptyInput
        );
    }

    #[test]
    fn test_apply_rejects_oversized_input() {
        let config = AbsorptionConfig {
            max_input_len: 4,
            ..Default::default()
        };
        let mut adapter = Absorption::with_config(StubKernel::new(), config).unwrap();
        adapter.initialize().unwrap();

        let mut out = [0.0_f32; 16];
        assert_eq!(
            adapter.apply(&[0.0; 8], &mut out).unwrap_err(),
            AbsorptionError::InputTooLong { len: 8, max: 4 }
        );
    }

    #[test]
    fn test_insufficient_capacity_writes_nothing() {
        let mut adapter = ready_adapter();

        // Stub reproduces the input, so 4 samples in need 4 out
        let mut out = [9.0_f32; 2];
        let err = adapter.apply(&[1.0, 2.0, 3.0, 4.0], &mut out).unwrap_err();
        assert_eq!(
            err,
            AbsorptionError::InsufficientCapacity {
                required: 4,
                capacity: 2
            }
        );
        // Output untouched on failure
        assert_eq!(out, [9.0, 9.0]);
    }

    #[test]
    fn test_kernel_fault_propagates() {
        let mut kernel = StubKernel::new();
        kernel.inject_fault(5);
        let mut adapter = Absorption::new(kernel);
        adapter.initialize().unwrap();

        let mut out = [0.0_f32; 4];
        let err = adapter.apply(&[1.0], &mut out).unwrap_err();
        assert_eq!(err, AbsorptionError::Kernel(KernelError::Fault(5)));
        assert_eq!(err.fault_code(), 5);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = AbsorptionConfig {
            min_sample_rate: 0,
            ..Default::default()
        };
        assert!(Absorption::with_config(StubKernel::new(), config).is_err());
    }
}
