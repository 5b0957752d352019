//! Stub Kernel Backend
//!
//! A deterministic stand-in for the generated library, used by tests and by
//! hosts that load the plugin without the proprietary kernel blob. `setfs`
//! records the rate, `apply` reproduces the input unchanged. Fault injection
//! lets tests exercise the propagation path end to end.

use crate::error::KernelError;
use crate::kernel::AbsorptionKernel;
use crate::op::Operation;

/// Deterministic pass-through kernel
#[derive(Debug, Default)]
pub struct StubKernel {
    sample_rate: Option<u32>,
    initialized: bool,
    /// When set, the next `run` raises this code instead of producing output
    injected_fault: Option<i32>,
}

impl StubKernel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arrange for the next `run` to raise `code`
    pub fn inject_fault(&mut self, code: i32) {
        self.injected_fault = Some(code);
    }

    /// The rate recorded by the last `setfs`, if any
    pub fn sample_rate(&self) -> Option<u32> {
        self.sample_rate
    }

    /// Whether the backend is inside its initialize/terminate window
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl AbsorptionKernel for StubKernel {
    fn initialize(&mut self) -> Result<(), KernelError> {
        self.initialized = true;
        Ok(())
    }

    fn run(
        &mut self,
        op: Operation,
        sample_rate: u32,
        input: &[f32],
    ) -> Result<Vec<f32>, KernelError> {
        if let Some(code) = self.injected_fault.take() {
            return Err(KernelError::Fault(code));
        }

        match op {
            Operation::SetFs => {
                self.sample_rate = Some(sample_rate);
                Ok(Vec::new())
            }
            Operation::Apply => Ok(input.to_vec()),
        }
    }

    fn terminate(&mut self) -> Result<(), KernelError> {
        self.initialized = false;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_window() {
        let mut kernel = StubKernel::new();
        assert!(!kernel.is_initialized());
        kernel.initialize().unwrap();
        assert!(kernel.is_initialized());
        kernel.terminate().unwrap();
        assert!(!kernel.is_initialized());
    }

    #[test]
    fn test_setfs_records_rate() {
        let mut kernel = StubKernel::new();
        kernel.initialize().unwrap();

        let out = kernel.run(Operation::SetFs, 48000, &[]).unwrap();
        assert!(out.is_empty());
        assert_eq!(kernel.sample_rate(), Some(48000));
    }

    #[test]
    fn test_apply_is_deterministic() {
        let mut kernel = StubKernel::new();
        kernel.initialize().unwrap();

        let input = [0.25_f32, -0.5, 1.0];
        let first = kernel.run(Operation::Apply, 0, &input).unwrap();
        let second = kernel.run(Operation::Apply, 0, &input).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, input.to_vec());
    }

    #[test]
    fn test_injected_fault_is_one_shot() {
        let mut kernel = StubKernel::new();
        kernel.initialize().unwrap();
        kernel.inject_fault(42);

        let err = kernel.run(Operation::Apply, 0, &[0.0]).unwrap_err();
        assert_eq!(err, KernelError::Fault(42));

        // The fault is consumed; the next call succeeds
        let out = kernel.run(Operation::Apply, 0, &[0.0]).unwrap();
        assert_eq!(out, vec![0.0]);
    }
}
