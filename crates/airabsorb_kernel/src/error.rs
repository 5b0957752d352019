//! Kernel Error Types

use thiserror::Error;

/// Errors surfaced by a kernel backend
///
/// The generated library signals abnormal outcomes as a raised integer; that
/// code is carried verbatim in [`KernelError::Fault`] so the adapter layer
/// can propagate it to the host unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    #[error("kernel raised fault code {0}")]
    Fault(i32),

    #[error("kernel failed to allocate a sample array")]
    AllocationFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KernelError::Fault(17);
        assert!(err.to_string().contains("17"));

        let err = KernelError::AllocationFailed;
        assert!(err.to_string().contains("allocate"));
    }
}
