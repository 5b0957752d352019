//! Adapter Error Types and Fault-Code Mapping

use thiserror::Error;

use airabsorb_kernel::KernelError;

/// Errors that can occur in the absorption adapter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbsorptionError {
    #[error("adapter not initialized - call initialize first")]
    NotInitialized,

    #[error("adapter already initialized")]
    AlreadyInitialized,

    #[error("adapter terminated - no further calls permitted")]
    Terminated,

    #[error("sample rate {0} Hz outside configured bounds")]
    InvalidSampleRate(u32),

    #[error("input impulse response is empty")]
    EmptyInput,

    #[error("input length {len} exceeds configured maximum {max}")]
    InputTooLong { len: usize, max: usize },

    #[error("output needs {required} samples but caller provided {capacity}")]
    InsufficientCapacity { required: usize, capacity: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),
}

/// Result type alias for adapter operations
pub type AbsorptionResult<T> = Result<T, AbsorptionError>;

impl AbsorptionError {
    /// Stable C-ABI fault code for this error
    ///
    /// Adapter-detected conditions map to fixed negative codes; a fault
    /// raised by the kernel itself is propagated verbatim (the generated
    /// library's codes are positive). `0` is reserved for success and never
    /// returned here.
    pub fn fault_code(&self) -> i32 {
        match self {
            AbsorptionError::NotInitialized => -2,
            AbsorptionError::AlreadyInitialized => -3,
            AbsorptionError::Terminated => -4,
            AbsorptionError::InvalidSampleRate(_) => -5,
            AbsorptionError::EmptyInput => -6,
            AbsorptionError::InputTooLong { .. } => -7,
            AbsorptionError::InsufficientCapacity { .. } => -8,
            AbsorptionError::InvalidConfig(_) => -9,
            AbsorptionError::Kernel(KernelError::AllocationFailed) => -10,
            AbsorptionError::Kernel(KernelError::Fault(code)) => *code,
        }
    }
}
