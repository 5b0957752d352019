//! Generated Library FFI Binding
//!
//! Raw binding to the code-generated `airAbsorptionProxy` bundle and its
//! `emxArray` allocator API, plus a safe [`AbsorptionKernel`] backend over
//! it. The bundle must be on the link path when the `generated` feature is
//! enabled; hosts without it use [`crate::StubKernel`].
//!
//! The bundle's C surface reports faults as nonzero `int` returns; that code
//! is surfaced verbatim as [`KernelError::Fault`].
//!
//! # Safety
//!
//! Every array handed to the entry point is created immediately before the
//! call and destroyed when its [`EmxArray`] guard drops, so no kernel-owned
//! buffer outlives a single `run`.

#![allow(non_snake_case)]

use std::ffi::{c_char, c_int, c_uint};
use std::ptr;

use crate::error::KernelError;
use crate::kernel::AbsorptionKernel;
use crate::op::Operation;

/// Mirror of the generated `emxArray_real32_T`
#[repr(C)]
pub struct EmxArrayReal32 {
    pub data: *mut f32,
    pub size: *mut i32,
    pub allocated_size: i32,
    pub num_dimensions: i32,
    /// `boolean_T` in the generated headers
    pub can_free_data: u8,
}

#[link(name = "airAbsorptionProxy")]
extern "C" {
    fn airAbsorptionProxy_initialize() -> c_int;

    fn airAbsorptionProxy_terminate() -> c_int;

    fn airAbsorptionProxy(
        op_type_data: *const c_char,
        op_type_size: *const i32,
        fs: c_uint,
        ir_in: *mut EmxArrayReal32,
        ir_out: *mut EmxArrayReal32,
    ) -> c_int;

    fn emxCreateND_real32_T(num_dimensions: c_int, size: *const c_int) -> *mut EmxArrayReal32;

    fn emxInitArray_real32_T(array: *mut *mut EmxArrayReal32, num_dimensions: c_int);

    fn emxDestroyArray_real32_T(array: *mut EmxArrayReal32);
}

/// Owning guard over a kernel-allocated sample array
///
/// Scoped strictly to one kernel invocation: created right before the call,
/// destroyed on drop.
struct EmxArray(*mut EmxArrayReal32);

impl EmxArray {
    /// Create a one-dimensional array holding a copy of `samples`
    fn from_samples(samples: &[f32]) -> Result<Self, KernelError> {
        let size = [samples.len() as c_int];
        let raw = unsafe { emxCreateND_real32_T(1, size.as_ptr()) };
        if raw.is_null() {
            return Err(KernelError::AllocationFailed);
        }
        unsafe {
            ptr::copy_nonoverlapping(samples.as_ptr(), (*raw).data, samples.len());
        }
        Ok(Self(raw))
    }

    /// Create the one-element zero placeholder the entry point requires when
    /// no real input is relevant (it rejects null arrays regardless)
    fn sentinel() -> Result<Self, KernelError> {
        Self::from_samples(&[0.0])
    }

    /// Create an uninitialized array for the entry point to fill
    fn for_output() -> Result<Self, KernelError> {
        let mut raw: *mut EmxArrayReal32 = ptr::null_mut();
        unsafe { emxInitArray_real32_T(&mut raw, 1) };
        if raw.is_null() {
            return Err(KernelError::AllocationFailed);
        }
        Ok(Self(raw))
    }

    fn as_mut_ptr(&self) -> *mut EmxArrayReal32 {
        self.0
    }

    /// Copy the kernel-produced samples out before the guard drops
    fn to_vec(&self) -> Vec<f32> {
        unsafe {
            let len = *(*self.0).size as usize;
            std::slice::from_raw_parts((*self.0).data, len).to_vec()
        }
    }
}

impl Drop for EmxArray {
    fn drop(&mut self) {
        unsafe { emxDestroyArray_real32_T(self.0) };
    }
}

/// Backend invoking the real generated library
#[derive(Debug, Default)]
pub struct GeneratedKernel;

impl GeneratedKernel {
    pub fn new() -> Self {
        Self
    }
}

impl AbsorptionKernel for GeneratedKernel {
    fn initialize(&mut self) -> Result<(), KernelError> {
        let ret = unsafe { airAbsorptionProxy_initialize() };
        if ret != 0 {
            return Err(KernelError::Fault(ret));
        }
        Ok(())
    }

    fn run(
        &mut self,
        op: Operation,
        sample_rate: u32,
        input: &[f32],
    ) -> Result<Vec<f32>, KernelError> {
        let (tag_data, tag_size) = op.encode();

        let ir_in = if input.is_empty() {
            EmxArray::sentinel()?
        } else {
            EmxArray::from_samples(input)?
        };
        let ir_out = EmxArray::for_output()?;

        let ret = unsafe {
            airAbsorptionProxy(
                tag_data.as_ptr() as *const c_char,
                tag_size.as_ptr(),
                sample_rate as c_uint,
                ir_in.as_mut_ptr(),
                ir_out.as_mut_ptr(),
            )
        };
        if ret != 0 {
            return Err(KernelError::Fault(ret));
        }

        Ok(ir_out.to_vec())
    }

    fn terminate(&mut self) -> Result<(), KernelError> {
        let ret = unsafe { airAbsorptionProxy_terminate() };
        if ret != 0 {
            return Err(KernelError::Fault(ret));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "generated"
    }
}
