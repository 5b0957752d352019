//! Airabsorb ABI - C Surface for Game-Engine Hosts
//!
//! This crate builds the `cdylib` a game engine loads as a native audio
//! plugin. It exposes the four absorption entry points over a single
//! process-global adapter instance:
//!
//! - `AirAbsorption_Initialize` / `AirAbsorption_Terminate`
//! - `AirAbsorption_SetFs`
//! - `AirAbsorption_Apply`
//!
//! All functions return a fault code: `0` is success, negative codes are
//! adapter-detected conditions (see `AbsorptionError::fault_code`), positive
//! codes come from the kernel itself. On any nonzero return no output was
//! produced and `out_count` must not be trusted.
//!
//! The kernel is not reentrant-safe, so the global instance sits behind a
//! mutex and calls from host threads serialize here.
//!
//! Backend selection: with the `generated` feature this links the real
//! generated kernel bundle; the default build substitutes the deterministic
//! stub so the plugin loads without the proprietary blob.

// Export names are fixed by the host's plugin contract
#![allow(non_snake_case)]

use std::env;
use std::path::Path;
use std::slice;

use parking_lot::Mutex;
use tracing::{error, info};

use airabsorb_core::{Absorption, AbsorptionConfig, AbsorptionError};

#[cfg(feature = "generated")]
type DefaultKernel = airabsorb_core::GeneratedKernel;
#[cfg(not(feature = "generated"))]
type DefaultKernel = airabsorb_core::StubKernel;

/// Success return value
pub const FAULT_OK: i32 = 0;

/// Null pointer or negative count handed in by the host
pub const FAULT_INVALID_ARGUMENT: i32 = -1;

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV_VAR: &str = "AIRABSORB_CONFIG";

/// The process-global adapter instance, created by `AirAbsorption_Initialize`
static INSTANCE: Mutex<Option<Absorption<DefaultKernel>>> = Mutex::new(None);

/// Install the tracing subscriber once; later calls are no-ops
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn load_config() -> AbsorptionConfig {
    match env::var_os(CONFIG_ENV_VAR) {
        Some(path) => AbsorptionConfig::load(Path::new(&path)),
        None => AbsorptionConfig::default(),
    }
}

/// Create and initialize the global adapter
///
/// Must be called before any other entry point. A second call without an
/// intervening `AirAbsorption_Terminate` fails; after a terminate, a fresh
/// instance is built.
#[no_mangle]
pub extern "C" fn AirAbsorption_Initialize() -> i32 {
    init_tracing();

    let mut guard = INSTANCE.lock();
    if guard.is_some() {
        return AbsorptionError::AlreadyInitialized.fault_code();
    }

    let mut adapter = match Absorption::with_config(DefaultKernel::new(), load_config()) {
        Ok(adapter) => adapter,
        Err(e) => {
            error!("Failed to construct adapter: {}", e);
            return e.fault_code();
        }
    };

    match adapter.initialize() {
        Ok(()) => {
            *guard = Some(adapter);
            FAULT_OK
        }
        Err(e) => {
            error!("Kernel initialization failed: {}", e);
            e.fault_code()
        }
    }
}

/// Configure the kernel's operating sample rate
#[no_mangle]
pub extern "C" fn AirAbsorption_SetFs(fs: u32) -> i32 {
    let mut guard = INSTANCE.lock();
    let adapter = match guard.as_mut() {
        Some(adapter) => adapter,
        None => return AbsorptionError::NotInitialized.fault_code(),
    };

    match adapter.set_fs(fs) {
        Ok(()) => FAULT_OK,
        Err(e) => e.fault_code(),
    }
}

/// Transform an impulse response
///
/// Reads `in_count` samples from `ir_in`, writes up to `out_capacity`
/// samples to `ir_out`, and stores the produced length in `out_count`. The
/// kernel chooses the output length; if it exceeds `out_capacity` the call
/// fails without writing. Null pointers and negative counts fail with
/// [`FAULT_INVALID_ARGUMENT`] before the adapter is touched.
#[no_mangle]
pub extern "C" fn AirAbsorption_Apply(
    ir_in: *const f32,
    in_count: i32,
    ir_out: *mut f32,
    out_capacity: i32,
    out_count: *mut i32,
) -> i32 {
    if ir_in.is_null() || ir_out.is_null() || out_count.is_null() {
        return FAULT_INVALID_ARGUMENT;
    }
    if in_count < 0 || out_capacity < 0 {
        return FAULT_INVALID_ARGUMENT;
    }

    let input = unsafe { slice::from_raw_parts(ir_in, in_count as usize) };
    let output = unsafe { slice::from_raw_parts_mut(ir_out, out_capacity as usize) };

    let mut guard = INSTANCE.lock();
    let adapter = match guard.as_mut() {
        Some(adapter) => adapter,
        None => return AbsorptionError::NotInitialized.fault_code(),
    };

    match adapter.apply(input, output) {
        Ok(produced) => {
            unsafe { *out_count = produced as i32 };
            FAULT_OK
        }
        Err(e) => e.fault_code(),
    }
}

/// Tear down and drop the global adapter
///
/// The instance is dropped whether or not the kernel's teardown reports a
/// fault, so the next `AirAbsorption_Initialize` always starts fresh.
#[no_mangle]
pub extern "C" fn AirAbsorption_Terminate() -> i32 {
    let mut guard = INSTANCE.lock();
    match guard.take() {
        Some(mut adapter) => match adapter.terminate() {
            Ok(()) => {
                info!("Plugin terminated");
                FAULT_OK
            }
            Err(e) => {
                error!("Kernel teardown failed: {}", e);
                e.fault_code()
            }
        },
        None => AbsorptionError::NotInitialized.fault_code(),
    }
}
