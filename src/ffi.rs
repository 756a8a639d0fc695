//! C-compatible Foreign Function Interface (FFI) for carbon-route
//!
//! This module provides C-compatible bindings that allow the route optimizer
//! to be used from C, C++, Python (via ctypes), and other languages that
//! support calling C libraries.
//!
//! # Memory Management
//!
//! - All string parameters should be null-terminated UTF-8 C strings (char*)
//! - Returned JSON strings are allocated by Rust and must be freed with
//!   `carbon_route_free_string()`
//!
//! # Error Handling
//!
//! All functions return a CarbonRouteResult code:
//! - 0: Success
//! - 1: Invalid parameter
//! - 2: Network error
//! - 3: I/O error
//! - 4: Unknown error

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use once_cell::sync::Lazy;
use tokio::runtime::Runtime;

use crate::{LocationQuery, RouteOptimizer, RouterConfig};

/// Global async runtime for C FFI calls
static RUNTIME: Lazy<Option<Runtime>> = Lazy::new(|| Runtime::new().ok());

/// Result codes for C FFI
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarbonRouteResult {
    Success = 0,
    InvalidParameter = 1,
    NetworkError = 2,
    IoError = 3,
    UnknownError = 4,
}

/// Map a library error to its C result code
fn result_code(err: &crate::Error) -> CarbonRouteResult {
    match err {
        crate::Error::InvalidInput(_) | crate::Error::ConfigError(_) => CarbonRouteResult::InvalidParameter,
        crate::Error::NetworkError(_) | crate::Error::HttpError(_) | crate::Error::NoRoute(_) => {
            CarbonRouteResult::NetworkError
        }
        crate::Error::IoError(_) => CarbonRouteResult::IoError,
    }
}

/// Read a `district[,state]` argument
fn location_arg(ptr: *const c_char) -> Option<LocationQuery> {
    if ptr.is_null() {
        return None;
    }
    let s = unsafe { CStr::from_ptr(ptr) }.to_str().ok()?;
    Some(LocationQuery::parse(s))
}

/// Optimize a route and return it as JSON
///
/// # Parameters
/// - `source`: Pickup location, `district[,state]` (null-terminated string)
/// - `destination`: Delivery location, `district[,state]` (null-terminated string)
/// - `quantity`: Load quantity
/// - `offline`: Non-zero to use geometric estimates only
/// - `out_json`: Receives the route and metrics as JSON on success; free it
///   with `carbon_route_free_string()`
///
/// # Returns
/// CarbonRouteResult code
#[no_mangle]
pub extern "C" fn carbon_route_optimize(
    source: *const c_char,
    destination: *const c_char,
    quantity: f64,
    offline: i32,
    out_json: *mut *mut c_char,
) -> CarbonRouteResult {
    if out_json.is_null() {
        return CarbonRouteResult::InvalidParameter;
    }
    unsafe { *out_json = ptr::null_mut() };

    let (Some(source), Some(destination)) = (location_arg(source), location_arg(destination)) else {
        return CarbonRouteResult::InvalidParameter;
    };

    let config = RouterConfig {
        offline: offline != 0,
        ..Default::default()
    };
    let optimizer = match RouteOptimizer::with_config(config) {
        Ok(optimizer) => optimizer,
        Err(e) => return result_code(&e),
    };

    let outcome = if offline != 0 {
        optimizer.optimize_offline_detailed(&source, &destination, quantity)
    } else {
        let Some(runtime) = RUNTIME.as_ref() else {
            return CarbonRouteResult::UnknownError;
        };
        runtime.block_on(optimizer.optimize_detailed(&source, &destination, quantity, None))
    };

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => return result_code(&e),
    };

    let json = match serde_json::to_string(&outcome) {
        Ok(json) => json,
        Err(_) => return CarbonRouteResult::UnknownError,
    };

    match CString::new(json) {
        Ok(c_string) => {
            unsafe { *out_json = c_string.into_raw() };
            CarbonRouteResult::Success
        }
        Err(_) => CarbonRouteResult::UnknownError,
    }
}

/// Free a string allocated by the library
///
/// # Parameters
/// - `ptr`: String pointer returned by library functions
#[no_mangle]
pub extern "C" fn carbon_route_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            drop(CString::from_raw(ptr));
        }
    }
}

/// Get library version string
///
/// # Returns
/// Static string with version information (does not need to be freed)
#[no_mangle]
pub extern "C" fn carbon_route_version() -> *const c_char {
    static VERSION_STRING: Lazy<CString> = Lazy::new(|| {
        CString::new(format!("carbon-route {}", crate::VERSION)).unwrap_or_default()
    });

    VERSION_STRING.as_ptr()
}

/// Initialize the library (optional, called automatically)
///
/// Creates the async runtime used for live routing.
///
/// # Returns
/// CarbonRouteResult::Success on success
#[no_mangle]
pub extern "C" fn carbon_route_init() -> CarbonRouteResult {
    match Lazy::force(&RUNTIME) {
        Some(_) => CarbonRouteResult::Success,
        None => CarbonRouteResult::UnknownError,
    }
}
