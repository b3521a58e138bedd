//! C ABI types: opaque handles and status codes for FFI consumers.

pub use crate::error::ErrorKind as GbmStatus;

/// Opaque handle to a constructed loss. Each zone has its own free function;
/// a handle must be released by the zone that created it.
pub type GbmLoss = *mut std::ffi::c_void;
