//! C ABI wrapper for the per-zone loss factories.
//!
//! The `#[no_mangle] extern "C"` symbols themselves are generated by
//! `expand_zone!`; this module holds the shared bodies. All functions return
//! `GbmStatus` codes as `i32` and use opaque handles.

pub mod types;

pub use types::{GbmLoss, GbmStatus};

use std::ffi::{c_char, c_void};

use crate::loss::LossHandle;
use crate::registration::LossCatalog;
use crate::traits::PackedValue;

/// Shared body of `gbm_create_loss_<zone>`.
///
/// # Safety
/// `[name, name_end)` must be readable, or the two pointers equal. `out` must
/// be writable when non-null.
pub(crate) unsafe fn create_loss_raw<P: PackedValue>(
    catalog: &LossCatalog<P>,
    output_count: usize,
    name: *const c_char,
    name_end: *const c_char,
    out: *mut *mut c_void,
) -> i32 {
    if out.is_null() {
        return GbmStatus::IllegalParamValue as i32;
    }

    let bytes: &[u8] = if name == name_end {
        &[]
    } else {
        if name.is_null() || name_end.is_null() || name_end < name {
            return GbmStatus::IllegalParamValue as i32;
        }
        let len = name_end.offset_from(name) as usize;
        std::slice::from_raw_parts(name as *const u8, len)
    };

    match catalog.create(output_count, bytes) {
        Ok(handle) => {
            *out = Box::into_raw(Box::new(handle)) as *mut c_void;
            GbmStatus::None as i32
        }
        Err(e) => GbmStatus::from(&e) as i32,
    }
}

/// Shared body of `gbm_free_loss_<zone>`.
///
/// # Safety
/// `handle` must come from `create_loss_raw::<P>`, or be null.
pub(crate) unsafe fn free_loss_raw<P: PackedValue>(handle: *mut c_void) {
    if !handle.is_null() {
        drop(Box::from_raw(handle as *mut LossHandle<P>));
    }
}

/// Borrow the loss behind a handle.
///
/// # Safety
/// `handle` must be a live, non-null handle created for packed type `P`.
pub unsafe fn handle_ref<'a, P: PackedValue>(handle: GbmLoss) -> &'a LossHandle<P> {
    &*(handle as *const LossHandle<P>)
}
