// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! `SecRandomCopyBytes` from Security.framework.

use core::ffi::c_void;

use crate::error::ProcurementError;

pub(crate) const SOURCE_NAME: &str = "SecRandomCopyBytes";

#[link(name = "Security", kind = "framework")]
unsafe extern "C" {
    fn SecRandomCopyBytes(rnd: *const c_void, count: usize, bytes: *mut u8) -> i32;
}

pub(crate) fn fill(dest: &mut [u8]) -> Result<(), ProcurementError> {
    // kSecRandomDefault is NULL
    let status = unsafe { SecRandomCopyBytes(core::ptr::null(), dest.len(), dest.as_mut_ptr()) };

    if status != 0 {
        return Err(ProcurementError::from_status(SOURCE_NAME, status));
    }

    Ok(())
}
