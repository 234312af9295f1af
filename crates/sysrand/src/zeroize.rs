// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// Bulk zeroization that the optimizer cannot elide.
///
/// `write_bytes` (memset) followed by a volatile read of the first byte.
#[inline(always)]
pub(crate) fn fast_zeroize_slice(slice: &mut [u8]) {
    if slice.is_empty() {
        return;
    }

    unsafe {
        core::ptr::write_bytes(slice.as_mut_ptr(), 0, slice.len());
        // Volatile read prevents the optimizer from removing the write_bytes
        core::ptr::read_volatile(slice.as_ptr());
    }
}
