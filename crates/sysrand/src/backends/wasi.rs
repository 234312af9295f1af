// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! WASI preview 1 `random_get`.

use crate::error::ProcurementError;

pub(crate) const SOURCE_NAME: &str = "random_get";

#[link(wasm_import_module = "wasi_snapshot_preview1")]
unsafe extern "C" {
    fn random_get(buf: i32, buf_len: i32) -> i32;
}

pub(crate) fn fill(dest: &mut [u8]) -> Result<(), ProcurementError> {
    // Pointers and lengths are 32-bit on wasm32
    let errno = unsafe { random_get(dest.as_mut_ptr() as i32, dest.len() as i32) };

    if errno != 0 {
        return Err(ProcurementError::from_status(SOURCE_NAME, errno));
    }

    Ok(())
}
