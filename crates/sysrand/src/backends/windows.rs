// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! `BCryptGenRandom` with the system preferred RNG.

use core::num::NonZeroUsize;

use windows_sys::Win32::Security::Cryptography::{
    BCRYPT_USE_SYSTEM_PREFERRED_RNG, BCryptGenRandom,
};

use crate::chunked::fill_in_chunks;
use crate::error::ProcurementError;

pub(crate) const SOURCE_NAME: &str = "BCryptGenRandom";

/// `cbBuffer` is a `ULONG`.
pub(crate) const BCRYPT_CHUNK: NonZeroUsize = match NonZeroUsize::new(u32::MAX as usize) {
    Some(cap) => cap,
    None => panic!("chunk cap must be non-zero"),
};

pub(crate) fn fill(dest: &mut [u8]) -> Result<(), ProcurementError> {
    fill_in_chunks(dest, BCRYPT_CHUNK, |chunk| {
        // Bounded by BCRYPT_CHUNK
        let len = chunk.len() as u32;
        let status = unsafe {
            BCryptGenRandom(
                core::ptr::null_mut(),
                chunk.as_mut_ptr(),
                len,
                BCRYPT_USE_SYSTEM_PREFERRED_RNG,
            )
        };

        // NT_SUCCESS
        if status >= 0 {
            Ok(())
        } else {
            Err(ProcurementError::from_status(SOURCE_NAME, status))
        }
    })
}
