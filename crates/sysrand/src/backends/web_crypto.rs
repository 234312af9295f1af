// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Host crypto object on `wasm32-unknown-unknown` (`crypto.getRandomValues`
//! in browsers, `crypto.randomFillSync` in Node), reached through `getrandom`.
//!
//! Browsers reject requests above 65536 bytes, so requests are served in
//! chunks through a scratch buffer that is zeroed after every chunk.

use crate::chunked::fill_via_staging;
use crate::error::ProcurementError;

pub(crate) const SOURCE_NAME: &str = "crypto.getRandomValues";

/// Bytes requested from the host per call.
pub(crate) const WEB_CRYPTO_CHUNK: usize = 8 * 1024;

pub(crate) fn fill(dest: &mut [u8]) -> Result<(), ProcurementError> {
    let mut staging = [0u8; WEB_CRYPTO_CHUNK];

    fill_via_staging(dest, &mut staging, |scratch| {
        getrandom::fill(scratch)
            .map_err(|e| ProcurementError::failure(SOURCE_NAME, e.raw_os_error(), e))
    })
}
