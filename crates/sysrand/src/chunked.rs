// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Fills for native calls that cap how many bytes one invocation may produce.
//!
//! Such calls either fill their whole argument or fail, so no completion
//! loop is needed, but requests larger than the cap are split.

use core::num::NonZeroUsize;

use crate::error::ProcurementError;
use crate::zeroize::fast_zeroize_slice;

/// Calls `native` on successive chunks of `dest`, each at most `cap` bytes.
///
/// # Errors
///
/// Stops at, and returns, the first error reported by `native`.
pub fn fill_in_chunks<N>(
    dest: &mut [u8],
    cap: NonZeroUsize,
    mut native: N,
) -> Result<(), ProcurementError>
where
    N: FnMut(&mut [u8]) -> Result<(), ProcurementError>,
{
    for chunk in dest.chunks_mut(cap.get()) {
        native(chunk)?;
    }

    Ok(())
}

/// Fills `dest` through a scratch buffer, one `N`-byte chunk at a time.
///
/// `native` writes into `staging`; the bytes are copied into `dest` and the
/// used part of `staging` is zeroed before the next chunk, so random bytes
/// never linger in the scratch buffer. The scratch is zeroed on failure too.
///
/// # Errors
///
/// Stops at, and returns, the first error reported by `native`.
pub fn fill_via_staging<const N: usize, F>(
    dest: &mut [u8],
    staging: &mut [u8; N],
    mut native: F,
) -> Result<(), ProcurementError>
where
    F: FnMut(&mut [u8]) -> Result<(), ProcurementError>,
{
    const { assert!(N > 0, "staging buffer must not be empty") };

    for chunk in dest.chunks_mut(N) {
        let scratch = &mut staging[..chunk.len()];
        let result = native(&mut *scratch);

        if result.is_ok() {
            chunk.copy_from_slice(scratch);
        }
        fast_zeroize_slice(scratch);

        result?;
    }

    Ok(())
}
