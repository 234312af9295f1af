// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::ProcurementError;
use crate::system::SystemEntropySource;
use crate::traits::EntropySource;
use crate::zeroize::fast_zeroize_slice;

/// Fills `dest` with cryptographically secure random bytes from the OS.
///
/// Returns `dest` on success, fully overwritten. An empty `dest` returns
/// immediately without any native call.
///
/// May block on Linux/Android during early boot, until the kernel pool is
/// seeded.
///
/// # Errors
///
/// On any error the contents of `dest` are unspecified and must be
/// discarded; there is no partial success.
///
/// # Example
///
/// ```
/// let mut key = [0u8; 32];
/// sysrand::fill(&mut key).expect("Failed to fill(..)");
/// ```
#[inline]
pub fn fill(dest: &mut [u8]) -> Result<&mut [u8], ProcurementError> {
    fill_from(&SystemEntropySource {}, dest)
}

/// Allocates `count` bytes and fills them with cryptographically secure
/// random bytes from the OS.
///
/// `count == 0` returns an empty vector without any native call.
///
/// # Errors
///
/// [`ProcurementError::InvalidArgument`] if `count` is negative or too large
/// to allocate, before any native call. Otherwise the same errors as [`fill`].
///
/// # Example
///
/// ```
/// let nonce = sysrand::allocate_and_fill(24).expect("Failed to allocate_and_fill(..)");
/// assert_eq!(nonce.len(), 24);
///
/// assert!(sysrand::allocate_and_fill(-1).is_err());
/// ```
#[inline]
pub fn allocate_and_fill(count: isize) -> Result<Vec<u8>, ProcurementError> {
    allocate_and_fill_from(&SystemEntropySource {}, count)
}

pub(crate) fn fill_from<'a, S>(
    source: &S,
    dest: &'a mut [u8],
) -> Result<&'a mut [u8], ProcurementError>
where
    S: EntropySource + ?Sized,
{
    if dest.is_empty() {
        return Ok(dest);
    }

    source.fill_bytes(dest)?;
    Ok(dest)
}

pub(crate) fn allocate_and_fill_from<S>(
    source: &S,
    count: isize,
) -> Result<Vec<u8>, ProcurementError>
where
    S: EntropySource + ?Sized,
{
    let invalid = || ProcurementError::InvalidArgument { requested: count };
    let len = usize::try_from(count).map_err(|_| invalid())?;

    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| {
        log::debug!("cannot allocate {len} bytes for random output");
        invalid()
    })?;
    buf.resize(len, 0);

    if let Err(error) = fill_from(source, &mut buf) {
        // Whatever was written is not handed out
        fast_zeroize_slice(&mut buf);
        return Err(error);
    }

    Ok(buf)
}
