// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::ProcurementError;

/// Something that can fill buffers with cryptographically secure random bytes.
///
/// Implementations must either write every byte of `dest` or return an
/// error. Callers treat `dest` as garbage on error.
pub trait EntropySource {
    /// Fills the destination buffer with cryptographically secure random bytes.
    ///
    /// An empty `dest` must succeed without touching the native mechanism.
    ///
    /// # Errors
    ///
    /// Returns [`ProcurementError::SourceUnavailable`] if no mechanism is usable
    /// on this host, or [`ProcurementError::SourceFailure`] if the native call
    /// failed mid-fill.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), ProcurementError>;
}
