// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Completion-fill loop.
//!
//! Drives a single-shot "read up to `n` bytes" primitive until the whole
//! destination is written. Native mechanisms like `getrandom(2)` or `read(2)`
//! on `/dev/urandom` may return fewer bytes than requested, or be interrupted
//! by a signal before returning anything.

use crate::error::ProcurementError;

/// Result of one primitive invocation: bytes written, or a native error code.
pub type ReadOutcome = Result<usize, i32>;

/// Per-binding rules for [`fill_completely`].
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    source_name: &'static str,
    is_transient: fn(i32) -> bool,
}

impl RetryPolicy {
    /// Creates a policy for `source_name`.
    ///
    /// `is_transient` recognizes the platform's "retry me" code (e.g. `EINTR`).
    pub const fn new(source_name: &'static str, is_transient: fn(i32) -> bool) -> Self {
        Self {
            source_name,
            is_transient,
        }
    }

    /// Name reported in errors.
    pub fn source_name(&self) -> &'static str {
        self.source_name
    }

    /// Whether `code` should be retried without advancing.
    #[inline]
    pub fn is_transient(&self, code: i32) -> bool {
        (self.is_transient)(code)
    }
}

/// Calls `primitive` with the unfilled suffix of `dest` until every byte is
/// written.
///
/// - `Ok(n)` advances the cursor by `n`. `Ok(0)` is legal and just loops.
/// - `Err(code)` with a transient `code` retries without advancing.
/// - Any other `Err(code)` stops with [`ProcurementError::SourceFailure`].
///
/// An empty `dest` returns immediately without calling `primitive`.
///
/// # Errors
///
/// [`ProcurementError::SourceFailure`] on a non-transient native error, or if
/// the primitive claims to have written more bytes than it was given.
pub fn fill_completely<P>(
    dest: &mut [u8],
    policy: &RetryPolicy,
    mut primitive: P,
) -> Result<(), ProcurementError>
where
    P: FnMut(&mut [u8]) -> ReadOutcome,
{
    let mut pos = 0;

    while pos < dest.len() {
        let remaining = &mut dest[pos..];

        match primitive(&mut *remaining) {
            Ok(written) if written <= remaining.len() => pos += written,
            Ok(written) => {
                return Err(ProcurementError::failure(
                    policy.source_name,
                    None,
                    format_args!(
                        "reported {written} bytes for a {} byte request",
                        remaining.len()
                    ),
                ));
            }
            Err(code) if policy.is_transient(code) => continue,
            Err(code) => return Err(ProcurementError::from_errno(policy.source_name, code)),
        }
    }

    Ok(())
}
