// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::fill_loop::ReadOutcome;

/// `errno` of the calling thread.
#[inline]
pub(crate) fn last_errno() -> i32 {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

/// The transient-retry signal for libc-style calls.
pub(crate) fn is_interrupted(code: i32) -> bool {
    code == libc::EINTR
}

/// Maps a `ssize_t`-style return value to a [`ReadOutcome`].
#[inline]
pub(crate) fn cvt(ret: isize) -> ReadOutcome {
    match usize::try_from(ret) {
        Ok(written) => Ok(written),
        Err(_) => Err(last_errno()),
    }
}
