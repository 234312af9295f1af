// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! `/dev/urandom` fallback for kernels without `getrandom(2)`.
//!
//! `/dev/urandom` never blocks, even before the kernel pool is seeded. To
//! avoid handing out bytes from an unseeded pool, the first caller polls
//! `/dev/random` for readability, which only happens once the pool has been
//! initialized. That wait is done once per process.

use core::ffi::CStr;

use sysrand_once::OnceGate;

use super::unix;
use crate::error::ProcurementError;
use crate::fill_loop::{ReadOutcome, RetryPolicy, fill_completely};
use crate::select::ReadinessState;

pub(crate) const SOURCE_NAME: &str = "/dev/urandom";

const RANDOM_PATH: &CStr = c"/dev/random";
const URANDOM_PATH: &CStr = c"/dev/urandom";

const RETRY_POLICY: RetryPolicy = RetryPolicy::new(SOURCE_NAME, unix::is_interrupted);

static URANDOM_SEEDED: OnceGate = OnceGate::new();

/// Read-only descriptor, closed on drop.
struct FileDescriptor(libc::c_int);

impl FileDescriptor {
    fn open(path: &CStr, source_name: &'static str) -> Result<Self, ProcurementError> {
        loop {
            let fd = unsafe { libc::open(path.as_ptr(), libc::O_RDONLY | libc::O_CLOEXEC) };
            if fd >= 0 {
                return Ok(Self(fd));
            }

            match unix::last_errno() {
                libc::EINTR => continue,
                errno => return Err(ProcurementError::from_errno(source_name, errno)),
            }
        }
    }

    fn read(&self, buf: &mut [u8]) -> ReadOutcome {
        let ret = unsafe { libc::read(self.0, buf.as_mut_ptr().cast(), buf.len()) };
        unix::cvt(ret)
    }

    /// Blocks until the descriptor is readable.
    fn wait_readable(&self, source_name: &'static str) -> Result<(), ProcurementError> {
        let mut pfd = libc::pollfd {
            fd: self.0,
            events: libc::POLLIN,
            revents: 0,
        };

        loop {
            // Infinite timeout
            if unsafe { libc::poll(&mut pfd, 1, -1) } >= 0 {
                return Ok(());
            }

            match unix::last_errno() {
                libc::EINTR | libc::EAGAIN => continue,
                errno => return Err(ProcurementError::from_errno(source_name, errno)),
            }
        }
    }
}

impl Drop for FileDescriptor {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.0);
        }
    }
}

fn wait_for_seeded_pool() -> Result<(), ProcurementError> {
    let random = FileDescriptor::open(RANDOM_PATH, "/dev/random")?;
    random.wait_readable("/dev/random")?;

    log::debug!("/dev/random reports a seeded entropy pool");
    Ok(())
}

/// Blocks until the kernel pool is seeded. Resolved once per process; a
/// failure is returned to the caller and the next caller retries.
pub(crate) fn ensure_seeded() -> Result<(), ProcurementError> {
    URANDOM_SEEDED.call_once(wait_for_seeded_pool)
}

pub(crate) fn readiness() -> ReadinessState {
    URANDOM_SEEDED.state().into()
}

#[cfg(test)]
pub(crate) fn readiness_gate() -> &'static OnceGate {
    &URANDOM_SEEDED
}

/// Reads `dest` from `/dev/urandom`. Callers pass [`ensure_seeded`] first.
pub(crate) fn fill(dest: &mut [u8]) -> Result<(), ProcurementError> {
    let urandom = FileDescriptor::open(URANDOM_PATH, SOURCE_NAME)?;
    fill_completely(dest, &RETRY_POLICY, |buf| urandom.read(buf))
}
