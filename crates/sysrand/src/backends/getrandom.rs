// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! `getrandom(2)` through the raw syscall.
//!
//! Available on Linux 3.17+ and Android API 28+. Older kernels answer
//! `ENOSYS`, and seccomp sandboxes commonly answer `EPERM`.

use sysrand_once::OnceGate;

use super::unix;
use crate::error::ProcurementError;
use crate::fill_loop::{ReadOutcome, RetryPolicy, fill_completely};
use crate::zeroize::fast_zeroize_slice;

pub(crate) const SOURCE_NAME: &str = "getrandom";

const RETRY_POLICY: RetryPolicy = RetryPolicy::new(SOURCE_NAME, unix::is_interrupted);

static HAS_GETRANDOM: OnceGate = OnceGate::new();

fn getrandom_syscall(buf: &mut [u8], flags: libc::c_uint) -> ReadOutcome {
    let ret = unsafe { libc::syscall(libc::SYS_getrandom, buf.as_mut_ptr(), buf.len(), flags) };
    unix::cvt(ret as isize)
}

/// Classifies the outcome of the non-blocking probe.
///
/// Only "no kernel support" and "blocked by seccomp" mean the syscall is
/// absent. Anything else (notably `EAGAIN` on an unseeded pool) means it
/// exists and will block properly when called without `GRND_NONBLOCK`.
pub(crate) fn is_present(probe: ReadOutcome) -> bool {
    !matches!(probe, Err(libc::ENOSYS) | Err(libc::EPERM))
}

fn probe() -> bool {
    let mut buf = [0u8; 1];
    let outcome = getrandom_syscall(&mut buf, libc::GRND_NONBLOCK);
    fast_zeroize_slice(&mut buf);

    let present = is_present(outcome);
    if present {
        log::debug!("getrandom(2) is available");
    } else {
        log::warn!("getrandom(2) is unavailable ({outcome:?})");
    }
    present
}

/// Whether the syscall exists on this host. Probed once per process.
pub(crate) fn is_available() -> bool {
    let Ok(present) = HAS_GETRANDOM.get_or_try_init(|| Ok::<_, core::convert::Infallible>(probe()));
    present
}

#[cfg(test)]
pub(crate) fn probe_gate() -> &'static OnceGate {
    &HAS_GETRANDOM
}

pub(crate) fn fill(dest: &mut [u8]) -> Result<(), ProcurementError> {
    fill_completely(dest, &RETRY_POLICY, |buf| getrandom_syscall(buf, 0))
}
