// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Linux/Android sources, exercised directly so both paths run on any host.

use core::convert::Infallible;
use std::sync::{Arc, Barrier};
use std::thread;

use serial_test::serial;
use sysrand_once::GateState;

use crate::backends::getrandom;
#[cfg(not(feature = "dev_urandom_fallback"))]
use crate::error::ProcurementError;
use crate::select::{SourceChoice, source};

#[test]
fn test_probe_classification() {
    // Categorically absent
    assert!(!getrandom::is_present(Err(libc::ENOSYS)));
    assert!(!getrandom::is_present(Err(libc::EPERM)));

    // Present, maybe busy or unseeded
    assert!(getrandom::is_present(Ok(1)));
    assert!(getrandom::is_present(Ok(0)));
    assert!(getrandom::is_present(Err(libc::EAGAIN)));
    assert!(getrandom::is_present(Err(libc::EINTR)));
    assert!(getrandom::is_present(Err(libc::EFAULT)));
}

#[test]
#[serial(probe)]
fn test_probe_selects_syscall_after_reset() {
    getrandom::probe_gate().reset_for_test();

    // Every supported kernel today has getrandom(2)
    assert_eq!(source(), Ok(SourceChoice::GetRandom));
    assert_eq!(getrandom::probe_gate().state(), GateState::Done(true));
    assert_eq!(source(), Ok(SourceChoice::GetRandom));
}

#[test]
fn test_getrandom_fill_large_buffer() {
    let mut buf = vec![0u8; 1 << 20];

    getrandom::fill(&mut buf).expect("Failed to fill(..)");

    let zeros = buf.iter().filter(|b| **b == 0).count();
    assert!(zeros < buf.len() / 100, "zeros={zeros}");
}

#[cfg(feature = "dev_urandom_fallback")]
mod urandom {
    use super::*;

    use crate::backends::urandom;
    use crate::select::{ReadinessState, readiness};

    const CALLERS: usize = 100;

    #[test]
    #[serial(urandom)]
    fn test_urandom_fill_waits_for_seeded_pool() {
        urandom::readiness_gate().reset_for_test();
        assert_eq!(readiness(), Some(ReadinessState::Unknown));

        let mut buf = [0u8; 4096];
        SourceChoice::DevUrandom
            .fill(&mut buf)
            .expect("Failed to fill(..)");

        assert_eq!(readiness(), Some(ReadinessState::Seeded));
        assert!(buf.iter().filter(|b| **b == 0).count() < 64);
    }

    #[test]
    #[serial(urandom)]
    fn test_urandom_concurrent_callers_share_readiness() {
        urandom::readiness_gate().reset_for_test();
        let barrier = Arc::new(Barrier::new(CALLERS));

        let handles: Vec<_> = (0..CALLERS)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let mut buf = [0u8; 256];
                    SourceChoice::DevUrandom.fill(&mut buf)
                })
            })
            .collect();

        for handle in handles {
            handle
                .join()
                .expect("Failed to join(..)")
                .expect("Failed to fill(..)");
        }

        assert_eq!(readiness(), Some(ReadinessState::Seeded));
    }

    #[test]
    #[serial(urandom)]
    fn test_urandom_read_after_seeded_pool() {
        urandom::ensure_seeded().expect("Failed to ensure_seeded()");
        let mut buf = [0u8; 300];

        urandom::fill(&mut buf).expect("Failed to fill(..)");

        assert!(buf.iter().any(|b| *b != 0));
    }

    #[test]
    #[serial(probe, urandom)]
    fn test_negative_probe_selects_urandom() {
        let gate = getrandom::probe_gate();
        gate.reset_for_test();
        urandom::readiness_gate().reset_for_test();

        let Ok(present) = gate.get_or_try_init(|| Ok::<_, Infallible>(false));
        assert!(!present);

        let selected = source();
        let mut buf = [0u8; 64];
        let filled = crate::fill(&mut buf).map(|bytes| bytes.len());

        // Let the next caller probe the real kernel
        gate.reset_for_test();

        assert_eq!(selected, Ok(SourceChoice::DevUrandom));
        assert_eq!(filled, Ok(64));
        assert_eq!(readiness(), Some(ReadinessState::Seeded));
    }
}

#[cfg(not(feature = "dev_urandom_fallback"))]
#[test]
#[serial(probe)]
fn test_negative_probe_without_fallback_is_unavailable() {
    let gate = getrandom::probe_gate();
    gate.reset_for_test();

    let Ok(present) = gate.get_or_try_init(|| Ok::<_, Infallible>(false));
    assert!(!present);

    let selected = source();
    let mut buf = [0u8; 16];
    let filled = crate::fill(&mut buf).map(|bytes| bytes.len());

    gate.reset_for_test();

    let unavailable = ProcurementError::SourceUnavailable {
        source_name: getrandom::SOURCE_NAME,
    };
    assert_eq!(selected, Err(unavailable.clone()));
    assert_eq!(filled, Err(unavailable));
}
