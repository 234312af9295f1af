// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use sysrand_once::{GateState, OnceGate};

use crate::error::ProcurementError;
use crate::select::{ReadinessState, SourceChoice, source};

#[test]
fn test_source_is_stable_across_calls() {
    let first = source().expect("Failed to source() (#0)");
    let second = source().expect("Failed to source() (#1)");

    assert_eq!(first, second);
}

#[test]
fn test_only_device_fallback_requires_readiness_gate() {
    assert!(SourceChoice::DevUrandom.requires_readiness_gate());
    assert!(!SourceChoice::GetRandom.requires_readiness_gate());
    assert!(!SourceChoice::SecRandomCopyBytes.requires_readiness_gate());
    assert!(!SourceChoice::BCryptGenRandom.requires_readiness_gate());
    assert!(!SourceChoice::WasiRandomGet.requires_readiness_gate());
    assert!(!SourceChoice::WebCrypto.requires_readiness_gate());
}

#[test]
fn test_foreign_source_is_unavailable() {
    // Never the mechanism of the host running the tests
    let foreign = if cfg!(windows) {
        SourceChoice::SecRandomCopyBytes
    } else {
        SourceChoice::BCryptGenRandom
    };
    let mut buf = [0u8; 8];

    assert_eq!(
        foreign.fill(&mut buf),
        Err(ProcurementError::SourceUnavailable {
            source_name: foreign.name()
        })
    );
}

#[test]
fn test_readiness_state_mirrors_gate() {
    let gate = OnceGate::new();
    assert_eq!(ReadinessState::from(gate.state()), ReadinessState::Unknown);

    gate.get_or_try_init(|| {
        match ReadinessState::from(gate.state()) {
            ReadinessState::InProgress(_) => {}
            other => panic!("expected InProgress, got {other:?}"),
        }
        Ok::<_, ()>(true)
    })
    .expect("Failed to get_or_try_init(..)");
    assert_eq!(ReadinessState::from(gate.state()), ReadinessState::Seeded);

    assert_eq!(
        ReadinessState::from(GateState::Done(false)),
        ReadinessState::NotSeeded
    );
}
