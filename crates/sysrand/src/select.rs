// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Platform source selection.
//!
//! Each build target has exactly one mechanism, except Linux/Android where
//! the `getrandom(2)` syscall is preferred and `/dev/urandom` is the fallback
//! when the kernel lacks it. That decision is probed once per process and
//! never changes afterwards.

use sysrand_once::{GateState, OwnerToken};

use crate::backends;
use crate::error::ProcurementError;

/// Native mechanism used to procure random bytes on this host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SourceChoice {
    /// Linux/Android `getrandom(2)` syscall.
    GetRandom,
    /// Linux/Android `/dev/urandom`, after `/dev/random` reports a seeded pool.
    DevUrandom,
    /// Apple `SecRandomCopyBytes` (Security.framework).
    SecRandomCopyBytes,
    /// Windows `BCryptGenRandom` with the system preferred RNG.
    BCryptGenRandom,
    /// WASI preview 1 `random_get`.
    WasiRandomGet,
    /// Host crypto object on `wasm32-unknown-unknown`.
    WebCrypto,
}

impl SourceChoice {
    /// Name used in logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            SourceChoice::GetRandom => "getrandom",
            SourceChoice::DevUrandom => "/dev/urandom",
            SourceChoice::SecRandomCopyBytes => "SecRandomCopyBytes",
            SourceChoice::BCryptGenRandom => "BCryptGenRandom",
            SourceChoice::WasiRandomGet => "random_get",
            SourceChoice::WebCrypto => "crypto.getRandomValues",
        }
    }

    /// Whether reads must wait for the one-time readiness gate.
    pub fn requires_readiness_gate(self) -> bool {
        matches!(self, SourceChoice::DevUrandom)
    }

    /// Fills a non-empty `dest` with this mechanism.
    pub(crate) fn fill(self, dest: &mut [u8]) -> Result<(), ProcurementError> {
        if self.requires_readiness_gate() {
            await_readiness(self)?;
        }

        match self {
            #[cfg(any(target_os = "linux", target_os = "android"))]
            SourceChoice::GetRandom => backends::getrandom::fill(dest),
            #[cfg(all(
                any(target_os = "linux", target_os = "android"),
                feature = "dev_urandom_fallback"
            ))]
            SourceChoice::DevUrandom => backends::urandom::fill(dest),
            #[cfg(target_vendor = "apple")]
            SourceChoice::SecRandomCopyBytes => backends::apple::fill(dest),
            #[cfg(windows)]
            SourceChoice::BCryptGenRandom => backends::windows::fill(dest),
            #[cfg(all(target_arch = "wasm32", target_os = "wasi"))]
            SourceChoice::WasiRandomGet => backends::wasi::fill(dest),
            #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
            SourceChoice::WebCrypto => backends::web_crypto::fill(dest),
            other => Err(ProcurementError::SourceUnavailable {
                source_name: other.name(),
            }),
        }
    }
}

/// One-time readiness of a source that must wait for a seeded pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessState {
    /// Nobody has checked yet, or the last check failed.
    Unknown,
    /// The owner of the token is waiting for the pool.
    InProgress(OwnerToken),
    /// The pool is seeded; reads may proceed.
    Seeded,
    /// The check completed and reported an unseeded pool.
    NotSeeded,
}

impl From<GateState> for ReadinessState {
    fn from(state: GateState) -> Self {
        match state {
            GateState::Unset => ReadinessState::Unknown,
            GateState::Claimed(owner) => ReadinessState::InProgress(owner),
            GateState::Done(true) => ReadinessState::Seeded,
            GateState::Done(false) => ReadinessState::NotSeeded,
        }
    }
}

/// Returns the mechanism [`fill`](crate::fill) uses on this host.
///
/// On Linux/Android the first call probes for `getrandom(2)` with a
/// non-blocking one-byte read; the answer is remembered for the process.
///
/// # Errors
///
/// [`ProcurementError::SourceUnavailable`] if this host has no usable
/// mechanism.
pub fn source() -> Result<SourceChoice, ProcurementError> {
    select()
}

/// Blocks until `choice` may be read. Resolved once per process.
#[cfg(all(
    any(target_os = "linux", target_os = "android"),
    feature = "dev_urandom_fallback"
))]
fn await_readiness(choice: SourceChoice) -> Result<(), ProcurementError> {
    match choice {
        SourceChoice::DevUrandom => backends::urandom::ensure_seeded(),
        _ => Ok(()),
    }
}

#[cfg(not(all(
    any(target_os = "linux", target_os = "android"),
    feature = "dev_urandom_fallback"
)))]
fn await_readiness(choice: SourceChoice) -> Result<(), ProcurementError> {
    Err(ProcurementError::SourceUnavailable {
        source_name: choice.name(),
    })
}

/// Readiness of the `/dev/urandom` fallback, if this build has one.
///
/// `None` on targets whose mechanisms never wait for a readiness gate.
#[cfg(all(
    any(target_os = "linux", target_os = "android"),
    feature = "dev_urandom_fallback"
))]
pub fn readiness() -> Option<ReadinessState> {
    Some(backends::urandom::readiness())
}

/// Readiness of the `/dev/urandom` fallback, if this build has one.
///
/// `None` on targets whose mechanisms never wait for a readiness gate.
#[cfg(not(all(
    any(target_os = "linux", target_os = "android"),
    feature = "dev_urandom_fallback"
)))]
pub fn readiness() -> Option<ReadinessState> {
    None
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn select() -> Result<SourceChoice, ProcurementError> {
    if backends::getrandom::is_available() {
        return Ok(SourceChoice::GetRandom);
    }

    fallback()
}

#[cfg(all(
    any(target_os = "linux", target_os = "android"),
    feature = "dev_urandom_fallback"
))]
fn fallback() -> Result<SourceChoice, ProcurementError> {
    Ok(SourceChoice::DevUrandom)
}

#[cfg(all(
    any(target_os = "linux", target_os = "android"),
    not(feature = "dev_urandom_fallback")
))]
fn fallback() -> Result<SourceChoice, ProcurementError> {
    Err(ProcurementError::SourceUnavailable {
        source_name: backends::getrandom::SOURCE_NAME,
    })
}

#[cfg(target_vendor = "apple")]
fn select() -> Result<SourceChoice, ProcurementError> {
    Ok(SourceChoice::SecRandomCopyBytes)
}

#[cfg(windows)]
fn select() -> Result<SourceChoice, ProcurementError> {
    Ok(SourceChoice::BCryptGenRandom)
}

#[cfg(all(target_arch = "wasm32", target_os = "wasi"))]
fn select() -> Result<SourceChoice, ProcurementError> {
    Ok(SourceChoice::WasiRandomGet)
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
fn select() -> Result<SourceChoice, ProcurementError> {
    Ok(SourceChoice::WebCrypto)
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_vendor = "apple",
    windows,
    all(target_arch = "wasm32", any(target_os = "wasi", target_os = "unknown")),
)))]
fn select() -> Result<SourceChoice, ProcurementError> {
    Err(ProcurementError::SourceUnavailable {
        source_name: "unsupported target",
    })
}
