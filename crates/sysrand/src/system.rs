// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use rand_core::{TryCryptoRng, TryRngCore};

use crate::error::ProcurementError;
use crate::select::source;
use crate::traits::EntropySource;

/// The host's cryptographically secure random number source.
///
/// Delegates to the mechanism chosen for this host:
/// - Linux/Android: `getrandom()` syscall, `/dev/urandom` if absent
/// - macOS/iOS: `SecRandomCopyBytes`
/// - Windows: `BCryptGenRandom`
/// - WASI: `random_get`
/// - Browsers/Node (`wasm32-unknown-unknown`): host `crypto` object
///
/// Also usable wherever `rand_core` expects a fallible cryptographic RNG,
/// e.g. to seed a userspace generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEntropySource {}

impl EntropySource for SystemEntropySource {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), ProcurementError> {
        if dest.is_empty() {
            return Ok(());
        }

        source()?.fill(dest)
    }
}

impl TryRngCore for SystemEntropySource {
    type Error = ProcurementError;

    #[inline]
    fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
        let mut buf = [0u8; 4];
        EntropySource::fill_bytes(self, &mut buf)?;
        Ok(u32::from_ne_bytes(buf))
    }

    #[inline]
    fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
        let mut buf = [0u8; 8];
        EntropySource::fill_bytes(self, &mut buf)?;
        Ok(u64::from_ne_bytes(buf))
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Self::Error> {
        EntropySource::fill_bytes(self, dest)
    }
}

impl TryCryptoRng for SystemEntropySource {}
