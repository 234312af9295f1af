// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # sysrand
//!
//! Fills buffers with cryptographically secure random bytes procured from
//! the operating system.
//!
//! The OS does the random number generation. This crate handles the
//! procurement: picking the native mechanism usable on the current host,
//! driving partial reads to completion, retrying interrupted calls, waiting
//! once for a seeded entropy pool, and never returning fewer bytes than
//! requested without an error.
//!
//! ## Core API
//!
//! - [`fill`]: fill a caller-owned buffer
//! - [`allocate_and_fill`]: allocate and fill `count` bytes
//! - [`SystemEntropySource`]: the same, as an [`EntropySource`] and a
//!   `rand_core` fallible crypto RNG
//! - [`ProcurementError`]: the single error type
//!
//! ## Example
//!
//! ```rust
//! use sysrand::{EntropySource, SystemEntropySource};
//!
//! let mut key = [0u8; 32];
//! sysrand::fill(&mut key).expect("Failed to fill(..)");
//!
//! let mut salt = [0u8; 16];
//! SystemEntropySource {}
//!     .fill_bytes(&mut salt)
//!     .expect("Failed to fill_bytes(..)");
//! ```
//!
//! ## Platform Support
//!
//! - Linux/Android: `getrandom()` syscall. If the kernel lacks it (`ENOSYS`)
//!   or a sandbox forbids it (`EPERM`), `/dev/urandom` is read after
//!   `/dev/random` reports a seeded pool (`dev_urandom_fallback` feature,
//!   on by default).
//! - macOS/iOS: `SecRandomCopyBytes`
//! - Windows: `BCryptGenRandom`
//! - WASI: `random_get`
//! - Browsers/Node (`wasm32-unknown-unknown`): `crypto.getRandomValues` /
//!   `crypto.randomFillSync`, in 8 KiB chunks
//!
//! ## Building blocks
//!
//! [`fill_loop`] and [`chunked`] are the loops every backend is built on.
//! They are public so other native primitives can be driven the same way.

#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod backends;
mod error;
mod procure;
mod select;
mod support;
mod system;
mod traits;
mod zeroize;

pub mod chunked;
pub mod fill_loop;

pub use error::ProcurementError;
pub use procure::{allocate_and_fill, fill};
pub use select::{ReadinessState, SourceChoice, readiness, source};
pub use sysrand_once::OwnerToken;
pub use system::SystemEntropySource;
pub use traits::EntropySource;

#[cfg(any(test, feature = "test_utils"))]
pub use support::test_utils;
