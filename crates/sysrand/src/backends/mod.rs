// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Native mechanisms, one family per build target.
//!
//! Every `fill` here must write all of `dest` or return an error. None of
//! them is called with an empty `dest`.

#[cfg(any(target_os = "linux", target_os = "android"))]
pub(crate) mod unix;

#[cfg(any(target_os = "linux", target_os = "android"))]
pub(crate) mod getrandom;

#[cfg(all(
    any(target_os = "linux", target_os = "android"),
    feature = "dev_urandom_fallback"
))]
pub(crate) mod urandom;

#[cfg(target_vendor = "apple")]
pub(crate) mod apple;

#[cfg(windows)]
pub(crate) mod windows;

#[cfg(all(target_arch = "wasm32", target_os = "wasi"))]
pub(crate) mod wasi;

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub(crate) mod web_crypto;
