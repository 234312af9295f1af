// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

mod chunked;
mod error;
mod select;

#[cfg(any(target_os = "linux", target_os = "android"))]
mod linux;
