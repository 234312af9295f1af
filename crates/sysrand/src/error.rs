// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt::Display;

use thiserror::Error;

/// Errors that can occur when procuring random bytes.
///
/// On any error the destination buffer holds unspecified bytes and must be
/// discarded. There is no partial-success contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProcurementError {
    /// The requested length was negative or cannot be allocated. Detected
    /// before any native call.
    #[error("InvalidArgument: cannot procure {requested} bytes")]
    InvalidArgument {
        /// Length the caller asked for.
        requested: isize,
    },

    /// The only usable mechanism for this platform is categorically absent
    /// (missing kernel facility, sandboxed away, unsupported target).
    ///
    /// Not retryable within the process.
    #[error("SourceUnavailable: {source_name}")]
    SourceUnavailable {
        /// Native mechanism that could not be used.
        source_name: &'static str,
    },

    /// A native call failed while filling. A fresh call may succeed.
    #[error("SourceFailure: {source_name}: {diagnostic}")]
    SourceFailure {
        /// Native mechanism that failed.
        source_name: &'static str,
        /// Native error code, if the mechanism reported one.
        code: Option<i32>,
        /// Human-readable description derived from the native error.
        diagnostic: String,
    },
}

impl ProcurementError {
    /// Wraps an `errno` value reported by a libc-style call.
    pub(crate) fn from_errno(source_name: &'static str, errno: i32) -> Self {
        if errno <= 0 {
            return Self::failure(source_name, None, "errno: did not return a positive value");
        }

        Self::failure(
            source_name,
            Some(errno),
            std::io::Error::from_raw_os_error(errno),
        )
    }

    /// Wraps a status-style code (`OSStatus`, `NTSTATUS`, WASI errno).
    #[cfg(any(
        test,
        target_vendor = "apple",
        windows,
        all(target_arch = "wasm32", target_os = "wasi")
    ))]
    pub(crate) fn from_status(source_name: &'static str, status: i32) -> Self {
        Self::failure(
            source_name,
            Some(status),
            format_args!("{source_name} returned status {status:#x}"),
        )
    }

    /// Builds a [`ProcurementError::SourceFailure`].
    pub(crate) fn failure(
        source_name: &'static str,
        code: Option<i32>,
        diagnostic: impl Display,
    ) -> Self {
        let error = Self::SourceFailure {
            source_name,
            code,
            diagnostic: diagnostic.to_string(),
        };
        log::debug!("native random source failed: {error}");
        error
    }

    /// Native error code carried by a [`ProcurementError::SourceFailure`].
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::SourceFailure { code, .. } => *code,
            _ => None,
        }
    }
}

impl From<ProcurementError> for std::io::Error {
    fn from(error: ProcurementError) -> Self {
        let kind = match error {
            ProcurementError::InvalidArgument { .. } => std::io::ErrorKind::InvalidInput,
            ProcurementError::SourceUnavailable { .. } => std::io::ErrorKind::Unsupported,
            ProcurementError::SourceFailure { .. } => std::io::ErrorKind::Other,
        };
        std::io::Error::new(kind, error)
    }
}
