// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::ProcurementError;

#[test]
fn test_from_errno_carries_code_and_os_message() {
    let error = ProcurementError::from_errno("getrandom", 1);

    assert_eq!(error.raw_os_error(), Some(1));
    let expected = std::io::Error::from_raw_os_error(1).to_string();
    assert_eq!(error.to_string(), format!("SourceFailure: getrandom: {expected}"));
}

#[test]
fn test_from_errno_non_positive_has_no_code() {
    let error = ProcurementError::from_errno("getrandom", -3);

    assert_eq!(error.raw_os_error(), None);
    assert!(error.to_string().contains("did not return a positive value"));
}

#[test]
fn test_from_status_formats_hex_code() {
    let error = ProcurementError::from_status("BCryptGenRandom", -1_073_741_811);

    assert_eq!(error.raw_os_error(), Some(-1_073_741_811));
    assert_eq!(
        error.to_string(),
        "SourceFailure: BCryptGenRandom: BCryptGenRandom returned status 0xc000000d"
    );
}

#[test]
fn test_non_failures_have_no_os_error() {
    assert_eq!(
        ProcurementError::InvalidArgument { requested: -1 }.raw_os_error(),
        None
    );
    assert_eq!(
        ProcurementError::SourceUnavailable {
            source_name: "getrandom"
        }
        .raw_os_error(),
        None
    );
}

#[test]
fn test_display_messages() {
    assert_eq!(
        ProcurementError::InvalidArgument { requested: -4 }.to_string(),
        "InvalidArgument: cannot procure -4 bytes"
    );
    assert_eq!(
        ProcurementError::SourceUnavailable {
            source_name: "getrandom"
        }
        .to_string(),
        "SourceUnavailable: getrandom"
    );
}

#[test]
fn test_into_io_error_kinds() {
    let invalid: std::io::Error = ProcurementError::InvalidArgument { requested: -1 }.into();
    assert_eq!(invalid.kind(), std::io::ErrorKind::InvalidInput);

    let unavailable: std::io::Error = ProcurementError::SourceUnavailable {
        source_name: "getrandom",
    }
    .into();
    assert_eq!(unavailable.kind(), std::io::ErrorKind::Unsupported);

    let failure: std::io::Error = ProcurementError::from_errno("/dev/urandom", 5).into();
    assert_eq!(failure.kind(), std::io::ErrorKind::Other);
}
