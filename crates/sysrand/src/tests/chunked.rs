// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::num::NonZeroUsize;

use proptest::prelude::*;

use crate::chunked::{fill_in_chunks, fill_via_staging};
use crate::error::ProcurementError;

const NATIVE_CAP: usize = 8192;

/// Non-zero byte identifying the absolute position it was written for.
fn position_byte(pos: usize) -> u8 {
    (pos % 255) as u8 + 1
}

fn failure() -> ProcurementError {
    ProcurementError::SourceFailure {
        source_name: "fake",
        code: Some(1),
        diagnostic: "fake".into(),
    }
}

#[test]
fn test_fill_via_staging_spans_multiple_chunks_without_gaps() {
    let mut staging = [0u8; NATIVE_CAP];
    let mut dest = vec![0u8; 20_000];
    let mut chunk_lens = Vec::new();
    let mut written = 0;

    fill_via_staging(&mut dest, &mut staging, |scratch| {
        // The previous chunk must have been wiped before this call
        assert!(scratch.iter().all(|b| *b == 0));

        for (i, byte) in scratch.iter_mut().enumerate() {
            *byte = position_byte(written + i);
        }
        written += scratch.len();
        chunk_lens.push(scratch.len());
        Ok(())
    })
    .expect("Failed to fill_via_staging(..)");

    assert_eq!(chunk_lens, [NATIVE_CAP, NATIVE_CAP, 20_000 - 2 * NATIVE_CAP]);
    assert_eq!(written, dest.len());
    for (pos, byte) in dest.iter().enumerate() {
        assert_eq!(*byte, position_byte(pos), "gap or overlap at {pos}");
    }
    assert!(staging.iter().all(|b| *b == 0));
}

#[test]
fn test_fill_via_staging_zeroes_scratch_on_failure() {
    let mut staging = [0u8; 16];
    let mut dest = [0u8; 40];
    let mut calls = 0;

    let result = fill_via_staging(&mut dest, &mut staging, |scratch| {
        calls += 1;
        scratch.fill(0xEE);
        if calls == 2 { Err(failure()) } else { Ok(()) }
    });

    assert_eq!(result, Err(failure()));
    assert_eq!(calls, 2);
    assert!(staging.iter().all(|b| *b == 0));
    // Only the first chunk was copied out
    assert!(dest[..16].iter().all(|b| *b == 0xEE));
    assert!(dest[16..].iter().all(|b| *b == 0));
}

#[test]
fn test_fill_via_staging_empty_dest_never_calls_native() {
    let mut staging = [0u8; 8];
    let mut calls = 0;

    fill_via_staging(&mut [], &mut staging, |_| {
        calls += 1;
        Ok(())
    })
    .expect("Failed to fill_via_staging(..)");

    assert_eq!(calls, 0);
}

#[test]
fn test_fill_in_chunks_respects_cap() {
    let cap = NonZeroUsize::new(NATIVE_CAP).expect("Failed to NonZeroUsize::new(..)");
    let mut dest = vec![0u8; 20_000];
    let mut chunk_lens = Vec::new();

    fill_in_chunks(&mut dest, cap, |chunk| {
        chunk_lens.push(chunk.len());
        chunk.fill(0x11);
        Ok(())
    })
    .expect("Failed to fill_in_chunks(..)");

    assert_eq!(chunk_lens, [8192, 8192, 3616]);
    assert!(dest.iter().all(|b| *b == 0x11));
}

#[test]
fn test_fill_in_chunks_stops_at_first_failure() {
    let cap = NonZeroUsize::new(4).expect("Failed to NonZeroUsize::new(..)");
    let mut dest = [0u8; 12];
    let mut calls = 0;

    let result = fill_in_chunks(&mut dest, cap, |_| {
        calls += 1;
        Err(failure())
    });

    assert_eq!(result, Err(failure()));
    assert_eq!(calls, 1);
}

proptest! {
    #[test]
    fn fill_via_staging_covers_every_byte_exactly_once(len in 0..40_000usize) {
        let mut staging = [0u8; 1024];
        let mut dest = vec![0u8; len];
        let mut written = 0;

        fill_via_staging(&mut dest, &mut staging, |scratch| {
            for (i, byte) in scratch.iter_mut().enumerate() {
                *byte = position_byte(written + i);
            }
            written += scratch.len();
            Ok(())
        })
        .expect("Failed to fill_via_staging(..)");

        prop_assert_eq!(written, len);
        prop_assert!(dest.iter().enumerate().all(|(pos, b)| *b == position_byte(pos)));
        prop_assert!(staging.iter().all(|b| *b == 0));
    }
}
