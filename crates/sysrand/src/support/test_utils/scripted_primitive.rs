// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::collections::VecDeque;

use crate::fill_loop::{ReadOutcome, RetryPolicy};

/// One scripted answer of a [`ScriptedPrimitive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedStep {
    /// Write up to this many bytes (capped at the requested length).
    Progress(usize),
    /// Report the transient-retry code.
    Interrupt,
    /// Report a non-transient error code.
    Fail(i32),
}

/// Fake single-shot read primitive that replays a script.
///
/// Once the script runs out it fills the whole request. Written bytes are
/// `fill_byte`, so untouched positions are easy to spot.
pub struct ScriptedPrimitive {
    script: VecDeque<ScriptedStep>,
    fill_byte: u8,
    calls: usize,
    interrupts: usize,
}

impl ScriptedPrimitive {
    /// Code reported for [`ScriptedStep::Interrupt`].
    pub const INTERRUPTED: i32 = 4;

    /// Creates a primitive replaying `script`, writing `fill_byte`.
    pub fn new(script: impl IntoIterator<Item = ScriptedStep>, fill_byte: u8) -> Self {
        Self {
            script: script.into_iter().collect(),
            fill_byte,
            calls: 0,
            interrupts: 0,
        }
    }

    /// Policy treating [`ScriptedPrimitive::INTERRUPTED`] as transient.
    pub fn retry_policy() -> RetryPolicy {
        RetryPolicy::new("scripted", |code| code == Self::INTERRUPTED)
    }

    /// One invocation of the primitive.
    pub fn read(&mut self, buf: &mut [u8]) -> ReadOutcome {
        self.calls += 1;

        match self.script.pop_front() {
            Some(ScriptedStep::Progress(n)) => {
                let n = n.min(buf.len());
                buf[..n].fill(self.fill_byte);
                Ok(n)
            }
            Some(ScriptedStep::Interrupt) => {
                self.interrupts += 1;
                Err(Self::INTERRUPTED)
            }
            Some(ScriptedStep::Fail(code)) => Err(code),
            None => {
                buf.fill(self.fill_byte);
                Ok(buf.len())
            }
        }
    }

    /// Number of invocations so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Number of interruptions reported so far.
    pub fn interrupts(&self) -> usize {
        self.interrupts
    }

    /// Steps not consumed yet.
    pub fn remaining_steps(&self) -> usize {
        self.script.len()
    }
}
