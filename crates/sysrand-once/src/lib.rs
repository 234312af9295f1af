// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! sysrand_once - Run an expensive check at most once per process
//!
//! [`OnceGate`] executes a possibly blocking, boolean-valued action exactly
//! once, no matter how many threads call into it concurrently. The first
//! caller to claim the gate becomes its owner and runs the action; every
//! other caller waits and then observes the remembered outcome.
//!
//! This is a specialized construct, not a general lock:
//!
//! - There is no mutex. The gate is a single atomic word holding one of
//!   `Unset`, `Claimed(owner)`, `Done(true)` or `Done(false)`.
//! - Once resolved, reading the outcome is a single `Acquire` load, so
//!   callers never serialize after the first resolution.
//! - Failures are **not** memoized. If the action returns an error or
//!   panics, the owner releases its claim and a later caller may retry.
//!
//! ## Example
//!
//! ```
//! use sysrand_once::OnceGate;
//!
//! static POOL_READY: OnceGate = OnceGate::new();
//!
//! fn pool_ready() -> Result<bool, &'static str> {
//!     POOL_READY.get_or_try_init(|| {
//!         // e.g. poll the kernel until its entropy pool is seeded
//!         Ok(true)
//!     })
//! }
//!
//! assert_eq!(pool_ready(), Ok(true));
//! assert_eq!(POOL_READY.get(), Some(true));
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

#[cfg(all(feature = "std", not(test)))]
extern crate std;


use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};

/// Gate state: nobody has resolved the gate yet (or the last owner failed)
const STATE_UNSET: usize = 0;
/// Gate state: resolved, action returned `false`
const STATE_DONE_FALSE: usize = 1;
/// Gate state: resolved, action returned `true`
const STATE_DONE_TRUE: usize = 2;
/// First value usable as an owner token. Everything below is a marker.
const FIRST_TOKEN: usize = 3;

/// Number of doubling spin rounds before waiters start yielding.
const SPIN_LIMIT: u32 = 6;

static NEXT_TOKEN: AtomicUsize = AtomicUsize::new(FIRST_TOKEN);

/// Identifies the caller currently running a gate's action.
///
/// Tokens are unique for the lifetime of the process and never collide with
/// the gate's marker values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerToken(usize);

impl OwnerToken {
    fn next() -> Self {
        Self(token_from_counter(
            NEXT_TOKEN.fetch_add(1, Ordering::Relaxed),
        ))
    }

    /// Raw value stored in the gate while this owner holds the claim.
    pub fn get(self) -> usize {
        self.0
    }
}

// After the counter wraps, fold the reserved marker values back into the
// token range.
#[inline(always)]
pub(crate) const fn token_from_counter(raw: usize) -> usize {
    if raw < FIRST_TOKEN {
        raw + FIRST_TOKEN
    } else {
        raw
    }
}

/// Observable state of a [`OnceGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Not resolved. The next caller will claim the gate.
    Unset,
    /// An owner is currently running the action.
    Claimed(OwnerToken),
    /// Resolved with the remembered outcome.
    Done(bool),
}

impl GateState {
    #[inline(always)]
    fn decode(raw: usize) -> Self {
        match raw {
            STATE_UNSET => GateState::Unset,
            STATE_DONE_FALSE => GateState::Done(false),
            STATE_DONE_TRUE => GateState::Done(true),
            token => GateState::Claimed(OwnerToken(token)),
        }
    }
}

/// Runs a boolean-valued action at most once per gate.
///
/// See the [crate documentation](crate) for the protocol.
pub struct OnceGate {
    state: AtomicUsize,
}

impl OnceGate {
    /// Creates an unresolved gate. Usable in `static` items.
    pub const fn new() -> Self {
        Self {
            state: AtomicUsize::new(STATE_UNSET),
        }
    }

    /// Returns the remembered outcome, or `None` if the gate is unresolved.
    #[inline]
    pub fn get(&self) -> Option<bool> {
        match self.state() {
            GateState::Done(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Returns a snapshot of the gate's state.
    #[inline]
    pub fn state(&self) -> GateState {
        GateState::decode(self.state.load(Ordering::Acquire))
    }

    /// Returns the remembered outcome, running `action` first if no caller
    /// has resolved the gate yet.
    ///
    /// Exactly one concurrent caller runs `action`; the others wait for it.
    /// If `action` fails, its error is returned to the caller that ran it and
    /// the gate goes back to unset, so waiting or later callers retry.
    ///
    /// # Errors
    ///
    /// Returns whatever `action` returned when this caller was the one that
    /// ran it.
    #[inline]
    pub fn get_or_try_init<F, E>(&self, action: F) -> Result<bool, E>
    where
        F: FnOnce() -> Result<bool, E>,
    {
        // Fast path: already resolved
        if let Some(outcome) = self.get() {
            return Ok(outcome);
        }

        self.init_slow(action)
    }

    /// Runs a unit-valued `action` at most once. Success resolves the gate to
    /// `Done(true)`.
    ///
    /// # Errors
    ///
    /// Same as [`OnceGate::get_or_try_init`].
    #[inline]
    pub fn call_once<F, E>(&self, action: F) -> Result<(), E>
    where
        F: FnOnce() -> Result<(), E>,
    {
        self.get_or_try_init(|| action().map(|()| true))
            .map(|_| ())
    }

    /// Forces the gate back to unset.
    ///
    /// Only meant for tests that need to re-run a process-wide gate.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn reset_for_test(&self) {
        self.state.store(STATE_UNSET, Ordering::SeqCst);
    }

    #[cold]
    #[inline(never)]
    fn init_slow<F, E>(&self, action: F) -> Result<bool, E>
    where
        F: FnOnce() -> Result<bool, E>,
    {
        let token = OwnerToken::next();
        let mut backoff = Backoff::new();

        // Try to become the owner, or wait for the current one
        loop {
            match self.state.compare_exchange(
                STATE_UNSET,
                token.0,
                Ordering::Acquire,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(STATE_DONE_TRUE) => return Ok(true),
                Err(STATE_DONE_FALSE) => return Ok(false),
                Err(_) => backoff.snooze(),
            }
        }

        log::trace!("once gate claimed by owner {}", token.0);

        let claim = Claim { gate: self, token };
        let outcome = action()?;
        claim.publish(outcome);

        Ok(outcome)
    }
}

impl Default for OnceGate {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OnceGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnceGate")
            .field("state", &self.state())
            .finish()
    }
}

/// Held by the owner while its action runs.
///
/// Dropping without publishing (error or panic) releases the claim.
struct Claim<'a> {
    gate: &'a OnceGate,
    token: OwnerToken,
}

impl Claim<'_> {
    fn publish(self, outcome: bool) {
        let done = if outcome {
            STATE_DONE_TRUE
        } else {
            STATE_DONE_FALSE
        };
        // Only the owner may move the gate out of its own claim. The release
        // attempt in `drop` then finds `done` and does nothing.
        let _ = self.gate.state.compare_exchange(
            self.token.0,
            done,
            Ordering::Release,
            Ordering::Relaxed,
        );
    }
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        if self
            .gate
            .state
            .compare_exchange(
                self.token.0,
                STATE_UNSET,
                Ordering::Release,
                Ordering::Relaxed,
            )
            .is_ok()
        {
            log::trace!("once gate released by owner {} without outcome", self.token.0);
        }
    }
}

/// Bounded exponential spin, then yield to the scheduler.
pub(crate) struct Backoff {
    step: u32,
}

impl Backoff {
    pub(crate) fn new() -> Self {
        Self { step: 0 }
    }

    pub(crate) fn is_yielding(&self) -> bool {
        self.step > SPIN_LIMIT
    }

    pub(crate) fn snooze(&mut self) {
        if self.is_yielding() {
            yield_now();
            return;
        }

        for _ in 0..(1u32 << self.step) {
            core::hint::spin_loop();
        }
        self.step += 1;
    }
}

#[cfg(any(test, feature = "std"))]
fn yield_now() {
    std::thread::yield_now();
}

#[cfg(not(any(test, feature = "std")))]
fn yield_now() {
    for _ in 0..(1u32 << SPIN_LIMIT) {
        core::hint::spin_loop();
    }
}
