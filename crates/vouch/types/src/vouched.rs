//! The guaranteed-present core: a vouched value whose use is still audited.

use std::cell::Cell;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::audit::Audited;
use crate::violation::Violation;

/// Usage progress of a vouched value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UsePhase {
    /// Nothing has consumed the payload yet.
    Unused,
    /// The payload was consumed at least once.
    Used,
}

/// An always-present payload whose consumption is tracked.
///
/// Presence is part of the construction contract, so there is no
/// verification step and reads never fail. The closing audit still demands
/// that the value was actually read; a vouched value nobody consults is
/// dead data flow.
#[derive(Debug)]
pub struct Vouched<T> {
    payload: T,
    phase: Cell<UsePhase>,
}

impl<T> Vouched<T> {
    pub fn new(payload: T) -> Self {
        Self {
            payload,
            phase: Cell::new(UsePhase::Unused),
        }
    }

    /// Current usage phase.
    pub fn phase(&self) -> UsePhase {
        self.phase.get()
    }

    /// Read the payload and mark it used. Never fails.
    pub fn consume(&self) -> &T {
        self.phase.set(UsePhase::Used);
        &self.payload
    }

    /// Closing audit: the payload must have been consumed at least once.
    /// Idempotent and mutation-free.
    pub fn finish(&self) -> Result<(), Violation> {
        match self.phase.get() {
            UsePhase::Unused => {
                warn!(
                    violation = %Violation::UnusedPresentValue,
                    "Vouched value audit failed"
                );
                Err(Violation::UnusedPresentValue)
            }
            UsePhase::Used => Ok(()),
        }
    }
}

impl<T> Audited for Vouched<T> {
    fn finish(&self) -> Result<(), Violation> {
        Vouched::finish(self)
    }
}
