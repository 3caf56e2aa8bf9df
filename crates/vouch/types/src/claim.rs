//! The nullable core: a claimed value that must be verified before use.

use std::cell::Cell;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::audit::Audited;
use crate::violation::Violation;

/// Outcome of vetting untyped input for a claim.
///
/// Each wrapper family supplies one vetting function from raw input to
/// `Verdict`; the claim constructor consumes the verdict and fixes the
/// payload. Invalid input never fails construction, it settles absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<T> {
    /// Input passed the family gate and yielded a payload.
    Valid(T),
    /// Input failed the gate; the claim settles absent.
    Invalid,
}

/// Progress of a claim through the verify-then-consume protocol.
///
/// A single phase value replaces the verification/consumption flag pair so
/// that contradictory flag combinations cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimPhase {
    /// No presence check has run yet.
    Unverified,
    /// A presence check ran; the payload is absent.
    VerifiedAbsent,
    /// A presence check ran; the payload is present and not yet consumed.
    VerifiedPresentUnused,
    /// The present payload was consumed at least once.
    VerifiedPresentUsed,
}

/// A possibly-absent payload whose use is tracked through [`ClaimPhase`].
///
/// The payload is fixed at construction and never mutated. Presence checks
/// settle verification, consumption requires both a prior check and a
/// present payload, and [`Claim::finish`] audits retrospectively that the
/// whole protocol ran. Phase transitions go through a [`Cell`], so the type
/// works behind shared references and is `!Sync`; instances belong to one
/// thread.
#[derive(Debug)]
pub struct Claim<T> {
    payload: Option<T>,
    phase: Cell<ClaimPhase>,
}

impl<T> Claim<T> {
    /// Fix payload and presence from a vetting outcome.
    pub fn from_verdict(verdict: Verdict<T>) -> Self {
        let payload = match verdict {
            Verdict::Valid(value) => Some(value),
            Verdict::Invalid => None,
        };
        Self {
            payload,
            phase: Cell::new(ClaimPhase::Unverified),
        }
    }

    /// Current protocol phase.
    pub fn phase(&self) -> ClaimPhase {
        self.phase.get()
    }

    /// True when the payload is absent. Counts as verification; repeat
    /// calls are stable.
    pub fn is_null(&self) -> bool {
        self.settle_verification();
        self.payload.is_none()
    }

    /// True when the payload is present. Counts as verification; repeat
    /// calls are stable.
    pub fn is_not_null(&self) -> bool {
        !self.is_null()
    }

    fn settle_verification(&self) {
        if self.phase.get() == ClaimPhase::Unverified {
            let settled = if self.payload.is_some() {
                ClaimPhase::VerifiedPresentUnused
            } else {
                ClaimPhase::VerifiedAbsent
            };
            self.phase.set(settled);
        }
    }

    /// Read the payload under the discipline.
    ///
    /// Fails with [`Violation::UnverifiedAccess`] before any presence check
    /// and with [`Violation::NullValueAccess`] once verification settled
    /// absent. The first success moves the phase to
    /// [`ClaimPhase::VerifiedPresentUsed`]; later reads stay there.
    pub fn consume(&self) -> Result<&T, Violation> {
        match self.phase.get() {
            ClaimPhase::Unverified => return Err(Violation::UnverifiedAccess),
            ClaimPhase::VerifiedAbsent => return Err(Violation::NullValueAccess),
            ClaimPhase::VerifiedPresentUnused | ClaimPhase::VerifiedPresentUsed => {}
        }
        let value = self.payload.as_ref().ok_or(Violation::NullValueAccess)?;
        self.phase.set(ClaimPhase::VerifiedPresentUsed);
        Ok(value)
    }

    /// Closing audit: the claim must have been verified, and a present
    /// payload must also have been consumed. Idempotent and mutation-free.
    pub fn finish(&self) -> Result<(), Violation> {
        let outcome = match self.phase.get() {
            ClaimPhase::Unverified => Err(Violation::UnauditedVerification),
            ClaimPhase::VerifiedPresentUnused => Err(Violation::UnusedPresentValue),
            ClaimPhase::VerifiedAbsent | ClaimPhase::VerifiedPresentUsed => Ok(()),
        };
        if let Err(violation) = outcome {
            warn!(%violation, "Claim audit failed");
        }
        outcome
    }
}

impl<T> Audited for Claim<T> {
    fn finish(&self) -> Result<(), Violation> {
        Claim::finish(self)
    }
}
