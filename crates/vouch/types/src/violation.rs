//! Contract violations raised by the verify-then-consume discipline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reason a guaranteed-present constructor rejected its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum InvalidReason {
    /// Numeric input (or an arithmetic result) is NaN or infinite.
    #[error("number must be finite")]
    NotFinite,
    /// String input does not match the address format.
    #[error("string is not a well-formed email address")]
    MalformedEmail,
}

/// Every way the verify-then-consume contract can be broken.
///
/// These are programmer errors, not runtime conditions: the caller either
/// skipped a presence check, read a payload that verification already
/// reported absent, dropped a value without honoring the protocol, or fed
/// invalid input to a guaranteed-present constructor. Nullable construction
/// never produces one of these; bad input there settles absent instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum Violation {
    /// A value-consuming accessor ran before any presence check.
    #[error("value consumed before a presence check; call is_null or is_not_null first")]
    UnverifiedAccess,
    /// A value-consuming accessor ran after verification confirmed absence.
    #[error("absent value consumed; verification already reported null")]
    NullValueAccess,
    /// `finish` ran on a value that was never verified.
    #[error("value finished without any presence check")]
    UnauditedVerification,
    /// `finish` ran on a present payload that was never consumed.
    #[error("present value was never consumed")]
    UnusedPresentValue,
    /// A guaranteed-present constructor rejected its input.
    #[error("invalid construction: {0}")]
    InvalidConstruction(#[from] InvalidReason),
}
