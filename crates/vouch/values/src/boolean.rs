//! Boolean family: strict boolean payloads with `and`/`or` algebra.

use serde_json::Value;
use tracing::debug;
use vouch_types::{Audited, Claim, Presence, Verdict, Violation, Vouched};

use crate::json_kind;

fn vet_boolean(raw: Value) -> Verdict<bool> {
    match raw {
        Value::Bool(value) => Verdict::Valid(value),
        other => {
            debug!(
                kind = json_kind(&other),
                "Boolean claim settling absent: input is not a strict boolean"
            );
            Verdict::Invalid
        }
    }
}

/// Consuming read surface of boolean wrappers plus the logical algebra.
///
/// [`condition`](BooleanValue::condition), [`yes`](BooleanValue::yes) and
/// [`no`](BooleanValue::no) are three views of one consuming read and share
/// a single usage event. The combinators consume the receiver first, then
/// the operand; a receiver-side failure leaves the operand untouched. There
/// is no short-circuit on value: `or` with a true receiver still consumes
/// the operand.
pub trait BooleanValue: Audited {
    /// Consume the boolean payload.
    fn condition(&self) -> Result<bool, Violation>;

    /// The payload itself.
    fn yes(&self) -> Result<bool, Violation> {
        self.condition()
    }

    /// The negated payload.
    fn no(&self) -> Result<bool, Violation> {
        Ok(!self.condition()?)
    }

    /// Logical conjunction as a fresh always-present wrapper.
    fn and(&self, other: &impl BooleanValue) -> Result<NotNullBoolean, Violation> {
        let lhs = self.condition()?;
        let rhs = other.condition()?;
        Ok(NotNullBoolean::new(lhs && rhs))
    }

    /// Logical disjunction as a fresh always-present wrapper.
    fn or(&self, other: &impl BooleanValue) -> Result<NotNullBoolean, Violation> {
        let lhs = self.condition()?;
        let rhs = other.condition()?;
        Ok(NotNullBoolean::new(lhs || rhs))
    }
}

/// Possibly-absent boolean built from untyped input.
///
/// Only a strict boolean settles present; truthy/falsy stand-ins (numbers,
/// strings, null) settle absent.
#[derive(Debug)]
pub struct NullableBoolean {
    claim: Claim<bool>,
}

impl NullableBoolean {
    pub fn new(raw: impl Into<Value>) -> Self {
        Self {
            claim: Claim::from_verdict(vet_boolean(raw.into())),
        }
    }
}

impl Audited for NullableBoolean {
    fn finish(&self) -> Result<(), Violation> {
        self.claim.finish()
    }
}

impl Presence for NullableBoolean {
    fn is_null(&self) -> bool {
        self.claim.is_null()
    }

    fn is_not_null(&self) -> bool {
        self.claim.is_not_null()
    }
}

impl BooleanValue for NullableBoolean {
    fn condition(&self) -> Result<bool, Violation> {
        self.claim.consume().copied()
    }
}

/// Always-present boolean.
#[derive(Debug)]
pub struct NotNullBoolean {
    vouched: Vouched<bool>,
}

impl NotNullBoolean {
    pub fn new(value: bool) -> Self {
        Self {
            vouched: Vouched::new(value),
        }
    }
}

impl Audited for NotNullBoolean {
    fn finish(&self) -> Result<(), Violation> {
        self.vouched.finish()
    }
}

impl BooleanValue for NotNullBoolean {
    fn condition(&self) -> Result<bool, Violation> {
        Ok(*self.vouched.consume())
    }
}
