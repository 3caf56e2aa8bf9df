//! Number family: finite doubles with arithmetic and comparison algebra.

use serde_json::Value;
use tracing::debug;
use vouch_types::{Audited, Claim, InvalidReason, Presence, Verdict, Violation, Vouched};

use crate::boolean::NotNullBoolean;
use crate::json_kind;

fn vet_number(raw: Value) -> Verdict<f64> {
    match raw {
        Value::Number(number) => match number.as_f64() {
            Some(value) if value.is_finite() => Verdict::Valid(value),
            _ => {
                debug!("Number claim settling absent: no finite double reading");
                Verdict::Invalid
            }
        },
        other => {
            debug!(
                kind = json_kind(&other),
                "Number claim settling absent: input is not a number"
            );
            Verdict::Invalid
        }
    }
}

/// Consuming read surface of number wrappers plus the value algebra.
///
/// Arithmetic and comparisons consume the receiver first, then the operand;
/// a receiver-side failure leaves the operand untouched. Results are fresh
/// always-present wrappers with their own usage tracking, so chains stay
/// auditable link by link. An arithmetic result that leaves the finite
/// range (overflow, division by zero) fails the result construction with
/// [`InvalidReason::NotFinite`]; at that point both operands are already
/// consumed. Comparisons use plain IEEE-754 ordering.
pub trait NumberValue: Audited {
    /// Consume the numeric payload.
    fn value(&self) -> Result<f64, Violation>;

    /// Sum as a fresh always-present wrapper.
    fn add(&self, other: &impl NumberValue) -> Result<NotNullNumber, Violation> {
        NotNullNumber::new(self.value()? + other.value()?)
    }

    /// Difference as a fresh always-present wrapper.
    fn minus(&self, other: &impl NumberValue) -> Result<NotNullNumber, Violation> {
        NotNullNumber::new(self.value()? - other.value()?)
    }

    /// Product as a fresh always-present wrapper.
    fn multiply_by(&self, other: &impl NumberValue) -> Result<NotNullNumber, Violation> {
        NotNullNumber::new(self.value()? * other.value()?)
    }

    /// Quotient as a fresh always-present wrapper.
    fn divided_by(&self, other: &impl NumberValue) -> Result<NotNullNumber, Violation> {
        NotNullNumber::new(self.value()? / other.value()?)
    }

    fn equal_to(&self, other: &impl NumberValue) -> Result<NotNullBoolean, Violation> {
        Ok(NotNullBoolean::new(self.value()? == other.value()?))
    }

    fn greater_than(&self, other: &impl NumberValue) -> Result<NotNullBoolean, Violation> {
        Ok(NotNullBoolean::new(self.value()? > other.value()?))
    }

    fn greater_or_equal_than(&self, other: &impl NumberValue) -> Result<NotNullBoolean, Violation> {
        Ok(NotNullBoolean::new(self.value()? >= other.value()?))
    }

    fn less_than(&self, other: &impl NumberValue) -> Result<NotNullBoolean, Violation> {
        Ok(NotNullBoolean::new(self.value()? < other.value()?))
    }

    fn less_or_equal_than(&self, other: &impl NumberValue) -> Result<NotNullBoolean, Violation> {
        Ok(NotNullBoolean::new(self.value()? <= other.value()?))
    }
}

/// Possibly-absent finite number built from untyped input.
///
/// Non-numeric input settles absent. So do NaN and the infinities: the
/// JSON value model folds non-finite doubles to null before the gate even
/// runs, and the gate itself refuses any reading that is not finite.
#[derive(Debug)]
pub struct NullableNumber {
    claim: Claim<f64>,
}

impl NullableNumber {
    pub fn new(raw: impl Into<Value>) -> Self {
        Self {
            claim: Claim::from_verdict(vet_number(raw.into())),
        }
    }
}

impl Audited for NullableNumber {
    fn finish(&self) -> Result<(), Violation> {
        self.claim.finish()
    }
}

impl Presence for NullableNumber {
    fn is_null(&self) -> bool {
        self.claim.is_null()
    }

    fn is_not_null(&self) -> bool {
        self.claim.is_not_null()
    }
}

impl NumberValue for NullableNumber {
    fn value(&self) -> Result<f64, Violation> {
        self.claim.consume().copied()
    }
}

/// Always-present finite number.
#[derive(Debug)]
pub struct NotNullNumber {
    vouched: Vouched<f64>,
}

impl NotNullNumber {
    /// Rejects NaN and the infinities with
    /// [`Violation::InvalidConstruction`] carrying the finiteness reason.
    pub fn new(value: f64) -> Result<Self, Violation> {
        if value.is_finite() {
            Ok(Self {
                vouched: Vouched::new(value),
            })
        } else {
            Err(Violation::InvalidConstruction(InvalidReason::NotFinite))
        }
    }
}

impl Audited for NotNullNumber {
    fn finish(&self) -> Result<(), Violation> {
        self.vouched.finish()
    }
}

impl NumberValue for NotNullNumber {
    fn value(&self) -> Result<f64, Violation> {
        Ok(*self.vouched.consume())
    }
}
