//! String family: strict string payloads, passthrough only.

use serde_json::Value;
use tracing::debug;
use vouch_types::{Audited, Claim, Presence, Verdict, Violation, Vouched};

use crate::json_kind;

fn vet_string(raw: Value) -> Verdict<String> {
    match raw {
        Value::String(value) => Verdict::Valid(value),
        other => {
            debug!(
                kind = json_kind(&other),
                "String claim settling absent: input is not a string"
            );
            Verdict::Invalid
        }
    }
}

/// Consuming read surface of string wrappers. No algebra.
pub trait StringValue: Audited {
    /// Consume the string payload.
    fn value(&self) -> Result<&str, Violation>;
}

/// Possibly-absent string built from untyped input.
#[derive(Debug)]
pub struct NullableString {
    claim: Claim<String>,
}

impl NullableString {
    pub fn new(raw: impl Into<Value>) -> Self {
        Self {
            claim: Claim::from_verdict(vet_string(raw.into())),
        }
    }
}

impl Audited for NullableString {
    fn finish(&self) -> Result<(), Violation> {
        self.claim.finish()
    }
}

impl Presence for NullableString {
    fn is_null(&self) -> bool {
        self.claim.is_null()
    }

    fn is_not_null(&self) -> bool {
        self.claim.is_not_null()
    }
}

impl StringValue for NullableString {
    fn value(&self) -> Result<&str, Violation> {
        self.claim.consume().map(String::as_str)
    }
}

/// Always-present string.
#[derive(Debug)]
pub struct NotNullString {
    vouched: Vouched<String>,
}

impl NotNullString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            vouched: Vouched::new(value.into()),
        }
    }
}

impl Audited for NotNullString {
    fn finish(&self) -> Result<(), Violation> {
        self.vouched.finish()
    }
}

impl StringValue for NotNullString {
    fn value(&self) -> Result<&str, Violation> {
        Ok(self.vouched.consume())
    }
}
