//! UUID family: RFC 4122 v4/v5 strings plus a fresh-generation variant.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;
use vouch_types::{Audited, Claim, Presence, Verdict, Violation, Vouched};

use crate::json_kind;

/// 8-4-4-4-12 hex layout, version nibble restricted to 4 or 5, variant
/// nibble in {8, 9, a, b}, case-insensitive.
const UUID_PATTERN: &str =
    r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[45][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";

fn uuid_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(UUID_PATTERN).expect("uuid pattern is valid"))
}

fn vet_uuid(raw: Value) -> Verdict<String> {
    match raw {
        Value::String(id) if uuid_pattern().is_match(&id) => Verdict::Valid(id),
        Value::String(_) => {
            debug!("Uuid claim settling absent: string is not an RFC 4122 v4/v5 identifier");
            Verdict::Invalid
        }
        other => {
            debug!(
                kind = json_kind(&other),
                "Uuid claim settling absent: input is not a string"
            );
            Verdict::Invalid
        }
    }
}

/// Consuming read surface of UUID wrappers. No algebra.
pub trait UuidValue: Audited {
    /// Consume the identifier payload.
    fn value(&self) -> Result<&str, Violation>;
}

/// Possibly-absent UUID built from untyped input.
///
/// Accepted strings are kept verbatim; validation is case-insensitive but
/// never rewrites case or layout.
#[derive(Debug)]
pub struct NullableUuid {
    claim: Claim<String>,
}

impl NullableUuid {
    pub fn new(raw: impl Into<Value>) -> Self {
        Self {
            claim: Claim::from_verdict(vet_uuid(raw.into())),
        }
    }
}

impl Audited for NullableUuid {
    fn finish(&self) -> Result<(), Violation> {
        self.claim.finish()
    }
}

impl Presence for NullableUuid {
    fn is_null(&self) -> bool {
        self.claim.is_null()
    }

    fn is_not_null(&self) -> bool {
        self.claim.is_not_null()
    }
}

impl UuidValue for NullableUuid {
    fn value(&self) -> Result<&str, Violation> {
        self.claim.consume().map(String::as_str)
    }
}

/// Freshly generated version-4 UUID; no input, always present, use still
/// audited. Randomness comes from the operating system via the `uuid`
/// crate.
#[derive(Debug)]
pub struct FreshUuid {
    vouched: Vouched<String>,
}

impl FreshUuid {
    pub fn new() -> Self {
        Self {
            vouched: Vouched::new(Uuid::new_v4().to_string()),
        }
    }
}

impl Default for FreshUuid {
    fn default() -> Self {
        Self::new()
    }
}

impl Audited for FreshUuid {
    fn finish(&self) -> Result<(), Violation> {
        self.vouched.finish()
    }
}

impl UuidValue for FreshUuid {
    fn value(&self) -> Result<&str, Violation> {
        Ok(self.vouched.consume())
    }
}
