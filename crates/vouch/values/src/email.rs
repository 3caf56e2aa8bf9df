//! Email family: strings gated by a fixed ASCII address pattern.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;
use vouch_types::{Audited, Claim, InvalidReason, Presence, Verdict, Violation, Vouched};

use crate::json_kind;

/// Local part: dot-separated atoms over the printable ASCII symbol set;
/// the atom grammar itself rules out leading, trailing and consecutive
/// dots. Domain: dot-separated DNS labels, each alphanumeric with internal
/// hyphens, 1-63 chars.
const ADDRESS_PATTERN: &str = r"^[A-Za-z0-9!$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$";

fn address_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(ADDRESS_PATTERN).expect("address pattern is valid"))
}

fn well_formed(address: &str) -> bool {
    address_pattern().is_match(address)
}

fn vet_email(raw: Value) -> Verdict<String> {
    match raw {
        Value::String(address) if well_formed(&address) => Verdict::Valid(address),
        Value::String(_) => {
            debug!("Email claim settling absent: string does not match the address format");
            Verdict::Invalid
        }
        other => {
            debug!(
                kind = json_kind(&other),
                "Email claim settling absent: input is not a string"
            );
            Verdict::Invalid
        }
    }
}

/// Consuming read surface of email wrappers. No algebra.
pub trait EmailValue: Audited {
    /// Consume the address payload.
    fn value(&self) -> Result<&str, Violation>;
}

/// Possibly-absent email address built from untyped input.
#[derive(Debug)]
pub struct NullableEmail {
    claim: Claim<String>,
}

impl NullableEmail {
    pub fn new(raw: impl Into<Value>) -> Self {
        Self {
            claim: Claim::from_verdict(vet_email(raw.into())),
        }
    }
}

impl Audited for NullableEmail {
    fn finish(&self) -> Result<(), Violation> {
        self.claim.finish()
    }
}

impl Presence for NullableEmail {
    fn is_null(&self) -> bool {
        self.claim.is_null()
    }

    fn is_not_null(&self) -> bool {
        self.claim.is_not_null()
    }
}

impl EmailValue for NullableEmail {
    fn value(&self) -> Result<&str, Violation> {
        self.claim.consume().map(String::as_str)
    }
}

/// Always-present email address.
#[derive(Debug)]
pub struct NotNullEmail {
    vouched: Vouched<String>,
}

impl NotNullEmail {
    /// Rejects anything outside the address format with
    /// [`Violation::InvalidConstruction`] carrying the format reason.
    pub fn new(address: impl Into<String>) -> Result<Self, Violation> {
        let address = address.into();
        if well_formed(&address) {
            Ok(Self {
                vouched: Vouched::new(address),
            })
        } else {
            Err(Violation::InvalidConstruction(InvalidReason::MalformedEmail))
        }
    }
}

impl Audited for NotNullEmail {
    fn finish(&self) -> Result<(), Violation> {
        self.vouched.finish()
    }
}

impl EmailValue for NotNullEmail {
    fn value(&self) -> Result<&str, Violation> {
        Ok(self.vouched.consume())
    }
}
