//! Scalar wrapper families under the verify-then-consume discipline.
//!
//! Six families (boolean, number, string, email, UUID, time), each pairing
//! a nullable wrapper built from untyped input with an always-present
//! counterpart. Nullable construction never fails: input that misses the
//! family gate settles absent, and the presence checks surface it. Reads
//! go through per-family traits so the algebra (`and`/`or`, arithmetic,
//! comparisons) takes nullable and always-present operands alike, consuming
//! each operand it touches and returning fresh always-present results.
//!
//! ```
//! use vouch_values::{NullableNumber, NotNullNumber, NumberValue, Audited, Presence};
//!
//! # fn main() -> Result<(), vouch_values::Violation> {
//! let quantity = NullableNumber::new(3);
//! assert!(quantity.is_not_null());
//! let price = NotNullNumber::new(25.99)?;
//! let total = price.multiply_by(&quantity)?;
//! assert!((total.value()? - 77.97).abs() < 1e-9);
//! price.finish()?;
//! quantity.finish()?;
//! total.finish()?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

mod boolean;
mod email;
mod ids;
mod number;
mod string;
mod time;

pub use boolean::*;
pub use email::*;
pub use ids::*;
pub use number::*;
pub use string::*;
pub use time::*;

pub use vouch_types::{
    finish_all, Audited, Claim, ClaimPhase, InvalidReason, Presence, UsePhase, Verdict, Violation,
    Vouched,
};

/// Names a JSON value's kind for rejection diagnostics.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
