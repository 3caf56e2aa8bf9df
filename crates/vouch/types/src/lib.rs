//! Verify-then-consume discipline core.
//!
//! Two generic value cores enforce an affine-use protocol on scalar
//! payloads: [`Claim`] for values that may be absent and must be checked
//! before any read, [`Vouched`] for values that are present by construction
//! but whose use is still tracked. Both end their life under the closing
//! audit [`Audited::finish`], which reports protocol breaches as
//! [`Violation`] values. Concrete wrapper families live in `vouch-values`.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

mod audit;
mod claim;
mod violation;
mod vouched;

pub use audit::*;
pub use claim::*;
pub use violation::*;
pub use vouched::*;
