//! Trait seams shared by every wrapper family.

use crate::violation::Violation;

/// Closing audit over the verify-then-consume protocol.
///
/// Diagnostic only: success is a no-op, failure names the broken rule.
/// Implementations never mutate payload or presence, so auditing is safe
/// to repeat.
pub trait Audited {
    /// Assert the protocol was honored for this value.
    fn finish(&self) -> Result<(), Violation>;
}

/// Presence checks carried only by nullable wrappers.
///
/// Both methods count as verification and may be called any number of
/// times; their answers never disagree.
pub trait Presence: Audited {
    /// True when the payload is absent.
    fn is_null(&self) -> bool;

    /// True when the payload is present.
    fn is_not_null(&self) -> bool;
}

/// Audit a batch of values, stopping at the first violation.
///
/// Takes anything iterable over [`Audited`] references. `Claim` and
/// `Vouched` implement the seam directly, as do the wrapper families built
/// on them, so one batch can close out a whole scope.
///
/// ```
/// use vouch_types::{finish_all, Audited, Claim, Verdict, Vouched};
///
/// let age: Claim<u32> = Claim::from_verdict(Verdict::Valid(34));
/// let nickname: Claim<String> = Claim::from_verdict(Verdict::Invalid);
/// let host = Vouched::new("localhost");
///
/// assert!(age.is_not_null());
/// assert_eq!(age.consume(), Ok(&34));
/// assert!(nickname.is_null());
/// assert_eq!(*host.consume(), "localhost");
///
/// let scope: [&dyn Audited; 3] = [&age, &nickname, &host];
/// assert_eq!(finish_all(scope), Ok(()));
/// ```
pub fn finish_all<'a, I>(values: I) -> Result<(), Violation>
where
    I: IntoIterator<Item = &'a dyn Audited>,
{
    for value in values {
        value.finish()?;
    }
    Ok(())
}
