//! Algebra chains: operand consumption, link-by-link auditing, and
//! failure ordering across multi-step computations.

use vouch_values::{
    Audited, BooleanValue, NotNullBoolean, NotNullNumber, NullableBoolean, NullableNumber,
    NumberValue, Presence, Violation,
};

#[test]
fn celsius_to_fahrenheit_chain_audits_every_link() {
    let celsius = NullableNumber::new(25);
    assert!(celsius.is_not_null());
    let nine = NotNullNumber::new(9.0).unwrap();
    let five = NotNullNumber::new(5.0).unwrap();
    let offset = NotNullNumber::new(32.0).unwrap();

    let scaled = celsius.multiply_by(&nine).unwrap();
    let ratio = scaled.divided_by(&five).unwrap();
    let fahrenheit = ratio.add(&offset).unwrap();

    assert_eq!(fahrenheit.value(), Ok(77.0));

    // every link was consumed by the next one
    assert_eq!(celsius.finish(), Ok(()));
    assert_eq!(nine.finish(), Ok(()));
    assert_eq!(five.finish(), Ok(()));
    assert_eq!(offset.finish(), Ok(()));
    assert_eq!(scaled.finish(), Ok(()));
    assert_eq!(ratio.finish(), Ok(()));
    assert_eq!(fahrenheit.finish(), Ok(()));
}

#[test]
fn receipt_total_is_within_floating_tolerance() {
    let unit_price = NotNullNumber::new(25.99).unwrap();
    let quantity = NotNullNumber::new(3.0).unwrap();

    let total = unit_price.multiply_by(&quantity).unwrap();
    let amount = total.value().unwrap();
    assert!((amount - 77.97).abs() < 1e-9, "total was {amount}");

    assert_eq!(unit_price.finish(), Ok(()));
    assert_eq!(quantity.finish(), Ok(()));
    assert_eq!(total.finish(), Ok(()));
}

#[test]
fn comparison_results_feed_the_boolean_algebra() {
    let balance = NotNullNumber::new(120.0).unwrap();
    let price = NotNullNumber::new(80.0).unwrap();
    let limit = NotNullNumber::new(200.0).unwrap();
    let price_again = NotNullNumber::new(80.0).unwrap();

    let affordable = balance.greater_or_equal_than(&price).unwrap();
    let within_limit = limit.greater_than(&price_again).unwrap();
    let approved = affordable.and(&within_limit).unwrap();

    assert_eq!(approved.yes(), Ok(true));
    assert_eq!(affordable.finish(), Ok(()));
    assert_eq!(within_limit.finish(), Ok(()));
    assert_eq!(approved.finish(), Ok(()));
}

#[test]
fn chain_aborts_on_an_unverified_link() {
    let verified = NullableNumber::new(10);
    assert!(verified.is_not_null());
    let unverified = NullableNumber::new(2);

    assert_eq!(
        verified.add(&unverified).map(|_| ()),
        Err(Violation::UnverifiedAccess)
    );
    // the receiver had already been consumed when the operand failed
    assert_eq!(verified.finish(), Ok(()));
    // the failed operand never progressed past construction
    assert_eq!(unverified.finish(), Err(Violation::UnauditedVerification));
}

#[test]
fn chain_aborts_on_a_null_link_without_touching_the_operand() {
    let null_link = NullableNumber::new("missing");
    assert!(null_link.is_null());
    let operand = NotNullNumber::new(5.0).unwrap();

    assert_eq!(
        null_link.minus(&operand).map(|_| ()),
        Err(Violation::NullValueAccess)
    );
    assert_eq!(null_link.finish(), Ok(()));
    assert_eq!(operand.finish(), Err(Violation::UnusedPresentValue));
}

#[test]
fn arithmetic_failure_still_consumes_both_operands() {
    let numerator = NullableNumber::new(1);
    assert!(numerator.is_not_null());
    let bystander = NotNullBoolean::new(false); // unrelated value stays independent
    let denominator = NotNullNumber::new(0.0).unwrap();

    assert_eq!(
        numerator.divided_by(&denominator).map(|_| ()),
        Err(Violation::InvalidConstruction(
            vouch_values::InvalidReason::NotFinite
        ))
    );
    assert_eq!(numerator.finish(), Ok(()));
    assert_eq!(denominator.finish(), Ok(()));
    // instances are never mutated by operations on other instances
    assert_eq!(bystander.finish(), Err(Violation::UnusedPresentValue));
}

#[test]
fn boolean_chain_consumes_every_operand_without_short_circuit() {
    let first = NullableBoolean::new(true);
    assert!(first.is_not_null());
    let second = NotNullBoolean::new(false);
    let third = NotNullBoolean::new(true);

    let either = first.or(&second).unwrap();
    let gated = either.and(&third).unwrap();
    assert_eq!(gated.condition(), Ok(true));

    // `or` with a true receiver still consumed the second operand
    assert_eq!(first.finish(), Ok(()));
    assert_eq!(second.finish(), Ok(()));
    assert_eq!(third.finish(), Ok(()));
    assert_eq!(either.finish(), Ok(()));
    assert_eq!(gated.finish(), Ok(()));
}

#[test]
fn mixed_family_workflow_end_to_end() {
    let wants_insurance = NullableBoolean::new(true);
    let cart_total = NullableNumber::new(149.5);
    let surcharge = NotNullNumber::new(12.25).unwrap();
    let threshold = NotNullNumber::new(100.0).unwrap();

    assert!(wants_insurance.is_not_null());
    assert!(cart_total.is_not_null());

    let grand_total = cart_total.add(&surcharge).unwrap();
    let over_threshold = grand_total.greater_than(&threshold).unwrap();
    let billed_extra = wants_insurance.and(&over_threshold).unwrap();

    assert_eq!(billed_extra.yes(), Ok(true));
    assert_eq!(wants_insurance.finish(), Ok(()));
    assert_eq!(cart_total.finish(), Ok(()));
    assert_eq!(surcharge.finish(), Ok(()));
    assert_eq!(threshold.finish(), Ok(()));
    assert_eq!(grand_total.finish(), Ok(()));
    assert_eq!(over_threshold.finish(), Ok(()));
    assert_eq!(billed_extra.finish(), Ok(()));
}
