//! Integration tests for money types

use core_kernel::{Currency, Money, MoneyError};
use rust_decimal_macros::dec;

#[test]
fn money_display_uses_currency_symbol() {
    let m = Money::new(dec!(1234.50), Currency::USD);
    assert_eq!(m.to_string(), "$ 1234.50");

    let jpy = Money::new(dec!(500), Currency::JPY);
    assert_eq!(jpy.to_string(), "¥ 500");
}

#[test]
fn money_jpy_has_no_minor_units() {
    let m = Money::new(dec!(100.49), Currency::JPY);
    assert_eq!(m.amount(), dec!(100));
}

#[test]
fn money_negation() {
    let m = Money::new(dec!(25.00), Currency::CNY);
    assert_eq!((-m).amount(), dec!(-25.00));
    assert!((-m).is_negative());
}

#[test]
fn money_abs() {
    let m = Money::new(dec!(-42.10), Currency::CNY);
    assert_eq!(m.abs().amount(), dec!(42.10));
}

#[test]
fn money_checked_ops_reject_mixed_currencies() {
    let a = Money::new(dec!(10), Currency::USD);
    let b = Money::new(dec!(10), Currency::SGD);

    assert!(matches!(
        a.checked_sub(&b),
        Err(MoneyError::CurrencyMismatch(_, _))
    ));
    assert!(matches!(
        a.min(&b),
        Err(MoneyError::CurrencyMismatch(_, _))
    ));
}

#[test]
fn money_serde_round_trip() {
    let m = Money::new(dec!(800.00), Currency::CNY);
    let json = serde_json::to_string(&m).unwrap();
    let back: Money = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);
}

#[test]
fn currency_codes_are_stable() {
    assert_eq!(Currency::CNY.code(), "CNY");
    assert_eq!(Currency::USD.decimal_places(), 2);
    assert_eq!(Currency::JPY.decimal_places(), 0);
}
