#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("rent", 10), "rent");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("rent", 4), "rent");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("groceries", 5), "groc…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("rent", 0), "");
    assert_eq!(truncate("", 0), "");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("café crème", 5), "café…");
}

// ── format_money ──────────────────────────────────────────────

#[test]
fn test_format_money_basic() {
    assert_eq!(format_money(dec!(100)), "$100.00");
    assert_eq!(format_money(dec!(12.5)), "$12.50");
}

#[test]
fn test_format_money_thousands() {
    assert_eq!(format_money(dec!(1234567.89)), "$1,234,567.89");
    assert_eq!(format_money(dec!(123456)), "$123,456.00");
    assert_eq!(format_money(dec!(1000)), "$1,000.00");
}

#[test]
fn test_format_money_negative() {
    assert_eq!(format_money(dec!(-60)), "-$60.00");
}

#[test]
fn test_format_money_rounds() {
    assert_eq!(format_money(dec!(0.005)), "$0.01");
    assert_eq!(format_money(dec!(-0.001)), "$0.00");
}

#[test]
fn test_format_money_zero() {
    assert_eq!(format_money(Decimal::ZERO), "$0.00");
}
