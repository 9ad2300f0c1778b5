//! Property-based tests for raw/decimal amount conversions
//!
//! These tests verify conversion invariants that must hold for all inputs,
//! not just specific test cases.

use bridge_core::amount;
use bridge_core::Error;
use proptest::prelude::*;
use rust_decimal::Decimal;

// ============================================================================
// Round-trip Invariants
// ============================================================================

proptest! {
    /// Property: raw -> decimal -> raw is lossless for any chain-plausible
    /// decimal count
    #[test]
    fn round_trip_preserves_raw(
        raw in any::<u64>(),
        decimals in 0u32..=18,
    ) {
        let amount = amount::from_raw(u128::from(raw), decimals).unwrap();
        let restored = amount::to_raw(amount, decimals).unwrap();

        prop_assert_eq!(restored, u128::from(raw));
    }

    /// Property: the decimal carries the token's decimals as its scale, even
    /// for raw values with trailing zeros
    #[test]
    fn scale_matches_decimals(
        raw in any::<u64>(),
        decimals in 0u32..=18,
    ) {
        let amount = amount::from_raw(u128::from(raw), decimals).unwrap();

        prop_assert_eq!(amount.scale(), decimals);
    }

    /// Property: the converted value equals raw / 10^decimals exactly
    #[test]
    fn value_matches_raw_over_ten_pow(
        raw in any::<u32>(),
        decimals in 0u32..=9,
    ) {
        let amount = amount::from_raw(u128::from(raw), decimals).unwrap();
        let unscaled = amount
            .checked_mul(Decimal::from(10u64.pow(decimals)))
            .unwrap();

        prop_assert_eq!(unscaled, Decimal::from(raw));
    }
}

// ============================================================================
// Ordering Invariants
// ============================================================================

proptest! {
    /// Property: conversion preserves the ordering of raw amounts
    #[test]
    fn conversion_preserves_order(
        raw_a in any::<u64>(),
        raw_b in any::<u64>(),
        decimals in 0u32..=18,
    ) {
        let a = amount::from_raw(u128::from(raw_a), decimals).unwrap();
        let b = amount::from_raw(u128::from(raw_b), decimals).unwrap();

        prop_assert_eq!(raw_a <= raw_b, a <= b);
    }

    /// Property: on-chain amounts are never negative after conversion
    #[test]
    fn conversion_never_negative(
        raw in any::<u64>(),
        decimals in 0u32..=18,
    ) {
        let amount = amount::from_raw(u128::from(raw), decimals).unwrap();

        prop_assert!(amount >= Decimal::ZERO);
    }
}

// ============================================================================
// Rejection Invariants
// ============================================================================

proptest! {
    /// Property: negative amounts never convert to a raw value
    #[test]
    fn negative_amounts_rejected(
        units in 1i64..1_000_000_000i64,
        decimals in 0u32..=18,
    ) {
        let amount = Decimal::from(-units);
        let result = amount::to_raw(amount, decimals);

        prop_assert!(
            matches!(result, Err(Error::AmountNegative { .. })),
            "want AmountNegative, got {:?}",
            result
        );
    }

    /// Property: an amount with one more significant fractional digit than
    /// the token allows is rejected instead of rounded
    #[test]
    fn sub_decimal_precision_rejected(
        raw in 0u64..1_000_000_000_000u64,
        extra_digit in 1u64..=9,
        decimals in 0u32..=17,
    ) {
        // One digit finer than the target scale, guaranteed non-zero.
        let fine = amount::from_raw(
            u128::from(raw * 10 + extra_digit),
            decimals + 1,
        )
        .unwrap();
        let result = amount::to_raw(fine, decimals);

        prop_assert!(
            matches!(result, Err(Error::PrecisionLoss { .. })),
            "want PrecisionLoss, got {:?}",
            result
        );
    }

    /// Property: decimal counts beyond the representable range fail fast
    #[test]
    fn excess_decimals_rejected(
        raw in any::<u64>(),
        decimals in 29u32..=100,
    ) {
        let result = amount::from_raw(u128::from(raw), decimals);

        prop_assert!(
            matches!(result, Err(Error::AmountOverflow { .. })),
            "want AmountOverflow, got {:?}",
            result
        );
    }
}
