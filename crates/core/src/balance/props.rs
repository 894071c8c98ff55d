//! Property-based tests for balance aggregation.
//!
//! - Zero-sum: balances of any valid batch sum to zero
//! - Debts never exceed what was spent
//! - Record order only affects rounding noise

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::aggregator::BalanceAggregator;
use crate::expense::ExpenseRecord;

const NAMES: [&str; 6] = ["alice", "bob", "carol", "dave", "erin", "frank"];

/// Strategy to generate positive decimal amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate one valid record over a small group of names.
fn record_strategy() -> impl Strategy<Value = ExpenseRecord> {
    (
        0usize..NAMES.len(),
        positive_amount(),
        prop::collection::vec(0usize..NAMES.len(), 1..=NAMES.len()),
    )
        .prop_map(|(payer, amount, participants)| {
            ExpenseRecord::new(
                NAMES[payer],
                amount,
                participants.into_iter().map(|idx| NAMES[idx]),
            )
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* batch of valid records, the balances SHALL sum to zero
    /// within 1e-6.
    #[test]
    fn prop_balances_sum_to_zero(
        records in prop::collection::vec(record_strategy(), 0..40),
    ) {
        let balances = BalanceAggregator::compute_balances(&records).unwrap();
        let total = balances.total().unwrap();
        prop_assert!(
            total.abs() < Decimal::new(1, 6),
            "sum of balances was {}",
            total
        );
    }

    /// *For any* batch, the total owed by debtors SHALL not exceed the total
    /// spent, up to division noise.
    #[test]
    fn prop_debts_bounded_by_spending(
        records in prop::collection::vec(record_strategy(), 1..40),
    ) {
        let spent: Decimal = records.iter().map(|record| record.amount).sum();
        let balances = BalanceAggregator::compute_balances(&records).unwrap();
        let owed: Decimal = balances
            .iter()
            .map(|(_, balance)| balance)
            .filter(|balance| balance.is_sign_negative())
            .map(|balance| -balance)
            .sum();

        prop_assert!(owed <= spent + Decimal::new(1, 6));
    }

    /// *For any* batch, reordering the batch SHALL not move any balance by
    /// more than rounding noise.
    #[test]
    fn prop_order_does_not_change_balances(
        records in prop::collection::vec(record_strategy(), 1..20),
    ) {
        let forward = BalanceAggregator::compute_balances(&records).unwrap();
        let reversed: Vec<ExpenseRecord> = records.iter().rev().cloned().collect();
        let backward = BalanceAggregator::compute_balances(&reversed).unwrap();

        for (participant, balance) in forward.iter() {
            prop_assert!((balance - backward.get(participant)).abs() < Decimal::new(1, 6));
        }
    }
}
