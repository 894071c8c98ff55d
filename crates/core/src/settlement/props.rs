//! Property-based tests for the settlement planner.
//!
//! - Replay: applying the plan leaves every balance within tolerance of zero
//! - Bound: at most `debtors + creditors - 1` transfers
//! - Positivity: every transfer moves a positive, display-scaled amount
//! - Conservation: each debtor pays what they owed, within tolerance
//!
//! Most properties use batches whose amounts split into whole cents, so the
//! only rounding left is the planner's own. One property runs on arbitrary
//! amounts to cover fractional-cent balances.

use proptest::prelude::*;
use rust_decimal::Decimal;
use splitledger_shared::types::SETTLEMENT_TOLERANCE;

use super::planner::SettlementPlanner;
use crate::balance::{BalanceAggregator, Balances};
use crate::expense::ExpenseRecord;

const NAMES: [&str; 8] = ["ana", "ben", "cy", "dee", "eli", "fay", "gus", "hal"];

/// Strategy to generate positive decimal amounts (0.01 to 5,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..500_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn participants_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..NAMES.len(), 1..=NAMES.len())
}

fn record(payer: usize, amount: Decimal, participants: Vec<usize>) -> ExpenseRecord {
    ExpenseRecord::new(NAMES[payer], amount, participants.into_iter().map(|idx| NAMES[idx]))
}

/// Strategy for batches where every share is a whole number of cents.
fn even_records_strategy() -> impl Strategy<Value = Vec<ExpenseRecord>> {
    prop::collection::vec(
        (0usize..NAMES.len(), 1i64..100_000i64, participants_strategy()).prop_map(
            |(payer, cents_per_share, participants)| {
                let record = record(payer, Decimal::ZERO, participants);
                let shares = i64::try_from(record.distinct_participants().len()).unwrap_or(1);
                ExpenseRecord {
                    amount: Decimal::new(cents_per_share * shares, 2),
                    ..record
                }
            },
        ),
        0..30,
    )
}

/// Strategy for batches with arbitrary amounts.
fn records_strategy() -> impl Strategy<Value = Vec<ExpenseRecord>> {
    prop::collection::vec(
        (0usize..NAMES.len(), positive_amount(), participants_strategy())
            .prop_map(|(payer, amount, participants)| record(payer, amount, participants)),
        0..30,
    )
}

fn count_sides(balances: &Balances) -> (usize, usize) {
    let debtors = balances.iter().filter(|(_, b)| *b < Decimal::ZERO).count();
    let creditors = balances.iter().filter(|(_, b)| *b > Decimal::ZERO).count();
    (debtors, creditors)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* valid batch, replaying the plan SHALL leave every balance
    /// within a cent of zero.
    #[test]
    fn prop_replay_settles_everyone(records in even_records_strategy()) {
        let balances = BalanceAggregator::compute_balances(&records).unwrap();
        let plan = SettlementPlanner::default().plan(&balances).unwrap();

        let residual = plan.replay(&balances).unwrap();
        for (participant, balance) in residual.iter() {
            prop_assert!(
                balance.abs() < SETTLEMENT_TOLERANCE,
                "{} left with {}",
                participant,
                balance
            );
        }
    }

    /// *For any* valid batch, the plan SHALL hold at most
    /// `debtors + creditors - 1` transfers.
    #[test]
    fn prop_transfer_count_bound(records in even_records_strategy()) {
        let balances = BalanceAggregator::compute_balances(&records).unwrap();
        let plan = SettlementPlanner::default().plan(&balances).unwrap();

        let (debtors, creditors) = count_sides(&balances);
        prop_assert!(plan.len() <= (debtors + creditors).saturating_sub(1));
    }

    /// *For any* batch, planning SHALL succeed and every transfer SHALL be
    /// positive, carry two fractional digits and flow from a debtor to a
    /// creditor.
    #[test]
    fn prop_transfers_positive_and_directed(records in records_strategy()) {
        let balances = BalanceAggregator::compute_balances(&records).unwrap();
        let plan = SettlementPlanner::default().plan(&balances).unwrap();

        let (debtors, creditors) = count_sides(&balances);
        prop_assert!(plan.len() <= (debtors + creditors).saturating_sub(1));
        for transfer in &plan {
            prop_assert!(transfer.amount > Decimal::ZERO);
            prop_assert_eq!(transfer.amount.scale(), 2);
            prop_assert!(balances.get(&transfer.from) < Decimal::ZERO);
            prop_assert!(balances.get(&transfer.to) > Decimal::ZERO);
            prop_assert_ne!(&transfer.from, &transfer.to);
        }
    }

    /// *For any* valid batch, the total a debtor pays SHALL match their debt
    /// within a cent.
    #[test]
    fn prop_debtors_pay_what_they_owe(records in even_records_strategy()) {
        let balances = BalanceAggregator::compute_balances(&records).unwrap();
        let plan = SettlementPlanner::default().plan(&balances).unwrap();

        for (participant, balance) in balances.iter().filter(|(_, b)| b.is_sign_negative()) {
            let paid = plan.total_paid_by(participant);
            prop_assert!(
                (paid + balance).abs() < SETTLEMENT_TOLERANCE,
                "{} owed {} but paid {}",
                participant,
                -balance,
                paid
            );
        }
    }

    /// *For any* balance table, planning twice SHALL give the same result.
    #[test]
    fn prop_plan_is_deterministic(records in records_strategy()) {
        let balances = BalanceAggregator::compute_balances(&records).unwrap();
        let planner = SettlementPlanner::default();

        prop_assert_eq!(planner.plan(&balances), planner.plan(&balances));
    }
}
