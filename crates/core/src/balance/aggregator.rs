//! Ledger aggregation: expense records in, net balances out.

use rust_decimal::Decimal;

use super::error::BalanceOverflow;
use super::types::Balances;
use crate::expense::ExpenseRecord;
use crate::settlement::SettlementError;

/// Derives each participant's net position from a batch of expense records.
///
/// Pure business logic with no state between calls.
pub struct BalanceAggregator;

impl BalanceAggregator {
    /// Computes net balances for a batch of records.
    ///
    /// Every record is validated before any arithmetic happens. For each record
    /// the payer is credited the full amount and every distinct participant is
    /// debited an equal share, so a payer who also participates nets
    /// `amount - share`.
    ///
    /// # Errors
    ///
    /// Returns `SettlementError::InvalidExpense` for the first invalid record
    /// and `SettlementError::AmountOverflow` if a balance leaves the `Decimal`
    /// range.
    pub fn compute_balances(records: &[ExpenseRecord]) -> Result<Balances, SettlementError> {
        Self::validate_batch(records)?;

        let mut balances = Balances::new();
        for (index, record) in records.iter().enumerate() {
            Self::apply(&mut balances, record)
                .map_err(|source| SettlementError::AmountOverflow { index, source })?;
        }
        Ok(balances)
    }

    /// Validates every record, reporting the first failure with its position.
    ///
    /// # Errors
    ///
    /// Returns `SettlementError::InvalidExpense` for the first invalid record.
    pub fn validate_batch(records: &[ExpenseRecord]) -> Result<(), SettlementError> {
        records
            .iter()
            .enumerate()
            .try_for_each(|(index, record)| {
                record
                    .validate()
                    .map_err(|reason| SettlementError::InvalidExpense { index, reason })
            })
    }

    fn apply(balances: &mut Balances, record: &ExpenseRecord) -> Result<(), BalanceOverflow> {
        let participants = record.distinct_participants();
        let share = record.amount / Decimal::from(participants.len());

        balances.credit(record.payer_identity(), record.amount)?;
        for participant in participants {
            balances.debit(participant, share)?;
        }
        Ok(())
    }
}
