//! Greedy debt settlement.
//!
//! Matches the largest debtor against the largest creditor until one side runs
//! out. This is the usual greedy approximation: it bounds the plan to
//! `debtors + creditors - 1` transfers but does not search for the true
//! minimum number of transfers.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use splitledger_shared::config::SettlementConfig;
use splitledger_shared::types::{DISPLAY_SCALE, SETTLEMENT_TOLERANCE, is_negligible, round_for_display};
use tracing::{debug, warn};

use super::error::SettlementError;
use super::types::{SettlementPlan, Transfer};
use crate::balance::Balances;

/// A participant's running balance while the plan is being built.
#[derive(Debug)]
struct Position<'a> {
    participant: &'a str,
    remaining: Decimal,
}

/// Builds settlement plans from balance tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementPlanner {
    tolerance: Decimal,
    display_scale: u32,
}

impl Default for SettlementPlanner {
    fn default() -> Self {
        Self::new(SETTLEMENT_TOLERANCE, DISPLAY_SCALE)
    }
}

impl SettlementPlanner {
    /// Creates a planner.
    ///
    /// `tolerance` is the largest leftover accepted once one side of the plan
    /// runs out; `display_scale` is the number of fractional digits kept in
    /// emitted transfer amounts.
    #[must_use]
    pub const fn new(tolerance: Decimal, display_scale: u32) -> Self {
        Self {
            tolerance,
            display_scale,
        }
    }

    /// Creates a planner from the `[settlement]` configuration section.
    #[must_use]
    pub fn from_config(config: &SettlementConfig) -> Self {
        Self::new(config.tolerance, config.display_scale)
    }

    /// Settlement tolerance.
    #[must_use]
    pub const fn tolerance(&self) -> Decimal {
        self.tolerance
    }

    /// Fractional digits kept in transfer amounts.
    #[must_use]
    pub const fn display_scale(&self) -> u32 {
        self.display_scale
    }

    /// Produces the transfers that bring every balance back to zero.
    ///
    /// 1. Split participants into debtors and creditors, dropping exact zeros
    /// 2. Order debtors most negative first and creditors most positive first,
    ///    breaking ties by identity
    /// 3. Repeatedly pay `min(debt, credit)` from the current debtor to the
    ///    current creditor, moving past whoever reaches exactly zero
    ///
    /// Emitted amounts are rounded to the display scale, but the running
    /// balances are reduced by the exact amount so rounding never compounds
    /// and no sub-cent remainder is dropped. A payment that rounds to zero is
    /// booked but not emitted.
    ///
    /// # Errors
    ///
    /// Returns `SettlementError::UnbalancedResult` if one side is exhausted
    /// while the other still holds a balance at or above the tolerance, which
    /// only happens when the balances do not sum to zero.
    pub fn plan(&self, balances: &Balances) -> Result<SettlementPlan, SettlementError> {
        let (mut debtors, mut creditors) = Self::partition(balances);

        debtors.sort_by(|a, b| {
            a.remaining
                .cmp(&b.remaining)
                .then_with(|| a.participant.cmp(b.participant))
        });
        creditors.sort_by(|a, b| {
            b.remaining
                .cmp(&a.remaining)
                .then_with(|| a.participant.cmp(b.participant))
        });

        let mut transfers = Vec::with_capacity((debtors.len() + creditors.len()).saturating_sub(1));
        let (mut i, mut j) = (0, 0);

        while i < debtors.len() && j < creditors.len() {
            let debtor = &mut debtors[i];
            let creditor = &mut creditors[j];

            let debt = -debtor.remaining;
            let credit = creditor.remaining;
            let amount = debt.min(credit);

            let shown = round_for_display(amount, self.display_scale);
            if shown > Decimal::ZERO {
                transfers.push(Transfer::new(debtor.participant, creditor.participant, shown));
            }

            debtor.remaining += amount;
            creditor.remaining -= amount;

            // `amount` is one side's whole remainder, so at least one reaches zero
            if debtor.remaining.is_zero() {
                i += 1;
            }
            if creditor.remaining.is_zero() {
                j += 1;
            }
        }

        if let Some(left) = debtors[i..]
            .iter()
            .chain(&creditors[j..])
            .find(|position| !is_negligible(position.remaining, self.tolerance))
        {
            warn!(
                participant = left.participant,
                remaining = %left.remaining,
                "settlement ended with an unmatched balance"
            );
            return Err(SettlementError::UnbalancedResult {
                participant: left.participant.to_owned(),
                remaining: left.remaining,
            });
        }

        debug!(
            debtors = debtors.len(),
            creditors = creditors.len(),
            transfers = transfers.len(),
            "settlement plan built"
        );

        Ok(SettlementPlan::new(transfers))
    }

    fn partition<'a>(balances: &'a Balances) -> (Vec<Position<'a>>, Vec<Position<'a>>) {
        let mut debtors = Vec::new();
        let mut creditors = Vec::new();

        for (participant, balance) in balances.iter() {
            let position = Position {
                participant,
                remaining: balance,
            };
            match balance.cmp(&Decimal::ZERO) {
                Ordering::Less => debtors.push(position),
                Ordering::Greater => creditors.push(position),
                Ordering::Equal => {}
            }
        }

        (debtors, creditors)
    }
}
