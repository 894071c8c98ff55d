//! Settlement output types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::balance::{BalanceOverflow, Balances};

/// A single payment from a debtor to a creditor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Debtor who pays.
    pub from: String,
    /// Creditor who receives.
    pub to: String,
    /// Amount paid, rounded to the display scale. Always positive.
    pub amount: Decimal,
}

impl Transfer {
    /// Creates a new transfer.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: Decimal) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

impl std::fmt::Display for Transfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} pays {} {}", self.from, self.to, self.amount)
    }
}

/// Ordered list of transfers that settles a balance table.
///
/// The order is the order in which the planner generated the transfers and is
/// stable for a given input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettlementPlan(Vec<Transfer>);

impl SettlementPlan {
    /// Wraps an already ordered list of transfers.
    #[must_use]
    pub fn new(transfers: Vec<Transfer>) -> Self {
        Self(transfers)
    }

    /// The transfers in generation order.
    #[must_use]
    pub fn transfers(&self) -> &[Transfer] {
        &self.0
    }

    /// Iterates transfers in generation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Transfer> {
        self.0.iter()
    }

    /// Number of transfers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing needs to be paid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total paid by `participant` across the plan.
    #[must_use]
    pub fn total_paid_by(&self, participant: &str) -> Decimal {
        self.0
            .iter()
            .filter(|transfer| transfer.from == participant)
            .map(|transfer| transfer.amount)
            .sum()
    }

    /// Total received by `participant` across the plan.
    #[must_use]
    pub fn total_received_by(&self, participant: &str) -> Decimal {
        self.0
            .iter()
            .filter(|transfer| transfer.to == participant)
            .map(|transfer| transfer.amount)
            .sum()
    }

    /// Applies every transfer to `balances` and returns what is left.
    ///
    /// Paying reduces the payer's debt and the receiver's credit, so a correct
    /// plan leaves every balance within tolerance of zero.
    ///
    /// # Errors
    ///
    /// Returns `BalanceOverflow` if a transfer pushes a balance out of range.
    pub fn replay(&self, balances: &Balances) -> Result<Balances, BalanceOverflow> {
        let mut residual = balances.clone();
        for transfer in &self.0 {
            residual.credit(&transfer.from, transfer.amount)?;
            residual.debit(&transfer.to, transfer.amount)?;
        }
        Ok(residual)
    }

    /// Consumes the plan, returning the transfers.
    #[must_use]
    pub fn into_inner(self) -> Vec<Transfer> {
        self.0
    }
}

impl<'a> IntoIterator for &'a SettlementPlan {
    type Item = &'a Transfer;
    type IntoIter = std::slice::Iter<'a, Transfer>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Settlement report for one project: who stands where, and who pays whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettlement {
    /// Net balance per participant, rounded to the display scale.
    pub balances: Balances,
    /// Transfers that settle those balances.
    pub settlement_plan: SettlementPlan,
}
