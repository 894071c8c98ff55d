//! Project settlement service.
//!
//! Loads a project's expenses through an `ExpenseRepository`, aggregates them
//! and plans the transfers. The repository is passed in, never global.

use splitledger_shared::{AppError, AppResult};
use splitledger_shared::types::ProjectId;
use tracing::{info, instrument, warn};

use super::error::SettlementError;
use super::planner::SettlementPlanner;
use super::types::ProjectSettlement;
use crate::balance::{BalanceAggregator, Balances};
use crate::expense::ExpenseRecord;
use crate::store::ExpenseRepository;

/// Computes balances and settlement reports for stored projects.
#[derive(Debug, Clone)]
pub struct SettlementService<R> {
    repository: R,
    planner: SettlementPlanner,
}

impl<R: ExpenseRepository> SettlementService<R> {
    /// Creates a service reading from `repository`.
    #[must_use]
    pub fn new(repository: R, planner: SettlementPlanner) -> Self {
        Self {
            repository,
            planner,
        }
    }

    /// The repository the service reads from.
    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// The planner used for settlement.
    #[must_use]
    pub fn planner(&self) -> &SettlementPlanner {
        &self.planner
    }

    /// Exact net balances for a project.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown project and
    /// `AppError::Validation` if a stored expense is invalid.
    #[instrument(skip_all, fields(project_id = %project_id))]
    pub fn balances(&self, project_id: &ProjectId) -> AppResult<Balances> {
        let records = self.load_records(project_id)?;
        BalanceAggregator::compute_balances(&records).map_err(rejected)
    }

    /// Balances rounded for display, plus the transfers that settle them.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown project,
    /// `AppError::Validation` if a stored expense is invalid, and
    /// `AppError::Internal` if the plan cannot zero every balance.
    #[instrument(skip_all, fields(project_id = %project_id))]
    pub fn settle(&self, project_id: &ProjectId) -> AppResult<ProjectSettlement> {
        let records = self.load_records(project_id)?;
        let balances = BalanceAggregator::compute_balances(&records).map_err(rejected)?;
        let settlement_plan = self.planner.plan(&balances).map_err(rejected)?;

        info!(
            participants = balances.len(),
            transfers = settlement_plan.len(),
            "project settled"
        );

        Ok(ProjectSettlement {
            balances: balances.rounded(self.planner.display_scale()),
            settlement_plan,
        })
    }

    fn load_records(&self, project_id: &ProjectId) -> AppResult<Vec<ExpenseRecord>> {
        let expenses = self.repository.expenses_for_project(project_id)?;
        info!(expenses = expenses.len(), "loaded project expenses");
        Ok(expenses.iter().map(|expense| expense.to_record()).collect())
    }
}

fn rejected(err: SettlementError) -> AppError {
    warn!(error_code = err.error_code(), error = %err, "settlement rejected");
    err.into()
}
