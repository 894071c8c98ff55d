//! Read access to stored expenses.

use std::sync::Arc;

use splitledger_shared::AppResult;
use splitledger_shared::types::ProjectId;

use super::types::Expense;

/// Source of expense records for settlement.
///
/// Implementations decide how expenses are stored; the settlement service only
/// needs every expense of one project.
pub trait ExpenseRepository {
    /// All expenses recorded for `project_id`, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the project does not exist.
    fn expenses_for_project(&self, project_id: &ProjectId) -> AppResult<Vec<Expense>>;
}

impl<T: ExpenseRepository + ?Sized> ExpenseRepository for &T {
    fn expenses_for_project(&self, project_id: &ProjectId) -> AppResult<Vec<Expense>> {
        (**self).expenses_for_project(project_id)
    }
}

impl<T: ExpenseRepository + ?Sized> ExpenseRepository for Arc<T> {
    fn expenses_for_project(&self, project_id: &ProjectId) -> AppResult<Vec<Expense>> {
        (**self).expenses_for_project(project_id)
    }
}
