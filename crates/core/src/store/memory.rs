//! Thread-safe in-memory expense store.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use dashmap::DashMap;
use splitledger_shared::types::{ExpenseId, ProjectId};
use splitledger_shared::{AppError, AppResult};
use tracing::debug;

use super::repository::ExpenseRepository;
use super::types::{Expense, NewExpense, Project};

/// Projects and expenses held in memory.
///
/// Every insert is stamped with a sequence number so listings come back in
/// creation order. Expenses are validated on the way in.
#[derive(Debug, Default)]
pub struct InMemoryExpenseStore {
    projects: DashMap<ProjectId, (u64, Project)>,
    expenses: DashMap<ExpenseId, (u64, Expense)>,
    seq: AtomicU64,
}

impl InMemoryExpenseStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the name is blank.
    pub fn create_project(&self, name: impl Into<String>, date: NaiveDate) -> AppResult<Project> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AppError::Validation(
                "Project name cannot be empty".to_string(),
            ));
        }

        let project = Project {
            id: ProjectId::new(),
            name,
            date,
        };
        self.projects
            .insert(project.id, (self.next_seq(), project.clone()));
        debug!(project_id = %project.id, name = %project.name, "project created");
        Ok(project)
    }

    /// Fetches a project.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown id.
    pub fn get_project(&self, id: &ProjectId) -> AppResult<Project> {
        self.projects
            .get(id)
            .map(|entry| entry.1.clone())
            .ok_or_else(|| AppError::NotFound(format!("Project {id}")))
    }

    /// All projects in creation order.
    #[must_use]
    pub fn list_projects(&self) -> Vec<Project> {
        let mut projects: Vec<(u64, Project)> = self
            .projects
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        projects.sort_by_key(|(seq, _)| *seq);
        projects.into_iter().map(|(_, project)| project).collect()
    }

    /// Records a new expense against an existing project.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the project does not exist and
    /// `AppError::Validation` if the expense breaks a business rule.
    pub fn create_expense(&self, input: NewExpense) -> AppResult<Expense> {
        self.check_expense(&input)?;

        let expense = input.into_expense(ExpenseId::new());
        self.expenses
            .insert(expense.id, (self.next_seq(), expense.clone()));
        debug!(
            expense_id = %expense.id,
            project_id = %expense.project_id,
            amount = %expense.amount,
            "expense recorded"
        );
        Ok(expense)
    }

    /// Fetches an expense.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown id.
    pub fn get_expense(&self, id: &ExpenseId) -> AppResult<Expense> {
        self.expenses
            .get(id)
            .map(|entry| entry.1.clone())
            .ok_or_else(|| AppError::NotFound(format!("Expense {id}")))
    }

    /// Expenses in creation order, optionally limited to one project.
    #[must_use]
    pub fn list_expenses(&self, project_id: Option<&ProjectId>) -> Vec<Expense> {
        let mut expenses: Vec<(u64, Expense)> = self
            .expenses
            .iter()
            .filter(|entry| project_id.is_none_or(|id| entry.1.project_id == *id))
            .map(|entry| entry.value().clone())
            .collect();
        expenses.sort_by_key(|(seq, _)| *seq);
        expenses.into_iter().map(|(_, expense)| expense).collect()
    }

    /// Replaces every field of an existing expense, keeping its id and its
    /// place in listings.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the expense or the target project does
    /// not exist and `AppError::Validation` if the new values break a business
    /// rule.
    pub fn update_expense(&self, id: &ExpenseId, input: NewExpense) -> AppResult<Expense> {
        self.check_expense(&input)?;

        let mut entry = self
            .expenses
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Expense {id}")))?;
        entry.1 = input.into_expense(*id);
        debug!(expense_id = %id, "expense updated");
        Ok(entry.1.clone())
    }

    fn check_expense(&self, input: &NewExpense) -> AppResult<()> {
        if !self.projects.contains_key(&input.project_id) {
            return Err(AppError::NotFound(format!("Project {}", input.project_id)));
        }
        input.to_record().validate().map_err(|err| {
            debug!(error_code = err.error_code(), error = %err, "expense rejected");
            AppError::Validation(err.to_string())
        })
    }
}

impl ExpenseRepository for InMemoryExpenseStore {
    fn expenses_for_project(&self, project_id: &ProjectId) -> AppResult<Vec<Expense>> {
        if !self.projects.contains_key(project_id) {
            return Err(AppError::NotFound(format!("Project {project_id}")));
        }
        Ok(self.list_expenses(Some(project_id)))
    }
}
