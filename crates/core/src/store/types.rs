//! Stored project and expense types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::{ExpenseId, ProjectId};

use crate::expense::ExpenseRecord;

/// A group of people sharing expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project ID.
    pub id: ProjectId,
    /// Display name.
    pub name: String,
    /// Date the project starts.
    pub date: NaiveDate,
}

/// An expense stored against a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Date the expense was incurred.
    pub date: NaiveDate,
    /// Free-form category (food, transport, ...).
    pub category: String,
    /// What was bought.
    pub item: String,
    /// Amount paid.
    pub amount: Decimal,
    /// Participant who paid.
    pub paid_by: String,
    /// Participants sharing the cost.
    pub paid_for: Vec<String>,
}

impl Expense {
    /// The part of the expense the balance aggregator needs.
    #[must_use]
    pub fn to_record(&self) -> ExpenseRecord {
        ExpenseRecord::new(self.paid_by.clone(), self.amount, self.paid_for.iter().cloned())
    }
}

/// Input for creating or replacing an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    /// Owning project.
    pub project_id: ProjectId,
    /// Date the expense was incurred.
    pub date: NaiveDate,
    /// Free-form category.
    pub category: String,
    /// What was bought.
    pub item: String,
    /// Amount paid.
    pub amount: Decimal,
    /// Participant who paid.
    pub paid_by: String,
    /// Participants sharing the cost.
    pub paid_for: Vec<String>,
}

impl NewExpense {
    /// The part of the expense the balance aggregator needs.
    #[must_use]
    pub fn to_record(&self) -> ExpenseRecord {
        ExpenseRecord::new(self.paid_by.clone(), self.amount, self.paid_for.iter().cloned())
    }

    pub(crate) fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            project_id: self.project_id,
            date: self.date,
            category: self.category,
            item: self.item,
            amount: self.amount,
            paid_by: self.paid_by,
            paid_for: self.paid_for,
        }
    }
}
