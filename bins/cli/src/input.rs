//! Project export files.

use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use splitledger_core::{InMemoryExpenseStore, NewExpense, Project};
use tracing::debug;

/// A project and its expenses, as exported by the web front end.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectExport {
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub expenses: Vec<ExpenseExport>,
}

/// One exported expense.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseExport {
    pub date: NaiveDate,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub item: String,
    pub amount: Decimal,
    pub paid_by: String,
    pub paid_for: Vec<String>,
}

impl ProjectExport {
    /// Reads and parses an export file.
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parses an export from JSON text.
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Creates the project in `store` and records every expense.
    ///
    /// Stops at the first expense the store rejects, naming its position.
    pub fn load_into(self, store: &InMemoryExpenseStore) -> anyhow::Result<Project> {
        let project = store.create_project(self.name, self.date)?;

        for (index, expense) in self.expenses.into_iter().enumerate() {
            store
                .create_expense(NewExpense {
                    project_id: project.id,
                    date: expense.date,
                    category: expense.category,
                    item: expense.item,
                    amount: expense.amount,
                    paid_by: expense.paid_by,
                    paid_for: expense.paid_for,
                })
                .with_context(|| format!("expense #{index}"))?;
        }

        debug!(project_id = %project.id, "project loaded from export");
        Ok(project)
    }
}
