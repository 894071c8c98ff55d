//! Rendering of balances and settlement reports.

use clap::ValueEnum;
use splitledger_core::{Balances, ProjectSettlement};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// Aligned plain text.
    Text,
}

/// Renders balances as a name / amount table.
pub fn balances_text(balances: &Balances) -> String {
    if balances.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let width = balances
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::from("Balances\n");
    for (name, amount) in balances.iter() {
        out.push_str(&format!("  {name:<width$}  {amount:>12}\n"));
    }
    out
}

/// Renders a settlement report: balances first, then who pays whom.
pub fn settlement_text(report: &ProjectSettlement) -> String {
    let mut out = balances_text(&report.balances);
    out.push('\n');

    if report.settlement_plan.is_empty() {
        out.push_str("Everyone is settled up.\n");
        return out;
    }

    out.push_str("Settlement plan\n");
    for transfer in &report.settlement_plan {
        out.push_str(&format!("  {transfer}\n"));
    }
    out
}
