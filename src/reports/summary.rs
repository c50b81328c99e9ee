//! Dashboard summary
//!
//! Everything the dashboard shows, derived on demand from the current
//! transactions and bills.

use chrono::NaiveDate;
use serde::Serialize;

use super::monthly::{monthly_series, MonthlyPoint};
use super::totals::Totals;
use crate::display::report::{format_bar, separator};
use crate::models::{Bill, Money, Transaction};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub reference: NaiveDate,
    pub totals: Totals,
    pub pending_bills: usize,
    pub pending_amount: Money,
    pub overdue_bills: usize,
    /// Earliest pending bill due on or after the reference date
    pub next_due: Option<Bill>,
    pub monthly: Vec<MonthlyPoint>,
}

impl DashboardSummary {
    pub fn generate(
        transactions: &[Transaction],
        bills: &[Bill],
        reference: NaiveDate,
        months: usize,
    ) -> Self {
        let pending: Vec<&Bill> = bills.iter().filter(|b| b.is_pending()).collect();

        let next_due = pending
            .iter()
            .filter(|b| b.due_date >= reference)
            .min_by_key(|b| b.due_date)
            .map(|b| (*b).clone());

        Self {
            reference,
            totals: Totals::from_transactions(transactions),
            pending_bills: pending.len(),
            pending_amount: pending.iter().map(|b| b.amount).sum(),
            overdue_bills: pending.iter().filter(|b| b.is_overdue(reference)).count(),
            next_due,
            monthly: monthly_series(transactions, reference, months),
        }
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(symbol);
        let mut output = String::new();

        output.push_str(&format!("Ledger Summary as of {}\n", self.reference));
        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format!("Income:   {:>14}\n", money(self.totals.income)));
        output.push_str(&format!("Expenses: {:>14}\n", money(self.totals.expense)));
        output.push_str(&format!("Balance:  {:>14}\n\n", money(self.totals.balance)));

        output.push_str(&format!(
            "Pending bills: {} ({})",
            self.pending_bills,
            money(self.pending_amount)
        ));
        if self.overdue_bills > 0 {
            output.push_str(&format!(", {} overdue", self.overdue_bills));
        }
        output.push('\n');
        if let Some(bill) = &self.next_due {
            output.push_str(&format!(
                "Next due:      {} on {} ({})\n",
                bill.description,
                bill.due_date,
                money(bill.amount)
            ));
        }

        if self.monthly.is_empty() {
            return output;
        }

        let max = self
            .monthly
            .iter()
            .map(|p| p.income.max(p.expense).cents())
            .max()
            .unwrap_or(0) as f64;

        output.push_str(&format!(
            "\n{:<8} {:>12} {:>12}  {}\n",
            "Month", "Income", "Expense", "In/Out"
        ));
        output.push_str(&separator(60));
        output.push('\n');
        for point in &self.monthly {
            output.push_str(&format!(
                "{} {}  {:>12} {:>12}  {}|{}\n",
                point.label(),
                point.month.year(),
                money(point.income),
                money(point.expense),
                format_bar(point.income.cents() as f64, max, 8),
                format_bar(point.expense.cents() as f64, max, 8),
            ));
        }

        output
    }
}
