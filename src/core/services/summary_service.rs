use serde::Serialize;

use crate::domain::LedgerEntry;

/// Totals shown above the table, always computed over the visible subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_revenue: f64,
    pub total_expense: f64,
    pub balance: f64,
}

pub struct SummaryService;

impl SummaryService {
    /// Revenue is the sum of `receita` entries; every other entry counts as expense.
    pub fn summarize<'a, I>(entries: I) -> Summary
    where
        I: IntoIterator<Item = &'a LedgerEntry>,
    {
        let (total_revenue, total_expense) =
            entries
                .into_iter()
                .fold((0.0, 0.0), |(revenue, expense), entry| {
                    if entry.is_revenue() {
                        (revenue + entry.valor, expense)
                    } else {
                        (revenue, expense + entry.valor)
                    }
                });
        Summary {
            total_revenue,
            total_expense,
            balance: total_revenue - total_expense,
        }
    }
}
