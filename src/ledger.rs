//! Read-only computations over the loaded collection: category filtering,
//! totals and the per-category distribution fed to the chart.

use std::fmt;

use crate::constants::ALL_CATEGORIES;
use crate::models::{ExpenseRecord, Identified};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => record.expense().category == *category,
        }
    }

    /// The matching records, in their original order.
    pub fn apply<'a>(&self, records: &'a [ExpenseRecord]) -> Vec<&'a ExpenseRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "{}", ALL_CATEGORIES),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

pub fn total<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    records
        .into_iter()
        .map(|record| record.expense().amount)
        .fold(0.0, |acc, amount| acc + amount)
}

/// Two decimals with ties rounded away from zero, never `-0.00`.
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", (amount * 100.0).round() / 100.0 + 0.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
    grand_total: f64,
}

impl CategoryTotal {
    /// Fraction of the grand total, `0.0` when everything sums to zero.
    pub fn share(&self) -> f64 {
        if self.grand_total > 0.0 {
            self.amount / self.grand_total
        } else {
            0.0
        }
    }
}

/// Per-category sums in the order categories first appear.
pub fn category_totals(records: &[ExpenseRecord]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for record in records {
        let expense = record.expense();
        match totals
            .iter_mut()
            .find(|entry| entry.category == expense.category)
        {
            Some(entry) => entry.amount += expense.amount,
            None => totals.push(CategoryTotal {
                category: expense.category.clone(),
                amount: expense.amount,
                grand_total: 0.0,
            }),
        }
    }

    let grand_total = totals.iter().fold(0.0, |acc, entry| acc + entry.amount);
    for entry in &mut totals {
        entry.grand_total = grand_total;
    }
    totals
}

pub fn categories(records: &[ExpenseRecord]) -> Vec<String> {
    category_totals(records)
        .into_iter()
        .map(|entry| entry.category)
        .collect()
}
