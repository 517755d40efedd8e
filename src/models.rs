use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::constants::*;
use crate::error::ExpenseError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// The identifier-free body of an expense. This is also the wire body of
/// `POST` and `PUT` requests.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Expense {
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
}

/// Raw user input for an expense, before defaults are applied.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ExpenseDraft {
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
}

/// Shape of a record in the local storage slot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LocalRecord {
    pub id: String,
    #[serde(flatten)]
    pub expense: Expense,
}

/// Shape of a record as served by the remote expense service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RemoteRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub expense: Expense,
}

/// A stored expense from either backend. Deserializing picks `Remote` when
/// an `_id` field is present and falls back to `Local` on `id`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ExpenseRecord {
    Remote(RemoteRecord),
    Local(LocalRecord),
}

/// Uniform access to a stored expense regardless of which backend issued
/// its identifier.
pub trait Identified {
    fn identifier(&self) -> &str;
    fn expense(&self) -> &Expense;
}

impl Identified for LocalRecord {
    fn identifier(&self) -> &str {
        &self.id
    }

    fn expense(&self) -> &Expense {
        &self.expense
    }
}

impl Identified for RemoteRecord {
    fn identifier(&self) -> &str {
        &self.id
    }

    fn expense(&self) -> &Expense {
        &self.expense
    }
}

impl Identified for ExpenseRecord {
    fn identifier(&self) -> &str {
        match self {
            ExpenseRecord::Remote(record) => record.identifier(),
            ExpenseRecord::Local(record) => record.identifier(),
        }
    }

    fn expense(&self) -> &Expense {
        match self {
            ExpenseRecord::Remote(record) => record.expense(),
            ExpenseRecord::Local(record) => record.expense(),
        }
    }
}

impl From<LocalRecord> for ExpenseRecord {
    fn from(record: LocalRecord) -> Self {
        ExpenseRecord::Local(record)
    }
}

impl From<RemoteRecord> for ExpenseRecord {
    fn from(record: RemoteRecord) -> Self {
        ExpenseRecord::Remote(record)
    }
}

impl ExpenseDraft {
    pub fn new(amount: f64, category: impl Into<String>) -> Self {
        Self {
            amount,
            category: category.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Validates the draft and fills in the placeholder description and
    /// `today` for the fields left empty.
    pub fn into_expense(self, today: Date) -> Result<Expense, ExpenseError> {
        validate_amount(self.amount)?;
        let category = self.category.trim().to_string();
        validate_string_length(&category, "Category", MAX_CATEGORY_NAME_LENGTH)?;

        let description = if self.description.trim().is_empty() {
            PLACEHOLDER_DESCRIPTION.to_string()
        } else {
            self.description
        };
        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(ExpenseError::Validation(format!(
                "Description must be less than {} characters",
                MAX_DESCRIPTION_LENGTH
            )));
        }

        let date = match self.date.trim() {
            "" => today,
            value => parse_date(value)?,
        };

        Ok(Expense {
            amount: self.amount,
            category,
            description,
            date: date.to_string(),
        })
    }
}

impl From<&Expense> for ExpenseDraft {
    fn from(expense: &Expense) -> Self {
        Self {
            amount: expense.amount,
            category: expense.category.clone(),
            description: expense.description.clone(),
            date: expense.date.clone(),
        }
    }
}

pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

pub fn parse_date(value: &str) -> Result<Date, ExpenseError> {
    Date::parse(value, &DATE_FORMAT).map_err(|_| {
        ExpenseError::Validation(format!("Date '{}' is not in YYYY-MM-DD format", value))
    })
}

pub fn validate_amount(amount: f64) -> Result<(), ExpenseError> {
    if !amount.is_finite() {
        return Err(ExpenseError::Validation(
            "Amount must be a finite number".to_string(),
        ));
    }
    if amount < 0.0 {
        return Err(ExpenseError::Validation(
            "Amount cannot be negative".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_string_length(
    value: &str,
    field_name: &str,
    max_length: usize,
) -> Result<(), ExpenseError> {
    if value.trim().is_empty() {
        return Err(ExpenseError::Validation(format!(
            "{} cannot be empty",
            field_name
        )));
    }
    if value.chars().count() > max_length {
        return Err(ExpenseError::Validation(format!(
            "{} must be less than {} characters",
            field_name, max_length
        )));
    }
    Ok(())
}
