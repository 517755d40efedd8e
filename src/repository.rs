use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use crate::config::{ClientConfig, ConfigError};
use crate::error::ExpenseError;
use crate::models::{Expense, ExpenseDraft, ExpenseRecord, Identified, today};
use crate::store::{ExpenseBackend, LocalStore, RemoteService};

/// Which backend the repository talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Local,
    Remote,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Local => Mode::Remote,
            Mode::Remote => Mode::Local,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Local => "Local storage",
            Mode::Remote => "API mode",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Local => write!(f, "local"),
            Mode::Remote => write!(f, "remote"),
        }
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Mode::Local),
            "remote" => Ok(Mode::Remote),
            _ => Err(ConfigError::InvalidMode(s.to_string())),
        }
    }
}

/// The single entry point for expense persistence. Holds both backends, the
/// active mode, and a snapshot of the active backend's collection.
#[derive(Debug)]
pub struct ExpenseRepository {
    mode: Mode,
    local: LocalStore,
    remote: RemoteService,
    expenses: Vec<ExpenseRecord>,
}

impl ExpenseRepository {
    pub fn new(mode: Mode, local: LocalStore, remote: RemoteService) -> Self {
        Self {
            mode,
            local,
            remote,
            expenses: Vec::new(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ExpenseError> {
        let local = LocalStore::new(&config.storage_path);
        let remote = RemoteService::new(&config.api_url)?;
        Ok(Self::new(config.mode, local, remote))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switches the active backend. Backend data is left untouched; the
    /// snapshot of the previous backend is dropped so its records are never
    /// shown under the new mode.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            info!(from = %self.mode, to = %mode, "switching expense backend");
            self.expenses.clear();
        }
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) -> Mode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    /// Records as of the last `load`, patched by later saves and removals.
    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    pub fn find(&self, identifier: &str) -> Option<&ExpenseRecord> {
        self.expenses
            .iter()
            .find(|record| record.identifier() == identifier)
    }

    pub async fn load(&mut self) -> Result<&[ExpenseRecord], ExpenseError> {
        let records = match self.mode {
            Mode::Local => list_from(&self.local).await?,
            Mode::Remote => list_from(&self.remote).await?,
        };
        debug!(mode = %self.mode, count = records.len(), "expenses loaded");
        self.expenses = records;
        Ok(&self.expenses)
    }

    /// Creates a new expense, or updates `existing` when given. Returns the
    /// stored record, or `None` when `existing` names no record.
    pub async fn save(
        &mut self,
        draft: ExpenseDraft,
        existing: Option<&str>,
    ) -> Result<Option<ExpenseRecord>, ExpenseError> {
        let expense = draft.into_expense(today())?;
        let saved = match self.mode {
            Mode::Local => save_to(&self.local, expense, existing).await?,
            Mode::Remote => save_to(&self.remote, expense, existing).await?,
        };

        if let Some(record) = &saved {
            match existing {
                Some(identifier) => {
                    if let Some(slot) = self
                        .expenses
                        .iter_mut()
                        .find(|current| current.identifier() == identifier)
                    {
                        *slot = record.clone();
                    }
                }
                None => self.expenses.push(record.clone()),
            }
        }
        Ok(saved)
    }

    pub async fn remove(&mut self, identifier: &str) -> Result<(), ExpenseError> {
        match self.mode {
            Mode::Local => self.local.delete(identifier).await?,
            Mode::Remote => self.remote.delete(identifier).await?,
        }
        self.expenses
            .retain(|record| record.identifier() != identifier);
        Ok(())
    }
}

async fn list_from<B: ExpenseBackend>(backend: &B) -> Result<Vec<ExpenseRecord>, ExpenseError> {
    let records = backend.list().await?;
    Ok(records.into_iter().map(Into::into).collect())
}

async fn save_to<B: ExpenseBackend>(
    backend: &B,
    expense: Expense,
    existing: Option<&str>,
) -> Result<Option<ExpenseRecord>, ExpenseError> {
    match existing {
        Some(identifier) => Ok(backend.update(identifier, expense).await?.map(Into::into)),
        None => Ok(Some(backend.create(expense).await?.into())),
    }
}
