use std::collections::HashSet;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::constants::STORAGE_KEY;
use crate::error::ExpenseError;
use crate::models::{Expense, LocalRecord};
use crate::store::ExpenseBackend;

/// A single key-value slot on disk holding the whole collection as one JSON
/// array. Every mutation rewrites the full blob.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
    key: String,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_key(root, STORAGE_KEY)
    }

    pub fn with_key(root: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn slot_path(&self) -> PathBuf {
        self.root.join(format!("{}.json", self.key))
    }

    /// Absent or unreadable slots read as an empty collection.
    pub async fn read_all(&self) -> Vec<LocalRecord> {
        let path = self.slot_path();
        let blob = match tokio::fs::read_to_string(&path).await {
            Ok(blob) => blob,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read storage slot");
                return Vec::new();
            }
        };

        match serde_json::from_str(&blob) {
            Ok(records) => records,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "malformed storage slot, treating as empty");
                Vec::new()
            }
        }
    }

    pub async fn write_all(&self, records: &[LocalRecord]) -> Result<(), ExpenseError> {
        tokio::fs::create_dir_all(&self.root).await?;
        let blob = serde_json::to_string(records)?;
        let path = self.slot_path();
        let staging = staging_path(&path);

        tokio::fs::write(&staging, blob).await?;
        tokio::fs::rename(&staging, &path).await?;
        debug!(path = %path.display(), count = records.len(), "storage slot written");
        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    PathBuf::from(staging)
}

/// Current Unix time in milliseconds, bumped past every numeric identifier
/// already present so two submissions within the same millisecond differ.
/// When the highest identifier cannot be bumped, the first free value from
/// `now` upwards is used instead.
pub fn next_identifier(records: &[LocalRecord]) -> String {
    let now = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u128;
    let taken: HashSet<u128> = records
        .iter()
        .filter_map(|record| record.id.parse::<u128>().ok())
        .collect();

    match taken.iter().max() {
        Some(&highest) if highest >= now => match highest.checked_add(1) {
            Some(next) => next.to_string(),
            None => (now..)
                .find(|candidate| !taken.contains(candidate))
                .unwrap_or(now)
                .to_string(),
        },
        _ => now.to_string(),
    }
}

impl ExpenseBackend for LocalStore {
    type Record = LocalRecord;

    async fn list(&self) -> Result<Vec<LocalRecord>, ExpenseError> {
        Ok(self.read_all().await)
    }

    async fn create(&self, expense: Expense) -> Result<LocalRecord, ExpenseError> {
        let mut records = self.read_all().await;
        let record = LocalRecord {
            id: next_identifier(&records),
            expense,
        };
        records.push(record.clone());
        self.write_all(&records).await?;
        Ok(record)
    }

    async fn update(
        &self,
        identifier: &str,
        expense: Expense,
    ) -> Result<Option<LocalRecord>, ExpenseError> {
        let mut records = self.read_all().await;
        let Some(index) = records.iter().position(|record| record.id == identifier) else {
            debug!(identifier, "no local expense to update");
            return Ok(None);
        };

        records[index] = LocalRecord {
            id: identifier.to_string(),
            expense,
        };
        self.write_all(&records).await?;
        Ok(Some(records.swap_remove(index)))
    }

    async fn delete(&self, identifier: &str) -> Result<(), ExpenseError> {
        let mut records = self.read_all().await;
        records.retain(|record| record.id != identifier);
        self.write_all(&records).await
    }
}
