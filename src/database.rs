use anyhow::Result;
use libsql::{Builder, Connection};
use std::{path::Path, sync::Arc};
use tokio::sync::RwLock;

use crate::constants::DATABASE_FILE;

const CREATE_EXPENSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS expenses (
    id           TEXT PRIMARY KEY,
    amount       REAL NOT NULL,
    category     TEXT NOT NULL,
    description  TEXT NOT NULL,
    date         TEXT NOT NULL
);
"#;

pub type Db = Arc<RwLock<Connection>>;

/// Expense service DB (expenses.db)
pub async fn init_db(data_dir: &str) -> Result<Db> {
    tokio::fs::create_dir_all(data_dir).await?;
    let path = Path::new(data_dir).join(DATABASE_FILE);
    let db = Builder::new_local(path).build().await?;
    let conn = db.connect()?;

    conn.execute(CREATE_EXPENSES_TABLE, ()).await?;
    Ok(Arc::new(RwLock::new(conn)))
}
