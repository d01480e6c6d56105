use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, Statement};
use serde::Serialize;

use crate::error::StoreError;

/// A column the current data model expects on the `projects` table, together
/// with the additive statement that creates it and an optional backfill.
#[derive(Debug)]
pub struct RequiredColumn {
    pub name: &'static str,
    pub add: &'static str,
    pub backfill: Option<&'static str>,
}

/// Columns older deployments of the projects table may be missing. Each entry
/// is additive only: the guard never drops or renames anything.
pub const REQUIRED_COLUMNS: &[RequiredColumn] = &[
    RequiredColumn {
        name: "status",
        add: "ALTER TABLE projects ADD COLUMN IF NOT EXISTS status VARCHAR(20) NOT NULL DEFAULT 'offline'",
        backfill: None,
    },
    RequiredColumn {
        name: "updated_at",
        add: "ALTER TABLE projects ADD COLUMN IF NOT EXISTS updated_at TIMESTAMPTZ DEFAULT CURRENT_TIMESTAMP",
        backfill: Some("UPDATE projects SET updated_at = created_at WHERE updated_at IS NULL"),
    },
    RequiredColumn {
        name: "analysis_depth",
        add: "ALTER TABLE projects ADD COLUMN IF NOT EXISTS analysis_depth VARCHAR(50) NOT NULL DEFAULT 'exploratory'",
        backfill: None,
    },
    RequiredColumn {
        name: "industry",
        add: "ALTER TABLE projects ADD COLUMN IF NOT EXISTS industry VARCHAR(50) NOT NULL DEFAULT 'other'",
        backfill: None,
    },
    RequiredColumn {
        name: "content",
        add: "ALTER TABLE projects ADD COLUMN IF NOT EXISTS content JSONB NOT NULL DEFAULT '{}'",
        backfill: None,
    },
    RequiredColumn {
        name: "featured",
        add: "ALTER TABLE projects ADD COLUMN IF NOT EXISTS featured BOOLEAN NOT NULL DEFAULT FALSE",
        backfill: None,
    },
    RequiredColumn {
        name: "demo_url",
        add: "ALTER TABLE projects ADD COLUMN IF NOT EXISTS demo_url TEXT NOT NULL DEFAULT ''",
        backfill: None,
    },
];

/// What a repair pass actually did.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaRepairReport {
    pub added: Vec<String>,
}

impl SchemaRepairReport {
    pub fn summary(&self) -> String {
        if self.added.is_empty() {
            "projects table already up to date".to_string()
        } else {
            format!("added missing columns: {}", self.added.join(", "))
        }
    }
}

/// Whether a storage error means a statement referenced a column the live
/// table does not have. Postgres reports this condition only through the
/// error text, so this is the one place allowed to string-match it.
pub fn is_missing_column_error(err: &DbErr) -> bool {
    let message = err.to_string().to_lowercase();
    message.contains("column") && message.contains("does not exist")
}

async fn column_exists(db: &DatabaseConnection, column: &str) -> Result<bool, DbErr> {
    let row = db
        .query_one_raw(Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT 1 FROM information_schema.columns \
             WHERE table_schema = 'public' AND table_name = 'projects' AND column_name = $1",
            [column.into()],
        ))
        .await?;
    Ok(row.is_some())
}

/// Bring the live `projects` table's column set up to what the data model
/// expects. Safe to call at any time: when nothing is missing, no statements
/// beyond the existence checks are issued.
///
/// Existence is re-checked against the live catalog immediately before each
/// add, and the `IF NOT EXISTS` form tolerates a concurrent invocation that
/// adds the same column first. Columns added before a failure stay in place
/// and are listed on the error.
pub async fn ensure_projects_schema(
    db: &DatabaseConnection,
) -> Result<SchemaRepairReport, StoreError> {
    let mut added = Vec::new();

    for column in REQUIRED_COLUMNS {
        match column_exists(db, column.name).await {
            Ok(true) => continue,
            Ok(false) => {}
            Err(source) => return Err(StoreError::SchemaRepair { added, source }),
        }

        if let Err(source) = db.execute_unprepared(column.add).await {
            tracing::error!(column = column.name, error = %source, "failed to add projects column");
            return Err(StoreError::SchemaRepair { added, source });
        }

        if let Some(backfill) = column.backfill {
            if let Err(source) = db.execute_unprepared(backfill).await {
                tracing::error!(column = column.name, error = %source, "failed to backfill projects column");
                added.push(column.name.to_string());
                return Err(StoreError::SchemaRepair { added, source });
            }
        }

        tracing::info!(column = column.name, "added missing projects column");
        added.push(column.name.to_string());
    }

    Ok(SchemaRepairReport { added })
}

/// Names of the tables in the public schema, for the maintenance status report.
pub async fn list_public_tables(db: &DatabaseConnection) -> Result<Vec<String>, StoreError> {
    let rows = db
        .query_all_raw(Statement::from_string(
            DbBackend::Postgres,
            "SELECT table_name FROM information_schema.tables WHERE table_schema = 'public'",
        ))
        .await?;

    let mut tables = Vec::with_capacity(rows.len());
    for row in rows {
        tables.push(row.try_get::<String>("", "table_name")?);
    }
    Ok(tables)
}
