//! Schema definition and validation.
//!
//! One calendar per file, three tables. Creating a new calendar drops and
//! recreates all of them; opening an existing file only checks that they
//! are present. The REFERENCES clauses are not enforced (the foreign-key
//! pragma stays off): deleting a category may orphan events, and event
//! inserts never check their category id.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::models::CategoryType;

/// Tables every calendar database must contain.
pub(crate) const REQUIRED_TABLES: [&str; 3] = ["categoryTypes", "categories", "events"];

const DROP_SQL: &str = r#"
DROP TABLE IF EXISTS events;
DROP TABLE IF EXISTS categories;
DROP TABLE IF EXISTS categoryTypes;
"#;

const CREATE_SQL: &str = r#"
CREATE TABLE categoryTypes (
    CategoryTypeId INTEGER PRIMARY KEY AUTOINCREMENT,
    Description TEXT
);

CREATE TABLE categories (
    CategoryId INTEGER PRIMARY KEY AUTOINCREMENT,
    Description TEXT,
    CategoryTypeId INTEGER REFERENCES categoryTypes (CategoryTypeId)
);

CREATE TABLE events (
    EventId INTEGER PRIMARY KEY AUTOINCREMENT,
    StartDateTime TEXT,
    Details TEXT,
    DurationInMinutes DOUBLE,
    CategoryId INTEGER REFERENCES categories (CategoryId)
);
"#;

/// Drop and recreate every table, then seed the category types.
pub(crate) async fn create_schema(pool: &SqlitePool) -> DbResult<()> {
    debug!("Creating calendar schema");
    sqlx::raw_sql(DROP_SQL).execute(pool).await?;
    sqlx::raw_sql(CREATE_SQL).execute(pool).await?;
    seed_category_types(pool).await?;
    Ok(())
}

/// Verify that every required table exists, without touching any data.
pub(crate) async fn validate_schema(pool: &SqlitePool) -> DbResult<()> {
    for table in REQUIRED_TABLES {
        let found: Option<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(table)
                .fetch_optional(pool)
                .await?;
        if found.is_none() {
            return Err(DbError::schema_mismatch(table));
        }
    }
    Ok(())
}

async fn seed_category_types(pool: &SqlitePool) -> DbResult<()> {
    for category_type in CategoryType::ALL {
        sqlx::query("INSERT INTO categoryTypes (Description) VALUES (?)")
            .bind(category_type.label())
            .execute(pool)
            .await?;
    }
    Ok(())
}
