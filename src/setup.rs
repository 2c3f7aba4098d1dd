use std::{fs, path::Path};

use log::{debug, info};
use thiserror::Error;

use crate::shared::database::Database;

#[derive(Debug, Error)]
pub enum SetupError {
  #[error("Could not read schema: {0}")]
  Io(#[from] std::io::Error),

  #[error("Database connection failed")]
  ServiceUnavailable,

  #[error("Database error: {0}")]
  DatabaseError(#[from] sqlx::Error),
}

/// Splits a schema file into statements. Database creation and selection are
/// left to the connection string, so those statements are dropped.
pub fn schema_statements(schema: &str) -> Vec<&str> {
  schema
    .split(';')
    .map(str::trim)
    .filter(|statement| !statement.is_empty())
    .filter(|statement| {
      let upper = statement.to_uppercase();
      !upper.starts_with("CREATE DATABASE") && !upper.starts_with("USE")
    })
    .collect()
}

/// Runs every statement of the schema file in order. Returns how many ran.
pub async fn setup_database(
  database: &Database,
  schema_path: &Path,
) -> Result<usize, SetupError> {
  let pool = database.pool().ok_or(SetupError::ServiceUnavailable)?;
  let schema = fs::read_to_string(schema_path)?;
  let statements = schema_statements(&schema);

  info!("Executing {} schema statements...", statements.len());
  for statement in &statements {
    debug!("{}", statement);
    sqlx::query(*statement).execute(pool).await?;
  }
  info!("Database setup complete!");
  Ok(statements.len())
}
