use std::sync::Arc;

use sqlx::postgres::PgRow;
use sqlx::Row;
use thiserror::Error;

use crate::shared::{database::Database, model::user::User};

#[derive(Debug, Error)]
pub enum UserRepositoryError {
  #[error("Database connection failed")]
  ServiceUnavailable,

  #[error("Database error: {0}")]
  DatabaseError(#[from] sqlx::Error),
}

pub trait UserRepository {
  async fn find_all(&self) -> Result<Vec<User>, UserRepositoryError>;
}

pub struct UserRepositoryImpl {
  database: Arc<Database>,
}

impl UserRepositoryImpl {
  pub fn new(database: Arc<Database>) -> Self {
    Self { database }
  }
}

impl UserRepository for UserRepositoryImpl {
  async fn find_all(&self) -> Result<Vec<User>, UserRepositoryError> {
    let pool = self
      .database
      .pool()
      .ok_or(UserRepositoryError::ServiceUnavailable)?;
    sqlx::query("SELECT * FROM users")
      .try_map(|row: PgRow| User::try_from(row))
      .fetch_all(pool)
      .await
      .map_err(UserRepositoryError::from)
  }
}

impl TryFrom<PgRow> for User {
  type Error = sqlx::Error;

  fn try_from(row: PgRow) -> Result<Self, Self::Error> {
    Ok(Self {
      id: row.try_get("id")?,
      name: row.try_get("name")?,
      company_name: row.try_get("company_name")?,
      role: row.try_get("role")?,
      country: row.try_get("country")?,
    })
  }
}
