use log::{error, info};
use sqlx::{postgres::PgPoolOptions, PgPool};

/// Lifecycle of the process-wide store handle.
///
/// The handle starts `Disconnected`, and a single connection attempt moves it
/// to either `Connected` or `Failed`. There is no reconnect: a `Failed`
/// database stays failed until the process is restarted.
#[derive(Debug)]
pub enum ConnectionState {
  Disconnected,
  Connected(PgPool),
  Failed(String),
}

pub struct Database {
  state: ConnectionState,
}

impl Database {
  pub fn disconnected() -> Self {
    Self {
      state: ConnectionState::Disconnected,
    }
  }

  /// Opens the single store connection. Never fails: a connection error is
  /// logged and kept as the `Failed` state so callers can answer 503.
  pub async fn connect(url: &str) -> Self {
    let state = match prepare_pool(url).await {
      Ok(pool) => {
        info!("Connected to database");
        ConnectionState::Connected(pool)
      }
      Err(error) => {
        error!("Error connecting to database: {}", error);
        ConnectionState::Failed(error.to_string())
      }
    };
    Self { state }
  }

  pub fn state(&self) -> &ConnectionState {
    &self.state
  }

  pub fn is_connected(&self) -> bool {
    matches!(self.state, ConnectionState::Connected(_))
  }

  /// The pool, only while `Connected`.
  pub fn pool(&self) -> Option<&PgPool> {
    match &self.state {
      ConnectionState::Connected(pool) => Some(pool),
      _ => None,
    }
  }
}

// One connection only: queries from concurrent requests queue on it.
async fn prepare_pool(url: &str) -> Result<PgPool, sqlx::Error> {
  PgPoolOptions::new().max_connections(1).connect(url).await
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_disconnected_has_no_pool() {
    let database = Database::disconnected();
    assert!(!database.is_connected());
    assert!(database.pool().is_none());
    assert!(matches!(database.state(), ConnectionState::Disconnected));
  }

  #[actix_rt::test]
  async fn test_connect_with_invalid_url_is_failed() {
    let database = Database::connect("not a database url").await;
    assert!(!database.is_connected());
    assert!(database.pool().is_none());
    assert!(matches!(database.state(), ConnectionState::Failed(_)));
  }
}
