//! Places a user list can be loaded from.
//!
//! The primary source is this service's own `GET /users`, the fallback is a
//! third-party directory with a different record shape. Both yield canonical
//! [`User`] records.

pub mod fallback_source;
pub mod primary_source;

use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::shared::model::user::User;

#[derive(Debug, Error)]
pub enum SourceError {
  #[error("Request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("Unexpected status {0}")]
  Status(u16),
}

pub trait UserSource {
  async fn fetch_users(&self) -> Result<Vec<User>, SourceError>;
}

/// GETs `url` and decodes a JSON body. Any non-2xx status is an error.
pub async fn fetch_json<T: DeserializeOwned>(
  client: &Client,
  url: &str,
) -> Result<T, SourceError> {
  debug!("Fetching {}", url);
  let response = client.get(url).send().await?;

  let status = response.status();
  if !status.is_success() {
    return Err(SourceError::Status(status.as_u16()));
  }

  Ok(response.json().await?)
}

impl<S: UserSource> UserSource for &S {
  async fn fetch_users(&self) -> Result<Vec<User>, SourceError> {
    (**self).fetch_users().await
  }
}

#[cfg(test)]
pub mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::time::Duration;

  use actix_web::http::StatusCode;
  use reqwest::Client;
  use serde_json::json;

  use super::{fetch_json, SourceError, UserSource};
  use crate::helpers::tests::serve_json;
  use crate::shared::model::user::User;

  /// In-process source answering with a fixed result. Counts its calls and
  /// the highest number of calls that were in flight at once.
  pub struct MockSource {
    users: Option<Vec<User>>,
    delay: Duration,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
  }

  impl MockSource {
    pub fn users(users: Vec<User>) -> Self {
      Self::new(Some(users))
    }

    pub fn failing() -> Self {
      Self::new(None)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
      self.delay = delay;
      self
    }

    pub fn calls(&self) -> usize {
      self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
      self.max_in_flight.load(Ordering::SeqCst)
    }

    fn new(users: Option<Vec<User>>) -> Self {
      Self {
        users,
        delay: Duration::ZERO,
        calls: AtomicUsize::new(0),
        in_flight: AtomicUsize::new(0),
        max_in_flight: AtomicUsize::new(0),
      }
    }
  }

  impl UserSource for MockSource {
    async fn fetch_users(&self) -> Result<Vec<User>, SourceError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
      self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);

      if !self.delay.is_zero() {
        actix_rt::time::sleep(self.delay).await;
      }

      self.in_flight.fetch_sub(1, Ordering::SeqCst);
      self.users.clone().ok_or(SourceError::Status(503))
    }
  }

  #[actix_rt::test]
  async fn test_fetch_json_decodes_body() {
    let (url, handle) =
      serve_json(StatusCode::OK, json!({"total": 3}), Duration::ZERO).await;

    let body: serde_json::Value =
      fetch_json(&Client::new(), &url).await.unwrap();

    assert_eq!(body["total"], 3);
    handle.stop(false).await;
  }

  #[actix_rt::test]
  async fn test_fetch_json_rejects_error_status() {
    let (url, handle) =
      serve_json(StatusCode::NOT_FOUND, json!({}), Duration::ZERO).await;

    let result: Result<serde_json::Value, SourceError> =
      fetch_json(&Client::new(), &url).await;

    assert!(matches!(result, Err(SourceError::Status(404))));
    handle.stop(false).await;
  }
}
