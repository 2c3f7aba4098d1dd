use log::{error, warn};
use thiserror::Error;

use super::source::{
  fallback_source::FallbackUserSource, primary_source::HttpUserSource,
  SourceError, UserSource,
};
use crate::shared::{config::Config, model::user::User};

#[derive(Debug, Error)]
pub enum LoadError {
  /// Both sources failed. The primary failure was already logged.
  #[error("Error fetching users")]
  FallbackFailed(#[source] SourceError),
}

/// Loads a fresh user list from the primary source, or from the fallback
/// source when the primary fails for any reason. No retries.
pub struct UserListLoader<P: UserSource, F: UserSource> {
  primary: P,
  fallback: F,
}

impl<P: UserSource, F: UserSource> UserListLoader<P, F> {
  pub fn new(primary: P, fallback: F) -> Self {
    Self { primary, fallback }
  }

  pub async fn load(&self) -> Result<Vec<User>, LoadError> {
    match self.primary.fetch_users().await {
      Ok(users) => Ok(users),
      Err(primary_error) => {
        warn!(
          "Primary source not available, falling back: {}",
          primary_error
        );
        self.fallback.fetch_users().await.map_err(|fallback_error| {
          error!("Fallback source failed: {}", fallback_error);
          LoadError::FallbackFailed(fallback_error)
        })
      }
    }
  }
}

impl UserListLoader<HttpUserSource, FallbackUserSource> {
  pub fn from_config(config: &Config) -> Result<Self, SourceError> {
    let primary =
      HttpUserSource::new(&config.users_api_url, config.primary_timeout())?;
    let fallback = FallbackUserSource::new(
      &config.fallback_users_url,
      config.fallback_timeout(),
    )?;
    Ok(Self::new(primary, fallback))
  }
}
