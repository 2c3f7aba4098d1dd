use std::{env, fmt::Display, str::FromStr, time::Duration};

use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
  pub port: u16,
  pub database_url: String,
  pub users_api_url: String,
  pub fallback_users_url: String,
  pub primary_timeout_ms: u64,
  pub fallback_timeout_ms: u64,
}

impl Config {
  pub fn primary_timeout(&self) -> Duration {
    Duration::from_millis(self.primary_timeout_ms)
  }

  pub fn fallback_timeout(&self) -> Duration {
    Duration::from_millis(self.fallback_timeout_ms)
  }
}

impl Default for Config {
  fn default() -> Self {
    let database_url =
      env::var("DATABASE_URL").unwrap_or_else(|_| database_url_from_parts());
    let users_api_url = env::var("USERS_API_URL")
      .unwrap_or_else(|_| "http://localhost:5000".to_string());
    let fallback_users_url = env::var("FALLBACK_USERS_URL")
      .unwrap_or_else(|_| "https://dummyjson.com/users".to_string());
    Self {
      port: parse_var("PORT", 5000),
      database_url,
      users_api_url,
      fallback_users_url,
      primary_timeout_ms: parse_var("PRIMARY_TIMEOUT_MS", 5000),
      fallback_timeout_ms: parse_var("FALLBACK_TIMEOUT_MS", 10000),
    }
  }
}

fn database_url_from_parts() -> String {
  let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
  let user = env::var("DB_USER").unwrap_or_else(|_| "user".to_string());
  let password =
    env::var("DB_PASSWORD").unwrap_or_else(|_| "password".to_string());
  let name = env::var("DB_NAME").unwrap_or_else(|_| "users_db".to_string());
  format!("postgres://{}:{}@{}/{}", user, password, host, name)
}

fn parse_var<T: FromStr>(key: &str, default: T) -> T
where
  T::Err: Display,
{
  match env::var(key) {
    Ok(value) => value.parse().unwrap_or_else(|error| {
      warn!("Invalid {} value {:?}: {}, using default", key, value, error);
      default
    }),
    Err(_) => default,
  }
}
