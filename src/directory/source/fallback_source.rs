use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use super::{fetch_json, SourceError, UserSource};
use crate::shared::model::user::User;

/// Role given to remote users that come without one.
pub const NO_ROLE: &str = "N/A";

#[derive(Debug, Deserialize)]
pub struct FallbackPayload {
  pub users: Vec<RemoteUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUser {
  pub id: i64,
  pub first_name: String,
  pub last_name: String,
  pub company: RemoteCompany,
  #[serde(default)]
  pub role: Option<String>,
  pub address: RemoteAddress,
}

#[derive(Debug, Deserialize)]
pub struct RemoteCompany {
  pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RemoteAddress {
  pub country: String,
}

impl From<RemoteUser> for User {
  fn from(remote: RemoteUser) -> Self {
    Self {
      id: remote.id,
      name: format!("{} {}", remote.first_name, remote.last_name),
      company_name: remote.company.name,
      role: remote
        .role
        .filter(|role| !role.is_empty())
        .unwrap_or_else(|| NO_ROLE.to_string()),
      country: remote.address.country,
    }
  }
}

/// Third-party directory used when the primary source is down.
pub struct FallbackUserSource {
  client: Client,
  url: String,
}

impl FallbackUserSource {
  pub fn new(url: &str, timeout: Duration) -> Result<Self, SourceError> {
    let client = Client::builder().timeout(timeout).build()?;
    Ok(Self {
      client,
      url: url.to_string(),
    })
  }
}

impl UserSource for FallbackUserSource {
  async fn fetch_users(&self) -> Result<Vec<User>, SourceError> {
    let payload: FallbackPayload = fetch_json(&self.client, &self.url).await?;
    Ok(payload.users.into_iter().map(User::from).collect())
  }
}

#[cfg(test)]
mod tests {
  use actix_web::http::StatusCode;
  use serde_json::json;

  use super::*;
  use crate::helpers::tests::{closed_url, serve_json};

  fn remote_user(role: serde_json::Value) -> RemoteUser {
    let mut value = json!({
      "id": 7,
      "firstName": "Jo",
      "lastName": "Park",
      "company": {"name": "Globex"},
      "address": {"country": "KR"}
    });
    if !role.is_null() {
      value["role"] = role;
    }
    serde_json::from_value(value).unwrap()
  }

  #[test]
  fn test_missing_role_becomes_placeholder() {
    let user = User::from(remote_user(serde_json::Value::Null));

    assert_eq!(
      user,
      User {
        id: 7,
        name: "Jo Park".to_string(),
        company_name: "Globex".to_string(),
        role: "N/A".to_string(),
        country: "KR".to_string(),
      }
    );
  }

  #[test]
  fn test_empty_role_becomes_placeholder() {
    let user = User::from(remote_user(json!("")));
    assert_eq!(user.role, NO_ROLE);
  }

  #[test]
  fn test_present_role_is_kept() {
    let user = User::from(remote_user(json!("admin")));
    assert_eq!(user.role, "admin");
  }

  #[test]
  fn test_name_joins_with_single_space_untrimmed() {
    let remote: RemoteUser = serde_json::from_value(json!({
      "id": 1,
      "firstName": " Emily",
      "lastName": "Johnson ",
      "company": {"name": "Dooley"},
      "address": {"country": "United States"}
    }))
    .unwrap();

    let user = User::from(remote);

    assert_eq!(user.name, " Emily Johnson ");
  }

  #[actix_rt::test]
  async fn test_fetch_fallback_users() {
    let body = json!({
      "users": [
        {
          "id": 7,
          "firstName": "Jo",
          "lastName": "Park",
          "company": {"name": "Globex"},
          "address": {"country": "KR"}
        },
        {
          "id": 8,
          "firstName": "Emily",
          "lastName": "Johnson",
          "company": {"name": "Dooley"},
          "role": "admin",
          "address": {"country": "United States"}
        }
      ],
      "total": 2
    });
    let (url, handle) = serve_json(StatusCode::OK, body, Duration::ZERO).await;
    let source =
      FallbackUserSource::new(&format!("{}/users", url), Duration::from_secs(5))
        .unwrap();

    let users = source.fetch_users().await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].name, "Jo Park");
    assert_eq!(users[0].role, "N/A");
    assert_eq!(users[1].role, "admin");
    handle.stop(false).await;
  }

  #[actix_rt::test]
  async fn test_fetch_fallback_malformed_payload() {
    let (url, handle) =
      serve_json(StatusCode::OK, json!({"items": []}), Duration::ZERO).await;
    let source = FallbackUserSource::new(&url, Duration::from_secs(5)).unwrap();

    let result = source.fetch_users().await;

    assert!(matches!(result, Err(SourceError::Request(_))));
    handle.stop(false).await;
  }

  #[actix_rt::test]
  async fn test_fetch_fallback_unreachable() {
    let source =
      FallbackUserSource::new(&closed_url(), Duration::from_secs(5)).unwrap();

    let result = source.fetch_users().await;

    assert!(matches!(result, Err(SourceError::Request(_))));
  }
}
