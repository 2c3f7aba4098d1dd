use std::time::Duration;

use reqwest::Client;

use super::{fetch_json, SourceError, UserSource};
use crate::shared::model::user::User;
use crate::users::rto::get_user_rto::GetUserRto;

/// Reads the user table through this service's `GET /users` endpoint.
pub struct HttpUserSource {
  client: Client,
  url: String,
}

impl HttpUserSource {
  pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
    let client = Client::builder().timeout(timeout).build()?;
    Ok(Self {
      client,
      url: format!("{}/users", base_url.trim_end_matches('/')),
    })
  }
}

impl UserSource for HttpUserSource {
  async fn fetch_users(&self) -> Result<Vec<User>, SourceError> {
    let rows: Vec<GetUserRto> = fetch_json(&self.client, &self.url).await?;
    Ok(rows.into_iter().map(User::from).collect())
  }
}
