use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetUserRto {
  pub id: i64,
  pub name: String,
  pub company_name: String,
  pub role: String,
  pub country: String,
}
