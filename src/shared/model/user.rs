use serde::{Deserialize, Serialize};

/// Canonical user record, shared by the store, the HTTP payload and the
/// client-side directory. All four display fields are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id: i64,
  pub name: String,
  pub company_name: String,
  pub role: String,
  pub country: String,
}
