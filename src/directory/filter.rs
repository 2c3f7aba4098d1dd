use crate::shared::model::user::User;

/// Users whose name, company, role or country contains `query`, ignoring
/// case. An empty query keeps every user. Order is preserved.
pub fn filter_users(users: &[User], query: &str) -> Vec<User> {
  let query = query.to_lowercase();
  users
    .iter()
    .filter(|user| matches_query(user, &query))
    .cloned()
    .collect()
}

fn matches_query(user: &User, query: &str) -> bool {
  [&user.name, &user.company_name, &user.role, &user.country]
    .iter()
    .any(|field| field.to_lowercase().contains(query))
}
