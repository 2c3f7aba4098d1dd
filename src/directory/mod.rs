//! Client side of the directory: loading, searching and the local,
//! never-persisted list of users.

pub mod dto;
pub mod filter;
pub mod loader;
pub mod source;

use std::sync::{Mutex, PoisonError, RwLock};

use chrono::Utc;
use dto::new_user_dto::{NewUserDto, UserValidationError};
use filter::filter_users;
use loader::{LoadError, UserListLoader};
use log::{debug, info};
use source::UserSource;
use validator::Validate;

use crate::shared::model::user::User;

/// The list currently on display together with the search query.
///
/// Loads are serialised: a refresh started while another is in flight waits
/// for it and then loads again, so completions apply in start order.
pub struct UserDirectory {
  users: RwLock<Vec<User>>,
  query: RwLock<String>,
  last_local_id: Mutex<i64>,
  loading: futures::lock::Mutex<()>,
}

impl UserDirectory {
  pub fn new() -> Self {
    Self {
      users: RwLock::new(Vec::new()),
      query: RwLock::new(String::new()),
      last_local_id: Mutex::new(0),
      loading: futures::lock::Mutex::new(()),
    }
  }

  /// Replaces the whole list with a fresh load. On failure the current list
  /// stays as it is.
  pub async fn refresh<P: UserSource, F: UserSource>(
    &self,
    loader: &UserListLoader<P, F>,
  ) -> Result<usize, LoadError> {
    let _loading = self.loading.lock().await;
    let users = loader.load().await?;
    let count = users.len();
    *self.users.write().unwrap_or_else(PoisonError::into_inner) = users;
    info!("Loaded {} users", count);
    Ok(count)
  }

  pub fn users(&self) -> Vec<User> {
    self.users.read().unwrap_or_else(PoisonError::into_inner).clone()
  }

  pub fn query(&self) -> String {
    self.query.read().unwrap_or_else(PoisonError::into_inner).clone()
  }

  pub fn set_query(&self, query: &str) {
    *self.query.write().unwrap_or_else(PoisonError::into_inner) =
      query.to_string();
  }

  /// The users matching the current query.
  pub fn visible(&self) -> Vec<User> {
    let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
    filter_users(&users, &self.query())
  }

  /// Appends a validated user to the local list. Nothing is sent anywhere.
  pub fn add_local(
    &self,
    new_user: NewUserDto,
  ) -> Result<User, UserValidationError> {
    new_user.validate()?;

    let user = User {
      id: self.next_local_id(),
      name: new_user.name,
      company_name: new_user.company_name,
      role: new_user.role,
      country: new_user.country,
    };
    self
      .users
      .write()
      .unwrap_or_else(PoisonError::into_inner)
      .push(user.clone());
    debug!("Added local user {}", user.id);
    Ok(user)
  }

  /// Removes the first user with `id` if `confirm` agrees. Returns the
  /// removed user.
  ///
  /// No lock is held while `confirm` runs, so it may read the directory.
  pub fn remove_local(
    &self,
    id: i64,
    confirm: impl FnOnce(&User) -> bool,
  ) -> Option<User> {
    let candidate = self
      .users
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .iter()
      .find(|user| user.id == id)
      .cloned()?;
    if !confirm(&candidate) {
      return None;
    }

    // The list may have been replaced while confirming
    let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
    let position = users.iter().position(|user| *user == candidate)?;
    debug!("Removed local user {}", id);
    Some(users.remove(position))
  }

  // Millisecond timestamp, bumped past the previous id when the clock has not
  // moved on.
  fn next_local_id(&self) -> i64 {
    let mut last = self
      .last_local_id
      .lock()
      .unwrap_or_else(PoisonError::into_inner);
    *last = Utc::now().timestamp_millis().max(*last + 1);
    *last
  }
}

impl Default for UserDirectory {
  fn default() -> Self {
    Self::new()
  }
}
