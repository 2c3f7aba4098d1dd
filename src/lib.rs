//! A read-only user directory.
//!
//! The server exposes the user table as `GET /users`. The [`directory`]
//! module is the client side: it loads that list, falls back to a remote
//! directory when the server cannot answer, and keeps a searchable local copy
//! that can be added to and removed from without persisting anything.

pub mod directory;
pub mod setup;
pub mod shared;
pub mod users;

use actix_web::web;
use users::get_users;
use users::repository::user_repository::UserRepository;

// This struct represents state
pub struct AppState<UR: UserRepository> {
  user_repository: UR,
}

// Function to initialize the App
pub fn app_config<UR: UserRepository + 'static>(
  config: &mut web::ServiceConfig,
  user_repository: UR,
) {
  config
    .app_data(web::Data::new(AppState { user_repository }))
    .service(
      web::scope("/users").route("", web::get().to(get_users::<UR>)),
    );
}
