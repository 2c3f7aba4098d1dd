pub mod repository;
pub mod rto;

use actix_web::{web, HttpResponse, Responder};
use log::{error, warn};
use repository::user_repository::{UserRepository, UserRepositoryError};
use rto::get_user_rto::GetUserRto;

use crate::shared::http_error::HttpError;
use crate::shared::model::user::User;
use crate::AppState;

pub async fn get_users<UR: UserRepository + 'static>(
  data: web::Data<AppState<UR>>,
) -> impl Responder {
  data
    .user_repository
    .find_all()
    .await
    .map(users_found)
    .unwrap_or_else(failed_find_users)
}

fn users_found(users: Vec<User>) -> HttpResponse {
  let rtos: Vec<GetUserRto> = users.into_iter().map(GetUserRto::from).collect();
  HttpResponse::Ok()
    .content_type("application/json")
    .json(rtos)
}

fn failed_find_users(error: UserRepositoryError) -> HttpResponse {
  match error {
    UserRepositoryError::ServiceUnavailable => {
      warn!("Rejecting /users: database is not connected");
      HttpResponse::ServiceUnavailable()
        .content_type("application/json")
        .json(HttpError::from("Database connection failed"))
    }
    UserRepositoryError::DatabaseError(error) => {
      error!("Error fetching users: {}", error);
      HttpResponse::InternalServerError()
        .content_type("application/json")
        .json(HttpError::from("Database error"))
    }
  }
}

// Transform User domain to RTO
impl From<User> for GetUserRto {
  fn from(user: User) -> Self {
    Self {
      id: user.id,
      name: user.name,
      company_name: user.company_name,
      role: user.role,
      country: user.country,
    }
  }
}

// Rows served by this endpoint are already canonical
impl From<GetUserRto> for User {
  fn from(rto: GetUserRto) -> Self {
    Self {
      id: rto.id,
      name: rto.name,
      company_name: rto.company_name,
      role: rto.role,
      country: rto.country,
    }
  }
}
