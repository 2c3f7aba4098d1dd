use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};
use validator_derive::Validate;

/// A user typed in locally, before it gets an id.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NewUserDto {
  #[validate(custom(function = "validate_name"))]
  pub name: String,
  #[validate(custom(function = "validate_company_name"))]
  pub company_name: String,
  #[validate(custom(function = "validate_role"))]
  pub role: String,
  #[validate(custom(function = "validate_country"))]
  pub country: String,
}

/// One message per invalid field, keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid user: {fields:?}")]
pub struct UserValidationError {
  pub fields: BTreeMap<String, String>,
}

impl From<ValidationErrors> for UserValidationError {
  fn from(errors: ValidationErrors) -> Self {
    let fields = errors
      .field_errors()
      .into_iter()
      .filter_map(|(field, errors)| {
        errors.first().map(|error| {
          let message = error
            .message
            .as_ref()
            .map(|message| message.to_string())
            .unwrap_or_else(|| error.code.to_string());
          (field.to_string(), message)
        })
      })
      .collect();
    Self { fields }
  }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
  if name.trim().chars().count() < 3 {
    return Err(invalid("length", "Name must be at least 3 characters"));
  }
  Ok(())
}

fn validate_company_name(company_name: &str) -> Result<(), ValidationError> {
  required(company_name, "Company name is required")
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
  required(role, "Role is required")
}

fn validate_country(country: &str) -> Result<(), ValidationError> {
  required(country, "Country is required")
}

fn required(value: &str, message: &'static str) -> Result<(), ValidationError> {
  if value.trim().is_empty() {
    return Err(invalid("required", message));
  }
  Ok(())
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
  let mut error = ValidationError::new(code);
  error.message = Some(Cow::Borrowed(message));
  error
}
