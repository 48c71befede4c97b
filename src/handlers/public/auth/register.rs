// handlers/public/auth/register.rs - POST /api/auth/register handler

use std::collections::HashMap;

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::auth::password::hash_password;
use crate::auth::Role;
use crate::database::models::User;
use crate::database::users::{self, NewUser};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Roles an account may claim for itself. Leadership roles are provisioned.
const SELF_REGISTER_ROLES: [Role; 2] = [Role::Student, Role::Lecturer];

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

impl RegisterRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();

        if self.name.trim().is_empty() {
            field_errors.insert("name".to_string(), "This field is required".to_string());
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            field_errors.insert("email".to_string(), "A valid email address is required".to_string());
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid registration", Some(field_errors)))
        }
    }
}

/// POST /api/auth/register - Create a student or lecturer account
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<User> {
    payload.validate()?;

    let role = payload.role.unwrap_or(Role::Student);
    if !SELF_REGISTER_ROLES.contains(&role) {
        return Err(ApiError::forbidden(format!("Role '{}' cannot be self-registered", role)));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = users::create(
        &state.db,
        NewUser {
            name: payload.name.trim(),
            email: payload.email.trim(),
            password_hash: &password_hash,
            role,
        },
    )
    .await?;

    tracing::info!("Registered user {} as {}", user.id, user.role);
    Ok(ApiResponse::created(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: "long enough".to_string(),
            role: None,
        }
    }

    #[test]
    fn accepts_well_formed_request() {
        assert!(request("Thabo", "thabo@example.edu").validate().is_ok());
    }

    #[test]
    fn reports_each_bad_field() {
        let err = request(" ", "nope").validate().unwrap_err();
        match err {
            ApiError::ValidationError { field_errors: Some(fields), .. } => {
                assert!(fields.contains_key("name"));
                assert!(fields.contains_key("email"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
