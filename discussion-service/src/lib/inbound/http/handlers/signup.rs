use auth::Claims;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::AuthTokenData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::FullName;
use crate::domain::user::models::PhoneNumber;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::FullNameError;
use crate::user::errors::PhoneNumberError;

/// Create an account and return its first bearer credential.
///
/// Duplicate email or phone surfaces as a conflict with no partial record;
/// on success the response is 201 with a freshly issued token naming the new
/// account in its claims.
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<ApiSuccess<AuthTokenData>, ApiError> {
    let user = state
        .user_service
        .create_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)?;

    let token = state
        .token_service
        .create_token(Claims::for_user(user.id))
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {}", e)))?;

    Ok(ApiSuccess::new(StatusCode::CREATED, AuthTokenData { token }))
}

/// HTTP request body for creating an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    full_name: String,
    phone_number: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseSignupRequestError {
    #[error("Invalid full name: {0}")]
    FullName(#[from] FullNameError),

    #[error("Invalid phone number: {0}")]
    PhoneNumber(#[from] PhoneNumberError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl SignupRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, ParseSignupRequestError> {
        let full_name = FullName::new(self.full_name)?;
        let phone_number = PhoneNumber::new(self.phone_number)?;
        let email = EmailAddress::new(self.email)?;
        Ok(CreateUserCommand::new(
            full_name,
            phone_number,
            email,
            self.password,
        ))
    }
}

impl From<ParseSignupRequestError> for ApiError {
    fn from(err: ParseSignupRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
