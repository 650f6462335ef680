use auth::Claims;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthTokenData;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;

/// Exchange an email/password pair for a bearer credential.
///
/// Every failure shape (unparseable email, unregistered email, wrong
/// password) collapses to the same generic rejection.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<AuthTokenData>, ApiError> {
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::Unauthorized("incorrect email or password".to_string()))?;

    let user = state
        .user_service
        .authenticate_user(&email, &body.password)
        .await
        .map_err(ApiError::from)?;

    let token = state
        .token_service
        .create_token(Claims::for_user(user.id))
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {}", e)))?;

    Ok(ApiSuccess::new(StatusCode::OK, AuthTokenData { token }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}
