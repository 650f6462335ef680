use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Extension type carrying the resolved account identity in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Identity-resolution middleware for protected routes.
///
/// Extracts the bearer credential from the Authorization header, validates it
/// through the token service, and loads the account it names. Every failure
/// branch (missing or malformed header, invalid token, claims without a
/// usable user id, unknown account) produces a byte-identical 401 so callers
/// cannot learn which step rejected them. Causes are logged at debug level
/// only.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let credential = extract_credential(&req).ok_or_else(|| {
        tracing::debug!("missing or malformed authorization header");
        unauthenticated()
    })?;

    let claims = state.token_service.decode_token(credential).map_err(|_| {
        tracing::debug!("bearer credential failed verification");
        unauthenticated()
    })?;

    let user_id = claims
        .user_id
        .as_deref()
        .and_then(|raw| UserId::from_string(raw).ok())
        .ok_or_else(|| {
            tracing::debug!("token claims carry no usable user id");
            unauthenticated()
        })?;

    let user = match state.user_service.get_user(&user_id).await {
        Ok(user) => user,
        Err(UserError::NotFound(_)) => {
            tracing::debug!("token names an account that does not exist");
            return Err(unauthenticated());
        }
        Err(e) => {
            // Storage failures are not an authentication outcome
            tracing::error!(error = %e, "user lookup failed during authentication");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal server error"
                })),
            )
                .into_response());
        }
    };

    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}

/// Pull the credential out of `Authorization: <scheme> <credential>`.
///
/// The scheme word is not semantically checked; the header just needs two
/// whitespace-separated tokens, and the second one is the credential.
fn extract_credential(req: &Request) -> Option<&str> {
    let header = req.headers().get(http::header::AUTHORIZATION)?;
    let mut parts = header.to_str().ok()?.split_whitespace();
    parts.next()?;
    parts.next()
}

/// The uniform rejection shared by every authentication failure branch.
fn unauthenticated() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized"
        })),
    )
        .into_response()
}
