use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde_json::json;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// The resolved caller, inserted into request extensions by the guard
/// middleware and consumed by protected handlers.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
}

/// Guard middleware resolving the bearer token to a user.
///
/// Decodes the token, parses the subject claim as an email, and looks the
/// user up in the directory. Every failure mode (missing or malformed
/// header, bad signature, expired token, unknown subject) is denied with the
/// same 401; none of them is retryable.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = state.token_codec.decode(token).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        unauthorized()
    })?;

    let email = EmailAddress::new(claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not an email");
        unauthorized()
    })?;

    let user = state
        .user_service
        .get_user_by_email(&email)
        .await
        .map_err(|e| match e {
            UserError::NotFound(_) => {
                tracing::warn!("Token subject does not resolve to a user");
                unauthorized()
            }
            other => {
                tracing::error!(error = %other, "User lookup failed during authentication");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        })?;

    req.extensions_mut().insert(CurrentUser {
        id: user.id,
        email: user.email,
        created_at: user.created_at,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(unauthorized)?;

    let auth_str = auth_header.to_str().map_err(|_| unauthorized())?;

    auth_str.strip_prefix("Bearer ").ok_or_else(unauthorized)
}

/// Single indistinct denial for every token failure mode.
fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        Json(json!({ "error": "Could not validate credentials" })),
    )
        .into_response()
}
