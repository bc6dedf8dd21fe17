use auth::Claims;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<Json<TokenResponseData>, ApiError> {
    // An unparseable email cannot belong to an account; fail exactly like a
    // missed lookup
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::from(UserError::InvalidCredentials))?;

    let user = state
        .user_service
        .authenticate(&email, &body.password)
        .await
        .map_err(ApiError::from)?;

    let claims = Claims::for_subject(user.email.as_str(), state.token_lifetime);
    let access_token = state
        .token_codec
        .encode(&claims)
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {}", e)))?;

    Ok(Json(TokenResponseData {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub token_type: String,
}
