use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::inbound::http::middleware::CurrentUser;

/// Return the user resolved by the guard middleware.
pub async fn get_current_user(
    Extension(current_user): Extension<CurrentUser>,
) -> Json<CurrentUserResponseData> {
    Json(CurrentUserResponseData {
        id: current_user.id.to_string(),
        email: current_user.email.as_str().to_string(),
        created_at: current_user.created_at,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUserResponseData {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
