use axum::extract::Path;
use axum::extract::State;
use axum::Json;

use super::create_contact::ContactResponseData;
use super::ApiError;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::ports::ContactServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_contact(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
) -> Result<Json<ContactResponseData>, ApiError> {
    let contact_id =
        ContactId::from_string(&contact_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .contact_service
        .get_contact(&contact_id)
        .await
        .map_err(ApiError::from)
        .map(|ref contact| Json(contact.into()))
}
