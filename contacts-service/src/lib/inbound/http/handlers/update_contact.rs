use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::create_contact::ContactResponseData;
use super::ApiError;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::models::UpdateContactCommand;
use crate::domain::contact::ports::ContactServicePort;
use crate::inbound::http::router::AppState;

pub async fn update_contact(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
    Json(body): Json<UpdateContactRequestBody>,
) -> Result<Json<ContactResponseData>, ApiError> {
    let contact_id =
        ContactId::from_string(&contact_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .contact_service
        .update_contact(&contact_id, body.into_command())
        .await
        .map_err(ApiError::from)
        .map(|ref contact| Json(contact.into()))
}

/// HTTP request body for updating a contact (raw JSON)
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateContactRequestBody {
    #[serde(default)]
    first_name: Option<String>,

    #[serde(default)]
    last_name: Option<String>,

    #[serde(default)]
    email: Option<String>,

    #[serde(default)]
    phone: Option<String>,
}

impl UpdateContactRequestBody {
    fn into_command(self) -> UpdateContactCommand {
        UpdateContactCommand {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
        }
    }
}
