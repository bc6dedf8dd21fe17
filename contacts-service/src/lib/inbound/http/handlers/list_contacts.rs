use axum::extract::Query;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::create_contact::ContactResponseData;
use super::ApiError;
use crate::domain::contact::ports::ContactServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_contacts(
    State(state): State<AppState>,
    Query(params): Query<ListContactsParams>,
) -> Result<Json<Vec<ContactResponseData>>, ApiError> {
    state
        .contact_service
        .list_contacts(params.skip, params.limit)
        .await
        .map_err(ApiError::from)
        .map(|contacts| Json(contacts.iter().map(Into::into).collect()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListContactsParams {
    #[serde(default)]
    pub skip: i64,

    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}
