use crate::domain::emergency::{EMERGENCY_CONTACTS, EmergencyContact};
use crate::shared::response::JsonApiResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/v1/emergency-contacts",
    responses(
        (status = 200, description = "Emergency numbers", body = JsonApiResponse<Vec<EmergencyContact>>)
    ),
    tag = "Client / Emergency"
)]
pub async fn list_contacts() -> Json<JsonApiResponse<Vec<EmergencyContact>>> {
    Json(JsonApiResponse::new(EMERGENCY_CONTACTS.to_vec()))
}
