use crate::application::resources::list::{ListResourcesUseCase, ResourceListQuery};
use crate::domain::resources::Resource;
use crate::infrastructure::state::AppState;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::query::Qs;
use crate::shared::response::{JsonApiResource, JsonApiResponse};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// The relief resource catalog
#[utoipa::path(
    get,
    path = "/api/v1/resources",
    params(("filter[type]" = Option<String>, Query, description = "shelter, medical, food, water or other")),
    responses(
        (status = 200, description = "Resources", body = JsonApiResponse<Vec<JsonApiResource<Resource>>>),
        (status = 422, description = "Unknown resource type", body = ErrorResponse)
    ),
    tag = "Client / Resources"
)]
pub async fn list_resources(
    State(state): State<AppState>,
    Qs(query): Qs<ResourceListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let resources: Vec<_> = ListResourcesUseCase::new(state.repos.resources.clone())
        .execute(&query)
        .await?
        .into_iter()
        .map(|r| {
            let id = r.id.clone();
            JsonApiResource::new("resources", id, r)
        })
        .collect();
    Ok((StatusCode::OK, Json(JsonApiResponse::new(resources))))
}
