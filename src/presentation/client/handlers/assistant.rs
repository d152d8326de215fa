use crate::application::assistant::chat::{ChatRequest, ChatResponse, ChatUseCase};
use crate::application::assistant::disaster_info::{
    DisasterInfoRequest, DisasterInfoResponse, DisasterInfoUseCase,
};
use crate::application::assistant::earthquake_info::{
    EarthquakeInfoRequest, EarthquakeInfoResponse, EarthquakeInfoUseCase,
};
use crate::application::assistant::locate_resources::{
    LocateResourcesRequest, LocateResourcesResponse, LocateResourcesUseCase,
};
use crate::application::assistant::safety_tips::{
    SafetyTipsRequest, SafetyTipsResponse, SafetyTipsUseCase,
};
use crate::application::assistant::severity::{
    AssessSeverityUseCase, SeverityAssessmentRequest, SeverityAssessmentResponse,
};
use crate::domain::assistant::InlineMedia;
use crate::infrastructure::state::AppState;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::JsonApiResponse;
use crate::shared::validation::ValidatedJson;
use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};

#[utoipa::path(
    post,
    path = "/api/v1/assistant/disaster-info",
    request_body = DisasterInfoRequest,
    responses(
        (status = 200, description = "Answer", body = JsonApiResponse<DisasterInfoResponse>),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 502, description = "Completion endpoint failed", body = ErrorResponse)
    ),
    tag = "Client / Assistant"
)]
pub async fn disaster_info(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<DisasterInfoRequest>,
) -> Result<impl IntoResponse, AppError> {
    let answer = DisasterInfoUseCase::new(state.completion.clone())
        .execute(req)
        .await?;
    Ok((StatusCode::OK, Json(JsonApiResponse::new(answer))))
}

#[utoipa::path(
    post,
    path = "/api/v1/assistant/earthquake-info",
    request_body = EarthquakeInfoRequest,
    responses(
        (status = 200, description = "Answer", body = JsonApiResponse<EarthquakeInfoResponse>),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 502, description = "Completion endpoint failed", body = ErrorResponse)
    ),
    tag = "Client / Assistant"
)]
pub async fn earthquake_info(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<EarthquakeInfoRequest>,
) -> Result<impl IntoResponse, AppError> {
    let answer = EarthquakeInfoUseCase::new(state.completion.clone())
        .execute(req)
        .await?;
    Ok((StatusCode::OK, Json(JsonApiResponse::new(answer))))
}

#[utoipa::path(
    post,
    path = "/api/v1/assistant/safety-tips",
    request_body = SafetyTipsRequest,
    responses(
        (status = 200, description = "Personalized recommendations", body = JsonApiResponse<SafetyTipsResponse>),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 502, description = "Completion endpoint failed", body = ErrorResponse)
    ),
    tag = "Client / Assistant"
)]
pub async fn safety_tips(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SafetyTipsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tips = SafetyTipsUseCase::new(state.completion.clone())
        .execute(req)
        .await?;
    Ok((StatusCode::OK, Json(JsonApiResponse::new(tips))))
}

#[utoipa::path(
    post,
    path = "/api/v1/assistant/severity",
    request_body = SeverityAssessmentRequest,
    responses(
        (status = 200, description = "Assessment", body = JsonApiResponse<SeverityAssessmentResponse>),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 502, description = "Completion endpoint failed", body = ErrorResponse)
    ),
    tag = "Client / Assistant"
)]
pub async fn assess_severity(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SeverityAssessmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let assessment = AssessSeverityUseCase::new(state.completion.clone())
        .execute(req)
        .await?;
    Ok((StatusCode::OK, Json(JsonApiResponse::new(assessment))))
}

/// Same assessment from a `multipart/form-data` form with a `description`
/// field and an optional `photo` file.
#[utoipa::path(
    post,
    path = "/api/v1/assistant/severity/upload",
    request_body(content_type = "multipart/form-data", description = "`description` text and optional `photo` image"),
    responses(
        (status = 200, description = "Assessment", body = JsonApiResponse<SeverityAssessmentResponse>),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 502, description = "Completion endpoint failed", body = ErrorResponse)
    ),
    tag = "Client / Assistant"
)]
pub async fn assess_severity_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut description = String::new();
    let mut media = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::ValidationError(format!("Invalid multipart body: {}", e)))?
    {
        match field.name() {
            Some("description") => {
                description = field.text().await.map_err(|e| {
                    AppError::ValidationError(format!("Invalid description field: {}", e))
                })?;
            }
            Some("photo") => {
                let mime_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::ValidationError(format!("Invalid photo field: {}", e))
                })?;
                if !bytes.is_empty() {
                    media.push(
                        InlineMedia::from_upload(&mime_type, &bytes)
                            .map_err(AppError::ValidationError)?,
                    );
                }
            }
            _ => {}
        }
    }

    let assessment = AssessSeverityUseCase::new(state.completion.clone())
        .assess(&description, media)
        .await?;
    Ok((StatusCode::OK, Json(JsonApiResponse::new(assessment))))
}

#[utoipa::path(
    post,
    path = "/api/v1/assistant/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "User message and assistant reply", body = JsonApiResponse<ChatResponse>),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Client / Assistant"
)]
pub async fn chat(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    let exchange = ChatUseCase::new(state.completion.clone())
        .execute(req)
        .await?;
    Ok((StatusCode::OK, Json(JsonApiResponse::new(exchange))))
}

#[utoipa::path(
    post,
    path = "/api/v1/assistant/resources",
    request_body = LocateResourcesRequest,
    responses(
        (status = 200, description = "Matching resources", body = JsonApiResponse<LocateResourcesResponse>),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 502, description = "Completion endpoint failed", body = ErrorResponse)
    ),
    tag = "Client / Assistant"
)]
pub async fn locate_resources(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LocateResourcesRequest>,
) -> Result<impl IntoResponse, AppError> {
    let found = LocateResourcesUseCase::new(state.completion.clone(), state.repos.resources.clone())
        .execute(req)
        .await?;
    Ok((StatusCode::OK, Json(JsonApiResponse::new(found))))
}
