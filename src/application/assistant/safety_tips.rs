use crate::application::assistant::prompt::{
    object_schema, run_prompt, string_field, upstream_error,
};
use crate::domain::assistant::{CompletionClient, PromptRequest};
use crate::shared::error::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

pub const FAILURE_MESSAGE: &str = "Failed to get safety tips. Please try again.";

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SafetyTipsRequest {
    #[validate(length(min = 2, message = "Location must be at least 2 characters"))]
    #[schema(example = "Yangon, Myanmar")]
    pub location: String,

    #[validate(length(min = 10, message = "Please describe recent events (at least 10 characters)"))]
    #[schema(example = "M 6.1 earthquake near Yangon 8 hours ago")]
    pub recent_disaster_events: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SafetyTipsResponse {
    pub safety_recommendations: String,
}

fn render(req: &SafetyTipsRequest) -> String {
    format!(
        "You are an AI assistant specializing in providing personalized safety \
         recommendations during and after disaster events.\n\
         Based on the user's current location and recent disaster events, generate \
         personalized safety recommendations.\n\n\
         Location: {}\n\
         Recent Disaster Events: {}\n\n\
         Provide specific and actionable advice to ensure the user's safety.\n\
         The safetyRecommendations should be formatted as a list.\n\
         Do not act as the user, you are an assistant.\n",
        req.location.trim(),
        req.recent_disaster_events.trim()
    )
}

pub struct SafetyTipsUseCase {
    client: Arc<dyn CompletionClient>,
}

impl SafetyTipsUseCase {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip_all, fields(location = %req.location))]
    pub async fn execute(&self, req: SafetyTipsRequest) -> Result<SafetyTipsResponse, AppError> {
        let request = PromptRequest {
            name: "personalizedSafetyTips",
            text: render(&req),
            media: Vec::new(),
            output_schema: object_schema(&[(
                "safetyRecommendations",
                string_field("Personalized safety recommendations for the user."),
            )]),
        };

        run_prompt(&self.client, request)
            .await
            .map_err(|e| upstream_error(e, FAILURE_MESSAGE))
    }
}
