use crate::application::assistant::prompt::{
    object_schema, photo_media, run_prompt, string_field, string_list_field, upstream_error,
};
use crate::domain::assistant::{CompletionClient, InlineMedia, PromptRequest};
use crate::shared::error::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

pub const FAILURE_MESSAGE: &str = "Failed to get severity assessment. Please try again.";

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeverityAssessmentRequest {
    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    #[schema(example = "Water is rising fast around our street and the power is out")]
    pub description: String,

    /// `data:<mimetype>;base64,<encoded_data>`
    pub photo_data_uri: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeverityAssessmentResponse {
    pub severity_assessment: String,
    pub potential_hazards: Vec<String>,
    pub recommended_actions: Vec<String>,
}

fn render(description: &str, with_photo: bool) -> String {
    let mut text = format!(
        "You are a disaster response expert. Analyze the provided description and, \
         if available, the photo to assess the severity of the situation.\n\
         Identify potential hazards and recommend immediate, actionable safety measures.\n\n\
         User's Description: {}\n",
        description.trim()
    );
    if with_photo {
        text.push_str("User's Photo: attached.\n");
    }
    text.push_str(
        "\nProvide a concise severity assessment (e.g., Minor, Moderate, Severe, Critical).\n\
         List key potential hazards.\n\
         List clear, step-by-step recommended actions. Be very specific and practical.\n\
         Focus on immediate safety.\n",
    );
    if with_photo {
        text.push_str(
            "Consider visual cues like structural damage, water levels, fire, visible injuries.\n",
        );
    } else {
        text.push_str("No photo is provided; base your assessment solely on the textual description.\n");
    }
    text.push_str(
        "If the description is vague or insufficient for a clear assessment, state that and \
         ask for more specific details, but still provide general precautionary advice if possible.\n",
    );
    text
}

pub struct AssessSeverityUseCase {
    client: Arc<dyn CompletionClient>,
}

impl AssessSeverityUseCase {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// JSON entry point; the photo comes as a data URI
    pub async fn execute(
        &self,
        req: SeverityAssessmentRequest,
    ) -> Result<SeverityAssessmentResponse, AppError> {
        let media = photo_media(req.photo_data_uri.as_deref())?;
        self.assess(&req.description, media).await
    }

    /// Multipart entry point; the photo was already decoded from the upload
    #[tracing::instrument(skip_all, fields(photos = media.len()))]
    pub async fn assess(
        &self,
        description: &str,
        media: Vec<InlineMedia>,
    ) -> Result<SeverityAssessmentResponse, AppError> {
        if description.trim().chars().count() < 10 {
            return Err(AppError::ValidationError(
                "description: Description must be at least 10 characters".to_string(),
            ));
        }

        let request = PromptRequest {
            name: "assessDisasterSeverity",
            text: render(description, !media.is_empty()),
            media,
            output_schema: object_schema(&[
                (
                    "severityAssessment",
                    string_field(
                        "The severity of the situation (e.g., Minor, Moderate, Severe, Critical).",
                    ),
                ),
                (
                    "potentialHazards",
                    string_list_field("Potential hazards identified from the input."),
                ),
                (
                    "recommendedActions",
                    string_list_field("Recommended immediate actions for the user."),
                ),
            ]),
        };

        run_prompt(&self.client, request)
            .await
            .map_err(|e| upstream_error(e, FAILURE_MESSAGE))
    }
}
