use crate::application::assistant::prompt::{
    object_schema, photo_media, run_prompt, string_field, upstream_error,
};
use crate::domain::assistant::{CompletionClient, InlineMedia, PromptRequest};
use crate::shared::error::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

pub const FAILURE_MESSAGE: &str = "Failed to get disaster information. Please try again.";

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DisasterInfoRequest {
    #[validate(length(min = 5, message = "Query must be at least 5 characters"))]
    #[schema(example = "What should I do during a flood?")]
    pub query: String,

    /// `data:<mimetype>;base64,<encoded_data>`
    pub photo_data_uri: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DisasterInfoResponse {
    pub answer: String,
}

fn render(query: &str, with_photo: bool) -> String {
    let mut text = format!(
        "You are an expert in providing information about natural disasters. \
         Use your knowledge base to answer the following question:\n\n\
         User's query: {}\n",
        query.trim()
    );
    if with_photo {
        text.push_str(
            "\nThe user has also provided an image related to their query. \
             Consider this image if it helps answer the query.\n",
        );
    }
    text
}

/// Disaster-info prompt for a query; chat replies go through here too
pub(crate) fn prompt_request(query: &str, media: Vec<InlineMedia>) -> PromptRequest {
    PromptRequest {
        name: "disasterInfo",
        text: render(query, !media.is_empty()),
        media,
        output_schema: object_schema(&[(
            "answer",
            string_field("The answer to the disaster information query."),
        )]),
    }
}

pub struct DisasterInfoUseCase {
    client: Arc<dyn CompletionClient>,
}

impl DisasterInfoUseCase {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip_all)]
    pub async fn execute(&self, req: DisasterInfoRequest) -> Result<DisasterInfoResponse, AppError> {
        let media = photo_media(req.photo_data_uri.as_deref())?;
        run_prompt(&self.client, prompt_request(&req.query, media))
            .await
            .map_err(|e| upstream_error(e, FAILURE_MESSAGE))
    }
}
