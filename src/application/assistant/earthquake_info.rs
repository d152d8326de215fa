use crate::application::assistant::prompt::{
    object_schema, run_prompt, string_field, upstream_error,
};
use crate::domain::assistant::{CompletionClient, PromptRequest};
use crate::shared::error::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

pub const FAILURE_MESSAGE: &str = "Failed to get earthquake information. Please try again.";

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EarthquakeInfoRequest {
    #[validate(length(min = 5, message = "Query must be at least 5 characters"))]
    #[schema(example = "What is the Sagaing fault?")]
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EarthquakeInfoResponse {
    pub answer: String,
}

pub struct EarthquakeInfoUseCase {
    client: Arc<dyn CompletionClient>,
}

impl EarthquakeInfoUseCase {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip_all)]
    pub async fn execute(
        &self,
        req: EarthquakeInfoRequest,
    ) -> Result<EarthquakeInfoResponse, AppError> {
        let request = PromptRequest {
            name: "earthquakeInfo",
            text: format!(
                "You are an expert in providing information about earthquakes. \
                 Use your knowledge base to answer the following question:\n\n{}\n",
                req.query.trim()
            ),
            media: Vec::new(),
            output_schema: object_schema(&[(
                "answer",
                string_field("The answer to the earthquake information query."),
            )]),
        };

        run_prompt(&self.client, request)
            .await
            .map_err(|e| upstream_error(e, FAILURE_MESSAGE))
    }
}
