use crate::application::assistant::disaster_info::{DisasterInfoResponse, prompt_request};
use crate::application::assistant::prompt::{photo_media, run_prompt};
use crate::domain::assistant::{ChatMessage, CompletionClient};
use crate::shared::error::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[validate(length(min = 1, message = "Message cannot be empty"))]
    #[schema(example = "Is it safe to go back inside after an aftershock?")]
    pub message: String,

    pub photo_data_uri: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub user_message: ChatMessage,
    pub reply: ChatMessage,
}

pub struct ChatUseCase {
    client: Arc<dyn CompletionClient>,
}

impl ChatUseCase {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Completion failures still produce a reply, the apology message.
    #[tracing::instrument(skip_all)]
    pub async fn execute(&self, req: ChatRequest) -> Result<ChatResponse, AppError> {
        if req.message.trim().is_empty() {
            return Err(AppError::ValidationError(
                "message: Message cannot be empty".to_string(),
            ));
        }
        let media = photo_media(req.photo_data_uri.as_deref())?;
        let user_message = ChatMessage::from_user(req.message.clone())
            .with_photo(media.first().map(|m| m.to_data_uri()));

        let reply = match run_prompt::<DisasterInfoResponse>(
            &self.client,
            prompt_request(&req.message, media),
        )
        .await
        {
            Ok(output) => ChatMessage::from_ai(output.answer),
            Err(e) => {
                tracing::error!(error = %e, "chat completion failed");
                ChatMessage::apology()
            }
        };

        Ok(ChatResponse {
            user_message,
            reply,
        })
    }
}
