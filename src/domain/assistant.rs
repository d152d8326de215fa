//! Generative-AI completion seam and the message types exchanged with it.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;
use utoipa::ToSchema;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/gif"];

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Request(#[from] anyhow::Error),
    #[error("completion endpoint returned no output")]
    EmptyResponse,
    #[error("model output did not match the {prompt} schema: {reason}")]
    InvalidOutput { prompt: &'static str, reason: String },
}

/// An image passed to the model alongside the prompt text
#[derive(Debug, Clone, PartialEq)]
pub struct InlineMedia {
    pub mime_type: String,
    /// Base64 payload, exactly as received
    pub data: String,
}

impl InlineMedia {
    /// Parse `data:<mimetype>;base64,<encoded_data>`, enforcing the accepted
    /// image types and the 5 MiB size cap.
    pub fn from_data_uri(uri: &str) -> Result<Self, String> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| "Photo must be a data URI".to_string())?;
        let (mime_type, data) = rest
            .split_once(";base64,")
            .ok_or_else(|| "Photo data URI must be base64 encoded".to_string())?;

        Self::from_bytes_checked(mime_type, data)
    }

    /// Build from raw upload bytes (multipart form)
    pub fn from_upload(mime_type: &str, bytes: &[u8]) -> Result<Self, String> {
        check_image_type(mime_type)?;
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err("Max file size is 5MB.".to_string());
        }
        Ok(Self {
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
        })
    }

    fn from_bytes_checked(mime_type: &str, data: &str) -> Result<Self, String> {
        check_image_type(mime_type)?;
        let decoded = STANDARD
            .decode(data)
            .map_err(|_| "Photo data is not valid base64".to_string())?;
        if decoded.len() > MAX_IMAGE_BYTES {
            return Err("Max file size is 5MB.".to_string());
        }
        Ok(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

fn check_image_type(mime_type: &str) -> Result<(), String> {
    if ALLOWED_IMAGE_TYPES.contains(&mime_type) {
        Ok(())
    } else {
        Err("Only .jpg, .jpeg, .png, .webp and .gif formats are supported.".to_string())
    }
}

/// One rendered prompt ready to send
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub name: &'static str,
    pub text: String,
    pub media: Vec<InlineMedia>,
    /// JSON schema the model's output must follow
    pub output_schema: Value,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send the prompt and return the model's structured (JSON) output
    async fn generate(&self, request: PromptRequest) -> Result<Value, CompletionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    #[serde(with = "time::serde::iso8601")]
    #[schema(value_type = String)]
    pub timestamp: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_data_uri: Option<String>,
}

impl ChatMessage {
    fn stamped(prefix: &str, sender: Sender, text: String) -> Self {
        let timestamp = OffsetDateTime::now_utc();
        let millis = timestamp.unix_timestamp_nanos() / 1_000_000;
        Self {
            id: format!("{}-{}", prefix, millis),
            sender,
            text,
            timestamp,
            photo_data_uri: None,
        }
    }

    pub fn from_user(text: String) -> Self {
        Self::stamped("user", Sender::User, text)
    }

    pub fn from_ai(text: String) -> Self {
        Self::stamped("ai", Sender::Ai, text)
    }

    /// Shown in place of a reply when the completion call fails
    pub fn apology() -> Self {
        Self::stamped(
            "error",
            Sender::Ai,
            "Sorry, I couldn't process your request right now.".to_string(),
        )
    }

    pub fn with_photo(mut self, photo_data_uri: Option<String>) -> Self {
        self.photo_data_uri = photo_data_uri;
        self
    }
}
