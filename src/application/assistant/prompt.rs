//! Shared plumbing for the prompt wrappers: photo parsing, output schema
//! building, and typed decoding of the model's JSON output.

use crate::domain::assistant::{CompletionClient, CompletionError, InlineMedia, PromptRequest};
use crate::shared::error::AppError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// Send the prompt and decode the output into `T`. Output that does not fit
/// `T` is an `InvalidOutput` error, same as output that is not JSON at all.
pub async fn run_prompt<T: DeserializeOwned>(
    client: &Arc<dyn CompletionClient>,
    request: PromptRequest,
) -> Result<T, CompletionError> {
    let name = request.name;
    let output = client.generate(request).await?;
    serde_json::from_value(output).map_err(|e| CompletionError::InvalidOutput {
        prompt: name,
        reason: e.to_string(),
    })
}

/// Log the completion failure and hide it behind a user-facing message
pub fn upstream_error(err: CompletionError, message: &str) -> AppError {
    tracing::error!(error = %err, "completion failed");
    AppError::UpstreamError(message.to_string())
}

/// Decode an optional photo data URI into inline media
pub fn photo_media(photo_data_uri: Option<&str>) -> Result<Vec<InlineMedia>, AppError> {
    match photo_data_uri.map(str::trim).filter(|uri| !uri.is_empty()) {
        Some(uri) => InlineMedia::from_data_uri(uri)
            .map(|media| vec![media])
            .map_err(AppError::ValidationError),
        None => Ok(Vec::new()),
    }
}

pub fn string_field(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

pub fn string_list_field(description: &str) -> Value {
    json!({
        "type": "ARRAY",
        "description": description,
        "items": { "type": "STRING" }
    })
}

/// Object schema with every listed property required
pub fn object_schema(properties: &[(&str, Value)]) -> Value {
    let mut props = Map::new();
    for (name, schema) in properties {
        props.insert((*name).to_string(), schema.clone());
    }
    let required: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();
    json!({
        "type": "OBJECT",
        "properties": props,
        "required": required,
    })
}
