//! Gemini `generateContent` client with JSON-constrained output.

use crate::domain::assistant::{CompletionClient, CompletionError, PromptRequest};
use crate::infrastructure::config::GeminiConfig;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: GEMINI_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

/// Request body: prompt text first, then each image as an inline part.
fn build_body(request: &PromptRequest) -> Value {
    let mut parts = vec![json!({ "text": request.text })];
    parts.extend(request.media.iter().map(|media| {
        json!({
            "inline_data": {
                "mime_type": media.mime_type,
                "data": media.data,
            }
        })
    }));

    json!({
        "contents": [{ "role": "user", "parts": parts }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": request.output_schema,
        }
    })
}

/// Pull the first candidate's text and parse it as JSON
fn extract_output(name: &'static str, response: GenerateResponse) -> Result<Value, CompletionError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .filter(|text| !text.trim().is_empty())
        .ok_or(CompletionError::EmptyResponse)?;

    serde_json::from_str(text.trim()).map_err(|e| CompletionError::InvalidOutput {
        prompt: name,
        reason: format!("not JSON: {}", e),
    })
}

#[async_trait]
impl CompletionClient for GeminiClient {
    #[tracing::instrument(skip(self, request), fields(prompt = request.name, model = %self.model))]
    async fn generate(&self, request: PromptRequest) -> Result<Value, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("GEMINI_API_KEY is not configured"))?;

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let response = self
            .http
            .post(url)
            .query(&[("key", api_key)])
            .json(&build_body(&request))
            .send()
            .await
            .map_err(|e| CompletionError::Request(e.into()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, "generateContent failed");
            return Err(CompletionError::Request(anyhow::anyhow!(
                "generateContent returned {}",
                status
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Request(e.into()))?;
        let output = extract_output(request.name, parsed)?;
        tracing::debug!("completion received");
        Ok(output)
    }
}
