use crate::application::assistant::prompt::{object_schema, run_prompt, string_field, upstream_error};
use crate::domain::assistant::{CompletionClient, CompletionError, PromptRequest};
use crate::domain::resources::{Resource, ResourceRepository};
use crate::shared::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;
use std::fmt::Write;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

pub const FAILURE_MESSAGE: &str = "Failed to locate resources. Please try again.";

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LocateResourcesRequest {
    #[validate(length(min = 3, message = "Query must be at least 3 characters"))]
    #[schema(example = "need medical help")]
    pub query: String,

    #[schema(example = "downtown Yangon")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocateResourcesResponse {
    pub found_resources: Vec<Resource>,
}

/// Only the ids are used; the rest of each record comes from the catalog.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocatorOutput {
    #[serde(default)]
    found_resources: Vec<FoundResource>,
}

#[derive(Debug, Deserialize)]
struct FoundResource {
    id: String,
}

fn render(req: &LocateResourcesRequest, catalog: &[Resource]) -> String {
    let mut text = String::from(
        "You are a helpful assistant for finding disaster relief resources.\n\
         Your task is to identify relevant resources from the provided list based on \
         the user's query and optional location.\n\n",
    );
    let _ = writeln!(text, "User's query: \"{}\"", req.query.trim());
    if let Some(location) = req.location.as_deref().filter(|l| !l.trim().is_empty()) {
        let _ = writeln!(text, "User's approximate location: \"{}\"", location.trim());
    }
    text.push_str(
        "\nConsider keywords in the query like 'shelter', 'hospital', 'clinic', 'doctor', \
         'medical aid', 'food', 'water', 'emergency supplies'.\n\
         If a location is mentioned by the user, try to find resources whose address seems \
         to match or be near that area.\n\n\
         Here is the list of currently available resources:\n",
    );
    for resource in catalog {
        let _ = writeln!(text, "Resource ID: {}", resource.id);
        let _ = writeln!(text, "Name: {}", resource.name);
        let _ = writeln!(text, "Type: {}", resource.kind);
        let _ = writeln!(text, "Address: {}", resource.address);
        if let Some(contact) = &resource.contact {
            let _ = writeln!(text, "Contact: {}", contact);
        }
        if let Some(hours) = &resource.operating_hours {
            let _ = writeln!(text, "Operating Hours: {}", hours);
        }
        if let Some(notes) = &resource.notes {
            let _ = writeln!(text, "Notes: {}", notes);
        }
        text.push_str("---\n");
    }
    text.push_str(
        "\nAnalyze the user's request and the details of each resource.\n\
         Return ONLY the resources that directly and strongly match the user's request for \
         the type of resource and, if provided, the location.\n\
         If no resources clearly match, return an empty list for \"foundResources\".\n\
         Do not guess or infer too broadly. Stick to clear matches.\n",
    );
    text
}

fn output_schema() -> serde_json::Value {
    object_schema(&[(
        "foundResources",
        json!({
            "type": "ARRAY",
            "description": "A list of relevant resources found based on the query.",
            "items": object_schema(&[
                ("id", string_field("Resource ID from the provided list")),
                ("name", string_field("Resource name")),
            ]),
        }),
    )])
}

/// Catalog records for the ids the model picked, in the model's order.
/// Unknown and repeated ids are skipped.
fn select(catalog: Vec<Resource>, picked: Vec<FoundResource>) -> Vec<Resource> {
    let mut seen = HashSet::new();
    picked
        .into_iter()
        .filter(|found| seen.insert(found.id.clone()))
        .filter_map(|found| catalog.iter().find(|r| r.id == found.id).cloned())
        .collect()
}

pub struct LocateResourcesUseCase {
    client: Arc<dyn CompletionClient>,
    resources: Arc<dyn ResourceRepository>,
}

impl LocateResourcesUseCase {
    pub fn new(client: Arc<dyn CompletionClient>, resources: Arc<dyn ResourceRepository>) -> Self {
        Self { client, resources }
    }

    #[tracing::instrument(skip_all, fields(query = %req.query))]
    pub async fn execute(
        &self,
        req: LocateResourcesRequest,
    ) -> Result<LocateResourcesResponse, AppError> {
        let catalog = self.resources.find_all().await?;
        let request = PromptRequest {
            name: "locateResources",
            text: render(&req, &catalog),
            media: Vec::new(),
            output_schema: output_schema(),
        };

        let picked = match run_prompt::<LocatorOutput>(&self.client, request).await {
            Ok(output) => output.found_resources,
            Err(CompletionError::EmptyResponse) => Vec::new(),
            Err(e) => return Err(upstream_error(e, FAILURE_MESSAGE)),
        };

        let found_resources = select(catalog, picked);
        tracing::debug!(found = found_resources.len(), "resources located");
        Ok(LocateResourcesResponse { found_resources })
    }
}
