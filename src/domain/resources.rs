use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::events::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Shelter,
    Medical,
    Food,
    Water,
    Other,
}

impl ResourceKind {
    pub fn all() -> [ResourceKind; 5] {
        [
            ResourceKind::Shelter,
            ResourceKind::Medical,
            ResourceKind::Food,
            ResourceKind::Water,
            ResourceKind::Other,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Shelter => "shelter",
            ResourceKind::Medical => "medical",
            ResourceKind::Food => "food",
            ResourceKind::Water => "water",
            ResourceKind::Other => "other",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::all()
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown resource type: {}", s))
    }
}

/// A relief resource (shelter, clinic, food bank, water point...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[async_trait]
pub trait ResourceRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Resource>, anyhow::Error>;

    async fn find_by_kind(&self, kind: ResourceKind) -> Result<Vec<Resource>, anyhow::Error>;
}
