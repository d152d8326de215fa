use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// Locations offered on the signup form
pub const LOCATIONS: [&str; 15] = [
    "Kachin",
    "Kayah",
    "Kayin",
    "Chin",
    "Mon",
    "Rakhine",
    "Shan",
    "AyeYaWaddy",
    "Bago",
    "Magway",
    "Tanintharyi",
    "Yangon",
    "Mandalay",
    "Sagaing",
    "NayPyiDaw",
];

pub fn is_known_location(location: &str) -> bool {
    LOCATIONS.contains(&location)
}

/// Which document collection a profile lives in. User documents are written
/// at signup; admin documents are keyed by email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileCollection {
    Users,
    Admins,
}

impl ProfileCollection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileCollection::Users => "users",
            ProfileCollection::Admins => "admins",
        }
    }
}

impl fmt::Display for ProfileCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileCollection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "users" => Ok(ProfileCollection::Users),
            "admins" => Ok(ProfileCollection::Admins),
            _ => Err(format!("Unknown profile collection: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        };
        f.write_str(s)
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

/// A profile document. Every descriptive field is optional because admin
/// documents may be created by a partial save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub collection: ProfileCollection,
    pub email: String,
    pub uid: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<String>,
    pub location: Option<String>,
    #[serde(with = "time::serde::iso8601")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::iso8601")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewProfile {
    pub collection: ProfileCollection,
    pub email: String,
    pub uid: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<String>,
    pub location: Option<String>,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub uid: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<String>,
    pub location: Option<String>,
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn create(&self, profile: NewProfile) -> Result<Profile, anyhow::Error>;

    async fn find_by_email(
        &self,
        collection: ProfileCollection,
        email: &str,
    ) -> Result<Option<Profile>, anyhow::Error>;

    async fn find_all(
        &self,
        collection: ProfileCollection,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Profile>, anyhow::Error>;

    async fn count(&self, collection: ProfileCollection) -> Result<i64, anyhow::Error>;

    /// Apply the patch to an existing document. `None` when no document
    /// exists for the email.
    async fn update(
        &self,
        collection: ProfileCollection,
        email: &str,
        patch: ProfilePatch,
    ) -> Result<Option<Profile>, anyhow::Error>;

    /// Create the document if missing, otherwise merge the patch into it.
    async fn upsert_merge(
        &self,
        collection: ProfileCollection,
        email: &str,
        patch: ProfilePatch,
    ) -> Result<Profile, anyhow::Error>;
}
