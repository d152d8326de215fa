//! In-memory repositories backing the unit and router tests.

use crate::domain::alerts::{AlertPreferences, AlertPreferencesRepository};
use crate::domain::auth::{NewSession, Session, SessionRepository};
use crate::domain::events::{DisasterEvent, EventFilter, EventRepository, NewDisasterEvent};
use crate::domain::profiles::{
    NewProfile, Profile, ProfileCollection, ProfilePatch, ProfileRepository,
};
use crate::domain::resources::{Resource, ResourceKind, ResourceRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct MockProfileRepository {
    profiles: Arc<Mutex<Vec<Profile>>>,
}

impl MockProfileRepository {
    fn merge(profile: &mut Profile, patch: ProfilePatch) {
        if let Some(uid) = patch.uid {
            profile.uid = Some(uid);
        }
        if let Some(full_name) = patch.full_name {
            profile.full_name = Some(full_name);
        }
        if let Some(phone) = patch.phone {
            profile.phone = Some(phone);
        }
        if let Some(gender) = patch.gender {
            profile.gender = Some(gender);
        }
        if let Some(date_of_birth) = patch.date_of_birth {
            profile.date_of_birth = Some(date_of_birth);
        }
        if let Some(location) = patch.location {
            profile.location = Some(location);
        }
        profile.updated_at = OffsetDateTime::now_utc();
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn create(&self, new_profile: NewProfile) -> Result<Profile, anyhow::Error> {
        let mut profiles = self.profiles.lock().unwrap();
        if profiles
            .iter()
            .any(|p| p.collection == new_profile.collection && p.email == new_profile.email)
        {
            return Err(anyhow::anyhow!("duplicate profile for {}", new_profile.email));
        }

        let now = OffsetDateTime::now_utc();
        let profile = Profile {
            id: Uuid::new_v4(),
            collection: new_profile.collection,
            email: new_profile.email,
            uid: new_profile.uid,
            full_name: new_profile.full_name,
            phone: new_profile.phone,
            gender: new_profile.gender,
            date_of_birth: new_profile.date_of_birth,
            location: new_profile.location,
            created_at: now,
            updated_at: now,
        };
        profiles.push(profile.clone());
        Ok(profile)
    }

    async fn find_by_email(
        &self,
        collection: ProfileCollection,
        email: &str,
    ) -> Result<Option<Profile>, anyhow::Error> {
        let profiles = self.profiles.lock().unwrap();
        Ok(profiles
            .iter()
            .find(|p| p.collection == collection && p.email == email)
            .cloned())
    }

    async fn find_all(
        &self,
        collection: ProfileCollection,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Profile>, anyhow::Error> {
        let profiles = self.profiles.lock().unwrap();
        Ok(profiles
            .iter()
            .rev()
            .filter(|p| p.collection == collection)
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, collection: ProfileCollection) -> Result<i64, anyhow::Error> {
        let profiles = self.profiles.lock().unwrap();
        Ok(profiles.iter().filter(|p| p.collection == collection).count() as i64)
    }

    async fn update(
        &self,
        collection: ProfileCollection,
        email: &str,
        patch: ProfilePatch,
    ) -> Result<Option<Profile>, anyhow::Error> {
        let mut profiles = self.profiles.lock().unwrap();
        Ok(profiles
            .iter_mut()
            .find(|p| p.collection == collection && p.email == email)
            .map(|profile| {
                Self::merge(profile, patch);
                profile.clone()
            }))
    }

    async fn upsert_merge(
        &self,
        collection: ProfileCollection,
        email: &str,
        patch: ProfilePatch,
    ) -> Result<Profile, anyhow::Error> {
        if let Some(profile) = self.update(collection, email, patch.clone()).await? {
            return Ok(profile);
        }
        self.create(NewProfile {
            collection,
            email: email.to_string(),
            uid: patch.uid,
            full_name: patch.full_name,
            phone: patch.phone,
            gender: patch.gender,
            date_of_birth: patch.date_of_birth,
            location: patch.location,
        })
        .await
    }
}

#[derive(Clone, Default)]
pub struct MockSessionRepository {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn create(&self, new_session: NewSession) -> Result<Session, anyhow::Error> {
        let session = Session {
            id: Uuid::new_v4(),
            uid: new_session.uid,
            email: new_session.email,
            role: new_session.role,
            token_hash: new_session.token_hash,
            provider_refresh_token: new_session.provider_refresh_token,
            expires_at: new_session.expires_at,
            created_at: OffsetDateTime::now_utc(),
        };
        self.sessions
            .lock()
            .unwrap()
            .insert(session.token_hash.clone(), session.clone());
        Ok(session)
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<Session>, anyhow::Error> {
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions
            .get(token_hash)
            .filter(|s| s.expires_at > OffsetDateTime::now_utc())
            .cloned())
    }

    async fn delete_by_hash(&self, token_hash: &str) -> Result<bool, anyhow::Error> {
        Ok(self.sessions.lock().unwrap().remove(token_hash).is_some())
    }

    async fn delete_by_uid(&self, uid: &str) -> Result<u64, anyhow::Error> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, s| s.uid != uid);
        Ok((before - sessions.len()) as u64)
    }

    async fn delete_expired(&self) -> Result<u64, anyhow::Error> {
        let now = OffsetDateTime::now_utc();
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        Ok((before - sessions.len()) as u64)
    }
}

#[derive(Clone, Default)]
pub struct MockEventRepository {
    events: Arc<Mutex<Vec<DisasterEvent>>>,
}

impl MockEventRepository {
    pub fn with_events(events: Vec<DisasterEvent>) -> Self {
        Self {
            events: Arc::new(Mutex::new(events)),
        }
    }

    fn matching(&self, filter: &EventFilter) -> Vec<DisasterEvent> {
        let mut events: Vec<DisasterEvent> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        events.sort_by(|a, b| b.time.cmp(&a.time));
        events
    }
}

#[async_trait]
impl EventRepository for MockEventRepository {
    async fn create(&self, new_event: NewDisasterEvent) -> Result<DisasterEvent, anyhow::Error> {
        let event = DisasterEvent {
            id: Uuid::new_v4().simple().to_string(),
            kind: new_event.kind,
            magnitude: new_event.magnitude,
            place: new_event.place,
            time: new_event.time,
            coordinates: new_event.coordinates,
            depth: new_event.depth,
        };
        self.events.lock().unwrap().push(event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<DisasterEvent>, anyhow::Error> {
        let events = self.events.lock().unwrap();
        Ok(events.iter().find(|e| e.id == id).cloned())
    }

    async fn find_recent(
        &self,
        filter: &EventFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DisasterEvent>, anyhow::Error> {
        Ok(self
            .matching(filter)
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self, filter: &EventFilter) -> Result<i64, anyhow::Error> {
        Ok(self.matching(filter).len() as i64)
    }
}

#[derive(Clone, Default)]
pub struct MockResourceRepository {
    resources: Arc<Vec<Resource>>,
}

impl MockResourceRepository {
    pub fn with_resources(resources: Vec<Resource>) -> Self {
        Self {
            resources: Arc::new(resources),
        }
    }
}

#[async_trait]
impl ResourceRepository for MockResourceRepository {
    async fn find_all(&self) -> Result<Vec<Resource>, anyhow::Error> {
        Ok(self.resources.to_vec())
    }

    async fn find_by_kind(&self, kind: ResourceKind) -> Result<Vec<Resource>, anyhow::Error> {
        Ok(self
            .resources
            .iter()
            .filter(|r| r.kind == kind)
            .cloned()
            .collect())
    }
}

#[derive(Clone, Default)]
pub struct MockAlertPreferencesRepository {
    preferences: Arc<Mutex<HashMap<String, AlertPreferences>>>,
}

#[async_trait]
impl AlertPreferencesRepository for MockAlertPreferencesRepository {
    async fn find(&self, uid: &str) -> Result<Option<AlertPreferences>, anyhow::Error> {
        Ok(self.preferences.lock().unwrap().get(uid).cloned())
    }

    async fn save(
        &self,
        uid: &str,
        preferences: AlertPreferences,
    ) -> Result<AlertPreferences, anyhow::Error> {
        self.preferences
            .lock()
            .unwrap()
            .insert(uid.to_string(), preferences.clone());
        Ok(preferences)
    }
}
