use crate::domain::alerts::AlertPreferencesRepository;
use crate::domain::assistant::CompletionClient;
use crate::domain::auth::SessionRepository;
use crate::domain::events::EventRepository;
use crate::domain::identity::IdentityProvider;
use crate::domain::profiles::ProfileRepository;
use crate::domain::resources::ResourceRepository;
use crate::infrastructure::auth::JwtAuthService;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::repositories::alerts::PostgresAlertPreferencesRepository;
use crate::infrastructure::repositories::events::PostgresEventRepository;
use crate::infrastructure::repositories::mock::{
    MockAlertPreferencesRepository, MockEventRepository, MockProfileRepository,
    MockResourceRepository, MockSessionRepository,
};
use crate::infrastructure::repositories::profiles::PostgresProfileRepository;
use crate::infrastructure::repositories::resources::PostgresResourceRepository;
use crate::infrastructure::repositories::sessions::PostgresSessionRepository;
use std::sync::Arc;

/// Storage handles used by the use cases
#[derive(Clone)]
pub struct Repositories {
    pub profiles: Arc<dyn ProfileRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub events: Arc<dyn EventRepository>,
    pub resources: Arc<dyn ResourceRepository>,
    pub alerts: Arc<dyn AlertPreferencesRepository>,
}

impl Repositories {
    pub fn postgres(pool: &DbPool) -> Self {
        Self {
            profiles: Arc::new(PostgresProfileRepository::new(pool.clone())),
            sessions: Arc::new(PostgresSessionRepository::new(pool.clone())),
            events: Arc::new(PostgresEventRepository::new(pool.clone())),
            resources: Arc::new(PostgresResourceRepository::new(pool.clone())),
            alerts: Arc::new(PostgresAlertPreferencesRepository::new(pool.clone())),
        }
    }

    /// Empty in-memory stores
    pub fn in_memory() -> Self {
        Self {
            profiles: Arc::new(MockProfileRepository::default()),
            sessions: Arc::new(MockSessionRepository::default()),
            events: Arc::new(MockEventRepository::default()),
            resources: Arc::new(MockResourceRepository::default()),
            alerts: Arc::new(MockAlertPreferencesRepository::default()),
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub auth_service: Arc<JwtAuthService>,
    pub identity: Arc<dyn IdentityProvider>,
    pub completion: Arc<dyn CompletionClient>,
    pub repos: Repositories,
    /// Browser key for the map tiles; exposed through the map config
    pub maps_api_key: Option<String>,
}

impl AppState {
    pub fn new(
        pool: DbPool,
        auth_service: Arc<JwtAuthService>,
        identity: Arc<dyn IdentityProvider>,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        let repos = Repositories::postgres(&pool);
        Self {
            pool,
            auth_service,
            identity,
            completion,
            repos,
            maps_api_key: None,
        }
    }

    pub fn with_repositories(mut self, repos: Repositories) -> Self {
        self.repos = repos;
        self
    }

    pub fn with_maps_api_key(mut self, key: Option<String>) -> Self {
        self.maps_api_key = key;
        self
    }
}
