use crate::application::admin::roles::{RoleAssignmentRequest, RoleAssignmentResponse};
use crate::application::alerts::preferences::{
    AlertPreferencesResponse, SaveAlertPreferencesRequest,
};
use crate::application::assistant::chat::{ChatRequest, ChatResponse};
use crate::application::assistant::disaster_info::{DisasterInfoRequest, DisasterInfoResponse};
use crate::application::assistant::earthquake_info::{
    EarthquakeInfoRequest, EarthquakeInfoResponse,
};
use crate::application::assistant::locate_resources::{
    LocateResourcesRequest, LocateResourcesResponse,
};
use crate::application::assistant::safety_tips::{SafetyTipsRequest, SafetyTipsResponse};
use crate::application::assistant::severity::{
    SeverityAssessmentRequest, SeverityAssessmentResponse,
};
use crate::application::auth::login::LoginRequest;
use crate::application::auth::logout::LogoutRequest;
use crate::application::auth::refresh::RefreshTokenRequest;
use crate::application::auth::signup::SignupRequest;
use crate::application::auth::token_utils::TokenResponse;
use crate::application::events::create::CreateEventRequest;
use crate::application::events::map_config::MapConfig;
use crate::application::profiles::get::ProfileResponse;
use crate::application::profiles::save::SaveProfileRequest;
use crate::domain::assistant::{ChatMessage, Sender};
use crate::domain::auth::Role;
use crate::domain::emergency::EmergencyContact;
use crate::domain::events::{Coordinates, DisasterEvent, MapMarker, MapPosition};
use crate::domain::resources::{Resource, ResourceKind};
use crate::presentation::dtos::CurrentUserResource;
use crate::shared::error::{ErrorResponse, JsonApiError, JsonApiErrorSource};
use crate::shared::response::{JsonApiLinks, JsonApiMeta};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Disaster Aid API",
        version = "0.1.0",
        description = "Disaster information backend: accounts and profiles, recent events and map markers, relief resources, alerts, and an AI assistant.\n\nResponses follow the JSON:API v1.1 document structure."
    ),
    paths(
        crate::presentation::handlers::health::health_check,
        crate::presentation::client::handlers::auth::signup,
        crate::presentation::client::handlers::auth::login,
        crate::presentation::client::handlers::auth::refresh_token,
        crate::presentation::client::handlers::auth::logout,
        crate::presentation::client::handlers::auth::me,
        crate::presentation::client::handlers::profile::get_profile,
        crate::presentation::client::handlers::profile::save_profile,
        crate::presentation::client::handlers::assistant::disaster_info,
        crate::presentation::client::handlers::assistant::earthquake_info,
        crate::presentation::client::handlers::assistant::safety_tips,
        crate::presentation::client::handlers::assistant::assess_severity,
        crate::presentation::client::handlers::assistant::assess_severity_upload,
        crate::presentation::client::handlers::assistant::chat,
        crate::presentation::client::handlers::assistant::locate_resources,
        crate::presentation::client::handlers::events::list_events,
        crate::presentation::client::handlers::events::get_event,
        crate::presentation::client::handlers::events::list_markers,
        crate::presentation::client::handlers::events::get_map_config,
        crate::presentation::client::handlers::resources::list_resources,
        crate::presentation::client::handlers::alerts::get_preferences,
        crate::presentation::client::handlers::alerts::save_preferences,
        crate::presentation::client::handlers::alerts::matching_alerts,
        crate::presentation::client::handlers::emergency::list_contacts,
        crate::presentation::admin::handlers::roles::set_admin,
        crate::presentation::admin::handlers::roles::remove_admin,
        crate::presentation::admin::handlers::profiles::get_own_profile,
        crate::presentation::admin::handlers::profiles::save_own_profile,
        crate::presentation::admin::handlers::profiles::get_admin_profile,
        crate::presentation::admin::handlers::profiles::list_users,
        crate::presentation::admin::handlers::events::create_event,
    ),
    components(
        schemas(
            SignupRequest,
            LoginRequest,
            RefreshTokenRequest,
            LogoutRequest,
            TokenResponse,
            CurrentUserResource,
            Role,
            SaveProfileRequest,
            ProfileResponse,
            RoleAssignmentRequest,
            RoleAssignmentResponse,
            DisasterInfoRequest,
            DisasterInfoResponse,
            EarthquakeInfoRequest,
            EarthquakeInfoResponse,
            SafetyTipsRequest,
            SafetyTipsResponse,
            SeverityAssessmentRequest,
            SeverityAssessmentResponse,
            ChatRequest,
            ChatResponse,
            ChatMessage,
            Sender,
            LocateResourcesRequest,
            LocateResourcesResponse,
            Resource,
            ResourceKind,
            CreateEventRequest,
            DisasterEvent,
            Coordinates,
            MapMarker,
            MapPosition,
            MapConfig,
            AlertPreferencesResponse,
            SaveAlertPreferencesRequest,
            EmergencyContact,
            JsonApiMeta,
            JsonApiLinks,
            ErrorResponse,
            JsonApiError,
            JsonApiErrorSource,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Client / Auth", description = "Sign-up, login and sessions"),
        (name = "Client / Profile", description = "The caller's user profile"),
        (name = "Client / Assistant", description = "AI disaster assistant"),
        (name = "Client / Events", description = "Recent disaster events"),
        (name = "Client / Map", description = "Map markers and configuration"),
        (name = "Client / Resources", description = "Relief resource catalog"),
        (name = "Client / Alerts", description = "Alert preferences and matches"),
        (name = "Client / Emergency", description = "Emergency phone numbers"),
        (name = "Admin / Roles", description = "Admin role assignment"),
        (name = "Admin / Profiles", description = "Admin and user profiles"),
        (name = "Admin / Events", description = "Event recording")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
