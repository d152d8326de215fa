use crate::common;
use disaster_aid::domain::alerts::{AlertPreferences, AlertPreferencesRepository};
use disaster_aid::domain::auth::{NewSession, Role, SessionRepository};
use disaster_aid::domain::events::{Coordinates, EventFilter, EventRepository, NewDisasterEvent};
use disaster_aid::domain::profiles::{Gender, ProfileCollection, ProfilePatch, ProfileRepository};
use disaster_aid::domain::resources::{ResourceKind, ResourceRepository};
use disaster_aid::infrastructure::repositories::alerts::PostgresAlertPreferencesRepository;
use disaster_aid::infrastructure::repositories::events::PostgresEventRepository;
use disaster_aid::infrastructure::repositories::profiles::PostgresProfileRepository;
use disaster_aid::infrastructure::repositories::resources::PostgresResourceRepository;
use disaster_aid::infrastructure::repositories::sessions::PostgresSessionRepository;
use serial_test::serial;
use time::{Duration, OffsetDateTime};

#[tokio::test]
#[serial]
async fn test_profile_upsert_merge_and_update() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let repo = PostgresProfileRepository::new(pool.clone());

    let created = repo
        .upsert_merge(
            ProfileCollection::Users,
            "aung@example.com",
            ProfilePatch {
                uid: Some("uid-1".to_string()),
                full_name: Some("Aung Aung".to_string()),
                gender: Some(Gender::Male),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(created.location, None);

    let merged = repo
        .upsert_merge(
            ProfileCollection::Users,
            "aung@example.com",
            ProfilePatch {
                location: Some("Yangon".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(merged.id, created.id);
    assert_eq!(merged.full_name.as_deref(), Some("Aung Aung"));
    assert_eq!(merged.location.as_deref(), Some("Yangon"));
    assert_eq!(merged.gender, Some(Gender::Male));

    // Same email in the admin collection is a different document
    let missing = repo
        .update(
            ProfileCollection::Admins,
            "aung@example.com",
            ProfilePatch {
                phone: Some("09-123-4567".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(missing.is_none());
    assert_eq!(repo.count(ProfileCollection::Users).await.unwrap(), 1);
    assert_eq!(repo.count(ProfileCollection::Admins).await.unwrap(), 0);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_profile_listing_newest_first() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let repo = PostgresProfileRepository::new(pool.clone());

    for email in ["a@example.com", "b@example.com", "c@example.com"] {
        repo.upsert_merge(
            ProfileCollection::Users,
            email,
            ProfilePatch {
                full_name: Some(email.to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    let page = repo.find_all(ProfileCollection::Users, 2, 0).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].email, "c@example.com");

    let rest = repo.find_all(ProfileCollection::Users, 2, 2).await.unwrap();
    assert_eq!(rest.len(), 1);
    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_sessions_lifecycle() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let repo = PostgresSessionRepository::new(pool.clone());

    let session = |hash: &str, expires_at: OffsetDateTime| NewSession {
        uid: "uid-1".to_string(),
        email: "user@example.com".to_string(),
        role: Role::Admin,
        token_hash: hash.to_string(),
        provider_refresh_token: format!("provider-{}", hash),
        expires_at,
    };
    let now = OffsetDateTime::now_utc();

    repo.create(session("live", now + Duration::hours(1))).await.unwrap();
    repo.create(session("stale", now - Duration::hours(1))).await.unwrap();

    let found = repo.find_by_hash("live").await.unwrap().unwrap();
    assert_eq!(found.role, Role::Admin);
    assert_eq!(found.provider_refresh_token, "provider-live");

    assert_eq!(repo.delete_expired().await.unwrap(), 1);
    assert!(repo.find_by_hash("stale").await.unwrap().is_none());

    assert!(repo.delete_by_hash("live").await.unwrap());
    assert!(!repo.delete_by_hash("live").await.unwrap());

    repo.create(session("one", now + Duration::hours(1))).await.unwrap();
    repo.create(session("two", now + Duration::hours(1))).await.unwrap();
    assert_eq!(repo.delete_by_uid("uid-1").await.unwrap(), 2);
    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_events_create_and_filter() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let repo = PostgresEventRepository::new(pool.clone());

    let now = common::now_ms();
    let created = repo
        .create(NewDisasterEvent {
            kind: "Tsunami".to_string(),
            magnitude: 7.2,
            place: "Off the coast of Rakhine".to_string(),
            time: now,
            coordinates: Coordinates {
                latitude: 19.5,
                longitude: 93.5,
            },
            depth: 0.0,
        })
        .await
        .unwrap();

    let fetched = repo.find_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);

    let filter = EventFilter {
        kind: Some("tsunami".to_string()),
        ..Default::default()
    };
    assert_eq!(repo.count(&filter).await.unwrap(), 1);

    let recent = repo
        .find_recent(
            &EventFilter {
                since: Some(now - 1_000),
                ..Default::default()
            },
            10,
            0,
        )
        .await
        .unwrap();
    assert_eq!(recent[0].id, created.id);

    let strong = repo
        .find_recent(
            &EventFilter {
                min_magnitude: Some(7.0),
                ..Default::default()
            },
            10,
            0,
        )
        .await
        .unwrap();
    assert!(strong.iter().all(|e| e.magnitude >= 7.0));
    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_seeded_resources() {
    let pool = setup_test_db_or_skip!();
    let repo = PostgresResourceRepository::new(pool.clone());

    let all = repo.find_all().await.unwrap();
    assert!(all.iter().any(|r| r.id == "res-001"));

    let medical = repo.find_by_kind(ResourceKind::Medical).await.unwrap();
    assert!(!medical.is_empty());
    assert!(medical.iter().all(|r| r.kind == ResourceKind::Medical));
}

#[tokio::test]
#[serial]
async fn test_alert_preferences_upsert() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let repo = PostgresAlertPreferencesRepository::new(pool.clone());

    assert!(repo.find("uid-1").await.unwrap().is_none());

    repo.save("uid-1", AlertPreferences::default()).await.unwrap();
    let saved = repo
        .save(
            "uid-1",
            AlertPreferences {
                notifications_enabled: false,
                location: "Bago".to_string(),
                magnitude_threshold: 3.0,
            },
        )
        .await
        .unwrap();
    assert_eq!(repo.find("uid-1").await.unwrap(), Some(saved));
    common::cleanup_test_db(&pool).await;
}
