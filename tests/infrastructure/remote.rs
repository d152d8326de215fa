use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use disaster_aid::domain::assistant::{CompletionClient, CompletionError, PromptRequest};
use disaster_aid::domain::auth::Role;
use disaster_aid::domain::identity::{IdentityError, IdentityProvider};
use disaster_aid::infrastructure::completion::GeminiClient;
use disaster_aid::infrastructure::config::{FirebaseConfig, GeminiConfig};
use disaster_aid::infrastructure::identity::FirebaseIdentityProvider;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Serve the router on an ephemeral port and return its base URL
async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn id_token(claims: Value) -> String {
    encode(&Header::default(), &claims, &EncodingKey::from_secret(b"stub")).unwrap()
}

async fn identity_toolkit(uri: Uri, Json(body): Json<Value>) -> impl IntoResponse {
    let email = body["email"]
        .as_str()
        .or_else(|| body["email"][0].as_str())
        .unwrap_or_default()
        .to_string();

    match uri.path() {
        "/v1/accounts:signUp" if email == "taken@example.com" => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "code": 400, "message": "EMAIL_EXISTS" } })),
        ),
        "/v1/accounts:signUp" | "/v1/accounts:signInWithPassword" => (
            StatusCode::OK,
            Json(json!({
                "localId": "uid-42",
                "email": email,
                "idToken": id_token(json!({ "sub": "uid-42", "email": email, "admin": true })),
                "refreshToken": "provider-refresh",
                "expiresIn": "3600"
            })),
        ),
        "/v1/projects/demo/accounts:lookup" => (
            StatusCode::OK,
            Json(json!({
                "users": [{
                    "localId": "uid-7",
                    "email": email,
                    "customAttributes": "{\"admin\":true}"
                }]
            })),
        ),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "message": "NOT_FOUND" } })),
        ),
    }
}

fn firebase(base_url: &str, service_token: Option<&str>) -> FirebaseIdentityProvider {
    FirebaseIdentityProvider::new(&FirebaseConfig {
        api_key: "web-key".to_string(),
        project_id: "demo".to_string(),
        service_token: service_token.map(str::to_string),
    })
    .with_base_url(base_url)
}

#[tokio::test]
async fn test_firebase_sign_up_reads_claims() {
    let base = spawn(Router::new().fallback(identity_toolkit)).await;
    let provider = firebase(&base, None);

    let session = provider
        .sign_up("new@example.com", "Str0ng!pass")
        .await
        .unwrap();
    assert_eq!(session.identity.uid, "uid-42");
    assert_eq!(session.identity.role(), Role::Admin);
    assert_eq!(session.refresh_token, "provider-refresh");
    assert_eq!(session.expires_in, 3600);

    assert!(matches!(
        provider.sign_up("taken@example.com", "Str0ng!pass").await,
        Err(IdentityError::EmailExists)
    ));
}

#[tokio::test]
async fn test_firebase_lookup_needs_service_token() {
    let base = spawn(Router::new().fallback(identity_toolkit)).await;

    assert!(matches!(
        firebase(&base, None).find_by_email("a@example.com").await,
        Err(IdentityError::Upstream(_))
    ));

    let found = firebase(&base, Some("svc"))
        .find_by_email("a@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.uid, "uid-7");
    assert_eq!(found.role(), Role::Admin);
}

async fn generate_content(uri: Uri, Json(body): Json<Value>) -> impl IntoResponse {
    if !uri.path().ends_with(":generateContent") {
        return (StatusCode::NOT_FOUND, Json(json!({})));
    }
    if body["contents"][0]["parts"][0]["text"] == "fail" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": { "message": "boom" } })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"answer\": \"Stay calm.\"}" }] }
            }]
        })),
    )
}

fn gemini(base_url: &str, api_key: Option<&str>) -> GeminiClient {
    GeminiClient::new(&GeminiConfig {
        api_key: api_key.map(str::to_string),
        model: "gemini-2.0-flash".to_string(),
    })
    .with_base_url(base_url)
}

fn prompt(text: &str) -> PromptRequest {
    PromptRequest {
        name: "disasterInfo",
        text: text.to_string(),
        media: Vec::new(),
        output_schema: json!({ "type": "OBJECT" }),
    }
}

#[tokio::test]
async fn test_gemini_generate() {
    let base = spawn(Router::new().fallback(generate_content)).await;
    let client = gemini(&base, Some("key"));

    let output = client.generate(prompt("What now?")).await.unwrap();
    assert_eq!(output["answer"], "Stay calm.");

    assert!(matches!(
        client.generate(prompt("fail")).await,
        Err(CompletionError::Request(_))
    ));
}

#[tokio::test]
async fn test_gemini_without_key() {
    let base = spawn(Router::new().fallback(generate_content)).await;
    assert!(matches!(
        gemini(&base, None).generate(prompt("What now?")).await,
        Err(CompletionError::Request(_))
    ));
}
