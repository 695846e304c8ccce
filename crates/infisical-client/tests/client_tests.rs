//! Integration tests for the Infisical client against an in-process fake API.
//!
//! The fake binds `127.0.0.1:0`, so tests run in parallel without port
//! clashes and without network access.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use infisical_client::types::{
    CreateSecretOptions, GetSecretOptions, ListSecretsOptions, SignOptions, SigningAlgorithm,
};
use infisical_client::{Credentials, InfisicalClient, InfisicalConfig, InfisicalError};

#[derive(Default)]
struct FakeApi {
    logins: AtomicUsize,
    /// Reject this many authenticated calls with 401 before accepting.
    reject_tokens: AtomicUsize,
    /// Answer this many secret reads with 503 before succeeding.
    unavailable: AtomicUsize,
    secret_reads: AtomicUsize,
    /// Token lifetime handed out at login, in seconds. Zero means 7200.
    expires_in: AtomicU64,
    /// Hold each login this long before answering.
    login_delay_ms: AtomicU64,
    last_query: std::sync::Mutex<HashMap<String, String>>,
    last_body: std::sync::Mutex<Value>,
}

fn authorized(api: &FakeApi, headers: &HeaderMap) -> bool {
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !bearer.starts_with("Bearer ") {
        return false;
    }
    if api.reject_tokens.load(Ordering::SeqCst) > 0 {
        api.reject_tokens.fetch_sub(1, Ordering::SeqCst);
        return false;
    }
    true
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "statusCode": 401, "message": "Token invalid", "error": "UnauthorizedError" })),
    )
        .into_response()
}

async fn login(State(api): State<Arc<FakeApi>>, Json(body): Json<Value>) -> Response {
    if body["clientId"] != "id" || body["clientSecret"] != "secret" {
        return unauthorized();
    }
    let n = api.logins.fetch_add(1, Ordering::SeqCst) + 1;
    let delay = api.login_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    let expires_in = match api.expires_in.load(Ordering::SeqCst) {
        0 => 7200,
        secs => secs,
    };
    Json(json!({
        "accessToken": format!("token-{n}"),
        "expiresIn": expires_in,
        "accessTokenMaxTTL": 43200,
        "tokenType": "Bearer"
    }))
    .into_response()
}

fn secret_json(name: &str, env: &str, workspace: &str, value: &str) -> Value {
    json!({
        "id": format!("id-{name}"),
        "_id": format!("id-{name}"),
        "workspace": workspace,
        "environment": env,
        "version": 1,
        "type": "shared",
        "secretKey": name,
        "secretValue": value,
        "secretComment": ""
    })
}

async fn get_secret(
    State(api): State<Arc<FakeApi>>,
    headers: HeaderMap,
    Path(name): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&api, &headers) {
        return unauthorized();
    }
    api.secret_reads.fetch_add(1, Ordering::SeqCst);
    if api.unavailable.load(Ordering::SeqCst) > 0 {
        api.unavailable.fetch_sub(1, Ordering::SeqCst);
        return (StatusCode::SERVICE_UNAVAILABLE, "busy").into_response();
    }
    *api.last_query.lock().unwrap() = query.clone();
    if name == "MISSING" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "statusCode": 404, "message": "Secret with name 'MISSING' not found", "error": "NotFound" })),
        )
            .into_response();
    }
    let env = query.get("environment").cloned().unwrap_or_default();
    let ws = query.get("workspaceId").cloned().unwrap_or_default();
    Json(json!({ "secret": secret_json(&name, &env, &ws, "value-1") })).into_response()
}

async fn create_secret(
    State(api): State<Arc<FakeApi>>,
    headers: HeaderMap,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&api, &headers) {
        return unauthorized();
    }
    *api.last_body.lock().unwrap() = body.clone();
    let secret = secret_json(
        &name,
        body["environment"].as_str().unwrap_or_default(),
        body["workspaceId"].as_str().unwrap_or_default(),
        body["secretValue"].as_str().unwrap_or_default(),
    );
    Json(json!({ "secret": secret })).into_response()
}

async fn list_secrets(
    State(api): State<Arc<FakeApi>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&api, &headers) {
        return unauthorized();
    }
    *api.last_query.lock().unwrap() = query;
    Json(json!({
        "secrets": [secret_json("A", "dev", "p", "1"), secret_json("B", "dev", "p", "2")]
    }))
    .into_response()
}

async fn sign(
    State(api): State<Arc<FakeApi>>,
    headers: HeaderMap,
    Path(key_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&api, &headers) {
        return unauthorized();
    }
    Json(json!({
        "signature": "c2lnbmF0dXJl",
        "keyId": key_id,
        "signingAlgorithm": body["signingAlgorithm"]
    }))
    .into_response()
}

async fn spawn_fake(api: Arc<FakeApi>) -> String {
    let app = Router::new()
        .route("/api/v1/auth/universal-auth/login", post(login))
        .route("/api/v3/secrets/raw", get(list_secrets))
        .route(
            "/api/v3/secrets/raw/{name}",
            get(get_secret).post(create_secret),
        )
        .route("/api/v1/kms/keys/{key_id}/sign", post(sign))
        .with_state(api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

fn client_for(site_url: String, credentials: Credentials) -> InfisicalClient {
    InfisicalClient::with_config(InfisicalConfig {
        credentials,
        site_url,
        timeout: Duration::from_secs(5),
        max_retries: 2,
    })
    .unwrap()
}

fn machine_identity() -> Credentials {
    Credentials::UniversalAuth {
        client_id: "id".to_owned(),
        client_secret: "secret".to_owned(),
    }
}

// ── Authentication ───────────────────────────────────────────────────

#[tokio::test]
async fn login_happens_once_for_many_calls() {
    let api = Arc::new(FakeApi::default());
    let client = client_for(spawn_fake(Arc::clone(&api)).await, machine_identity());
    let opts = GetSecretOptions::new("proj-1", "dev");

    for _ in 0..3 {
        client.secrets().get("API_KEY", &opts).await.unwrap();
    }

    assert_eq!(api.logins.load(Ordering::SeqCst), 1);
    assert_eq!(api.secret_reads.load(Ordering::SeqCst), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_calls_share_one_login() {
    let api = Arc::new(FakeApi::default());
    api.login_delay_ms.store(100, Ordering::SeqCst);
    let client = Arc::new(client_for(
        spawn_fake(Arc::clone(&api)).await,
        machine_identity(),
    ));

    let calls: Vec<_> = (0..8)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move {
                client
                    .secrets()
                    .get("API_KEY", &GetSecretOptions::new("proj-1", "dev"))
                    .await
            })
        })
        .collect();
    for call in calls {
        call.await.unwrap().unwrap();
    }

    assert_eq!(api.logins.load(Ordering::SeqCst), 1);
    assert_eq!(api.secret_reads.load(Ordering::SeqCst), 8);
}

#[tokio::test]
async fn token_inside_the_refresh_margin_is_replaced() {
    let api = Arc::new(FakeApi::default());
    // Ten seconds is inside the 30 second margin, so the token is stale
    // as soon as it arrives.
    api.expires_in.store(10, Ordering::SeqCst);
    let client = client_for(spawn_fake(Arc::clone(&api)).await, machine_identity());
    let opts = GetSecretOptions::new("proj-1", "dev");

    client.secrets().get("API_KEY", &opts).await.unwrap();
    client.secrets().get("API_KEY", &opts).await.unwrap();

    assert_eq!(api.logins.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn token_outside_the_refresh_margin_is_reused() {
    let api = Arc::new(FakeApi::default());
    api.expires_in.store(90, Ordering::SeqCst);
    let client = client_for(spawn_fake(Arc::clone(&api)).await, machine_identity());
    let opts = GetSecretOptions::new("proj-1", "dev");

    client.secrets().get("API_KEY", &opts).await.unwrap();
    client.secrets().get("API_KEY", &opts).await.unwrap();

    assert_eq!(api.logins.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rejected_token_triggers_one_fresh_login() {
    let api = Arc::new(FakeApi::default());
    let client = client_for(spawn_fake(Arc::clone(&api)).await, machine_identity());
    client.authenticate().await.unwrap();

    api.reject_tokens.store(1, Ordering::SeqCst);
    let secret = client
        .secrets()
        .get("API_KEY", &GetSecretOptions::new("proj-1", "dev"))
        .await
        .unwrap();

    assert_eq!(secret.secret.secret_key, "API_KEY");
    assert_eq!(api.logins.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn pre_issued_token_never_logs_in_and_surfaces_401() {
    let api = Arc::new(FakeApi::default());
    let client = client_for(
        spawn_fake(Arc::clone(&api)).await,
        Credentials::AccessToken("static-token".to_owned()),
    );

    api.reject_tokens.store(1, Ordering::SeqCst);
    let err = client
        .secrets()
        .get("API_KEY", &GetSecretOptions::new("proj-1", "dev"))
        .await
        .unwrap_err();

    assert!(matches!(err, InfisicalError::Auth { status_code: 401, .. }));
    assert_eq!(api.logins.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn bad_credentials_fail_authentication() {
    let api = Arc::new(FakeApi::default());
    let client = client_for(
        spawn_fake(Arc::clone(&api)).await,
        Credentials::UniversalAuth {
            client_id: "id".to_owned(),
            client_secret: "wrong".to_owned(),
        },
    );

    let err = client.authenticate().await.unwrap_err();
    assert!(matches!(err, InfisicalError::Auth { status_code: 401, .. }));
}

// ── Secrets ──────────────────────────────────────────────────────────

#[tokio::test]
async fn get_sends_scope_as_query_parameters() {
    let api = Arc::new(FakeApi::default());
    let client = client_for(spawn_fake(Arc::clone(&api)).await, machine_identity());

    let opts = GetSecretOptions {
        secret_path: Some("/backend".to_owned()),
        version: Some(4),
        ..GetSecretOptions::new("proj-9", "staging")
    };
    let resp = client.secrets().get("DB_URL", &opts).await.unwrap();

    assert_eq!(resp.secret.environment, "staging");
    assert_eq!(resp.secret.workspace.as_deref(), Some("proj-9"));
    let query = api.last_query.lock().unwrap().clone();
    assert_eq!(query.get("secretPath").map(String::as_str), Some("/backend"));
    assert_eq!(query.get("version").map(String::as_str), Some("4"));
}

#[tokio::test]
async fn missing_secret_maps_to_not_found() {
    let api = Arc::new(FakeApi::default());
    let client = client_for(spawn_fake(Arc::clone(&api)).await, machine_identity());

    let err = client
        .secrets()
        .get("MISSING", &GetSecretOptions::new("proj-1", "dev"))
        .await
        .unwrap_err();

    match err {
        InfisicalError::NotFound(message) => assert!(message.contains("MISSING")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn transient_unavailability_is_retried() {
    let api = Arc::new(FakeApi::default());
    let client = client_for(spawn_fake(Arc::clone(&api)).await, machine_identity());
    api.unavailable.store(1, Ordering::SeqCst);

    let resp = client
        .secrets()
        .get("API_KEY", &GetSecretOptions::new("proj-1", "dev"))
        .await
        .unwrap();

    assert_eq!(resp.secret.secret_value.as_deref(), Some("value-1"));
    assert_eq!(api.secret_reads.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn persistent_unavailability_gives_up_after_retries() {
    let api = Arc::new(FakeApi::default());
    let client = client_for(spawn_fake(Arc::clone(&api)).await, machine_identity());
    api.unavailable.store(10, Ordering::SeqCst);

    let err = client
        .secrets()
        .get("API_KEY", &GetSecretOptions::new("proj-1", "dev"))
        .await
        .unwrap_err();

    assert!(matches!(err, InfisicalError::Api { status_code: 503, .. }));
    // One attempt plus two retries.
    assert_eq!(api.secret_reads.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn create_posts_workspace_scoped_body() {
    let api = Arc::new(FakeApi::default());
    let client = client_for(spawn_fake(Arc::clone(&api)).await, machine_identity());

    let resp = client
        .secrets()
        .create(
            "NEW_KEY",
            &CreateSecretOptions {
                project_id: "proj-1".to_owned(),
                environment: "dev".to_owned(),
                secret_value: "fresh".to_owned(),
                secret_comment: Some("rotated by ops".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(resp.secret.secret_value.as_deref(), Some("fresh"));
    let body = api.last_body.lock().unwrap().clone();
    assert_eq!(body["workspaceId"], "proj-1");
    assert_eq!(body["secretComment"], "rotated by ops");
}

#[tokio::test]
async fn list_passes_flags_and_decodes_all_secrets() {
    let api = Arc::new(FakeApi::default());
    let client = client_for(spawn_fake(Arc::clone(&api)).await, machine_identity());

    let opts = ListSecretsOptions {
        recursive: Some(true),
        tag_slugs: vec!["db".to_owned(), "prod".to_owned()],
        ..ListSecretsOptions::new("p", "dev")
    };
    let resp = client.secrets().list(&opts).await.unwrap();

    assert_eq!(resp.secrets.len(), 2);
    let query = api.last_query.lock().unwrap().clone();
    assert_eq!(query.get("recursive").map(String::as_str), Some("true"));
    assert_eq!(query.get("tagSlugs").map(String::as_str), Some("db,prod"));
}

// ── KMS ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn sign_round_trips_algorithm_names() {
    let api = Arc::new(FakeApi::default());
    let client = client_for(spawn_fake(Arc::clone(&api)).await, machine_identity());

    let resp = client
        .kms()
        .sign(
            "key-1",
            &SignOptions {
                data: "aGVsbG8=".to_owned(),
                signing_algorithm: SigningAlgorithm::RsassaPssSha512,
                is_digest: false,
            },
        )
        .await
        .unwrap();

    assert_eq!(resp.key_id, "key-1");
    assert_eq!(resp.signing_algorithm, "RSASSA_PSS_SHA_512");
}
