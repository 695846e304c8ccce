//! In-process stand-in for the Infisical API.
//!
//! Keeps secrets and KMS keys in memory so the gateway's routes can be
//! driven end to end through the real client.

#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tower::ServiceExt;

use infisical_client::{Credentials, InfisicalClient, InfisicalConfig};
use infisical_gateway::config::ProjectDefaults;
use infisical_gateway::routes;
use infisical_gateway::service::GatewayService;
use infisical_gateway::state::AppState;

pub const PROJECT_ID: &str = "proj-1";

#[derive(Default)]
pub struct Upstream {
    pub logins: AtomicUsize,
    pub kms_ops: AtomicUsize,
    secrets: Mutex<HashMap<String, Value>>,
    keys: Mutex<HashMap<String, Value>>,
    pub last_body: Mutex<Value>,
    /// Signalled when a folder listing for `/held` arrives.
    pub held_entered: Notify,
    /// Lets a held folder listing answer.
    pub held_release: Notify,
}

impl Upstream {
    /// Store a KMS key exactly as the API would return it.
    pub fn insert_key(&self, key: Value) {
        let id = key["id"].as_str().unwrap().to_owned();
        self.keys.lock().unwrap().insert(id, key);
    }
}

type Shared = State<Arc<Upstream>>;

fn error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "statusCode": status.as_u16(), "message": message, "error": "Error" })),
    )
        .into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer token-"))
}

macro_rules! require_auth {
    ($headers:expr) => {
        if !authorized(&$headers) {
            return error(StatusCode::UNAUTHORIZED, "Token missing or invalid");
        }
    };
}

async fn login(State(up): Shared, Json(body): Json<Value>) -> Response {
    if body["clientId"] != "id" || body["clientSecret"] != "secret" {
        return error(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }
    let n = up.logins.fetch_add(1, Ordering::SeqCst) + 1;
    Json(json!({
        "accessToken": format!("token-{n}"),
        "expiresIn": 7200,
        "accessTokenMaxTTL": 43200,
        "tokenType": "Bearer"
    }))
    .into_response()
}

// ── Secrets ──────────────────────────────────────────────────────────

fn secret_key(ws: &str, env: &str, path: &str, name: &str) -> String {
    format!("{ws}|{env}|{path}|{name}")
}

fn scope_of(v: &Value) -> (String, String, String) {
    (
        v["workspaceId"].as_str().unwrap_or_default().to_owned(),
        v["environment"].as_str().unwrap_or_default().to_owned(),
        v["secretPath"].as_str().unwrap_or("/").to_owned(),
    )
}

async fn get_secret(
    State(up): Shared,
    headers: HeaderMap,
    Path(name): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    require_auth!(headers);
    let (ws, env, path) = scope_of(&json!(query));
    match up.secrets.lock().unwrap().get(&secret_key(&ws, &env, &path, &name)) {
        Some(secret) => Json(json!({ "secret": secret })).into_response(),
        None => error(
            StatusCode::NOT_FOUND,
            &format!("Secret with name '{name}' not found"),
        ),
    }
}

async fn create_secret(
    State(up): Shared,
    headers: HeaderMap,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    require_auth!(headers);
    let (ws, env, path) = scope_of(&body);
    let key = secret_key(&ws, &env, &path, &name);
    let mut secrets = up.secrets.lock().unwrap();
    if secrets.contains_key(&key) {
        return error(StatusCode::BAD_REQUEST, "Secret already exist");
    }
    let mut secret = json!({
        "id": format!("sec-{}", secrets.len() + 1),
        "workspace": ws,
        "environment": env,
        "version": 1,
        "type": body["type"].as_str().unwrap_or("shared"),
        "secretKey": name,
        "secretValue": body["secretValue"],
        "secretValueHidden": false,
        "secretMetadata": [{ "key": "team", "value": "payments" }],
        "secretPath": path
    });
    if let Some(comment) = body["secretComment"].as_str() {
        secret["secretComment"] = json!(comment);
    }
    secrets.insert(key, secret.clone());
    Json(json!({ "secret": secret })).into_response()
}

async fn update_secret(
    State(up): Shared,
    headers: HeaderMap,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    require_auth!(headers);
    let (ws, env, path) = scope_of(&body);
    let mut secrets = up.secrets.lock().unwrap();
    let Some(mut secret) = secrets.remove(&secret_key(&ws, &env, &path, &name)) else {
        return error(StatusCode::NOT_FOUND, "Secret not found");
    };
    if let Some(value) = body["secretValue"].as_str() {
        secret["secretValue"] = json!(value);
    }
    if let Some(comment) = body["secretComment"].as_str() {
        secret["secretComment"] = json!(comment);
    }
    secret["version"] = json!(secret["version"].as_i64().unwrap_or(1) + 1);
    let final_name = body["newSecretName"].as_str().unwrap_or(&name).to_owned();
    secret["secretKey"] = json!(final_name);
    secrets.insert(secret_key(&ws, &env, &path, &final_name), secret.clone());
    Json(json!({ "secret": secret })).into_response()
}

async fn delete_secret(
    State(up): Shared,
    headers: HeaderMap,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    require_auth!(headers);
    let (ws, env, path) = scope_of(&body);
    match up
        .secrets
        .lock()
        .unwrap()
        .remove(&secret_key(&ws, &env, &path, &name))
    {
        Some(secret) => Json(json!({ "secret": secret })).into_response(),
        None => error(StatusCode::NOT_FOUND, "Secret not found"),
    }
}

async fn list_secrets(
    State(up): Shared,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    require_auth!(headers);
    let (ws, env, path) = scope_of(&json!(query));
    let prefix = format!("{ws}|{env}|{path}|");
    let secrets = up.secrets.lock().unwrap();
    let mut keys: Vec<&String> = secrets.keys().filter(|k| k.starts_with(&prefix)).collect();
    keys.sort();
    let list: Vec<&Value> = keys.into_iter().filter_map(|k| secrets.get(k)).collect();
    Json(json!({ "secrets": list, "imports": [] })).into_response()
}

// ── Dynamic secrets ──────────────────────────────────────────────────

fn dynamic_secret_json(name: &str, provider: &str) -> Value {
    json!({
        "id": format!("ds-{name}"),
        "name": name,
        "version": 1,
        "type": provider,
        "defaultTTL": "1h",
        "maxTTL": "24h",
        "folderId": "folder-root"
    })
}

async fn create_dynamic_secret(
    State(up): Shared,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    require_auth!(headers);
    *up.last_body.lock().unwrap() = body.clone();
    let mut ds = dynamic_secret_json(
        body["name"].as_str().unwrap_or_default(),
        body["provider"]["type"].as_str().unwrap_or_default(),
    );
    ds["defaultTTL"] = body["defaultTTL"].clone();
    Json(json!({ "dynamicSecret": ds })).into_response()
}

async fn delete_dynamic_secret(
    State(up): Shared,
    headers: HeaderMap,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    require_auth!(headers);
    *up.last_body.lock().unwrap() = body;
    if name == "missing" {
        return error(StatusCode::NOT_FOUND, "Dynamic secret not found");
    }
    Json(json!({ "dynamicSecret": dynamic_secret_json(&name, "redis") })).into_response()
}

fn lease_json(id: &str, version: i64, expire_at: &str) -> Value {
    json!({ "id": id, "version": version, "expireAt": expire_at, "dynamicSecretId": "ds-redis" })
}

async fn create_lease(State(up): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    require_auth!(headers);
    *up.last_body.lock().unwrap() = body.clone();
    let name = body["dynamicSecretName"].as_str().unwrap_or_default();
    Json(json!({
        "lease": lease_json("lease-1", 1, "2030-01-01T01:00:00Z"),
        "dynamicSecret": dynamic_secret_json(name, "redis"),
        "data": { "DB_USERNAME": "user-1", "DB_PASSWORD": "pw-1" }
    }))
    .into_response()
}

async fn renew_lease(
    State(up): Shared,
    headers: HeaderMap,
    Path(lease_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    require_auth!(headers);
    *up.last_body.lock().unwrap() = body;
    Json(json!({ "lease": lease_json(&lease_id, 2, "2030-01-01T02:00:00Z") })).into_response()
}

async fn delete_lease(
    State(up): Shared,
    headers: HeaderMap,
    Path(lease_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    require_auth!(headers);
    *up.last_body.lock().unwrap() = body;
    Json(json!({ "lease": lease_json(&lease_id, 2, "2030-01-01T02:00:00Z") })).into_response()
}

// ── Projects, environments, folders ──────────────────────────────────

async fn create_project(State(up): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    require_auth!(headers);
    *up.last_body.lock().unwrap() = body.clone();
    Json(json!({
        "project": {
            "id": "proj-new",
            "name": body["projectName"],
            "slug": body["slug"].as_str().unwrap_or("generated-slug"),
            "orgId": "org-1",
            "type": body["type"].as_str().unwrap_or("secret-manager"),
            "environments": [
                { "id": "env-dev", "name": "Development", "slug": "dev" }
            ]
        }
    }))
    .into_response()
}

async fn invite_members(
    State(up): Shared,
    headers: HeaderMap,
    Path(project_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    require_auth!(headers);
    *up.last_body.lock().unwrap() = body.clone();
    let memberships: Vec<Value> = body["emails"]
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, _)| json!({ "id": format!("m-{i}"), "projectId": project_id, "role": "member" }))
        .collect();
    Json(json!({ "memberships": memberships })).into_response()
}

async fn create_environment(
    State(_up): Shared,
    headers: HeaderMap,
    Path(project_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    require_auth!(headers);
    Json(json!({
        "environment": {
            "id": "env-new",
            "name": body["name"],
            "slug": body["slug"],
            "position": body["position"].as_u64().unwrap_or(4),
            "projectId": project_id
        }
    }))
    .into_response()
}

async fn create_folder(State(up): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    require_auth!(headers);
    *up.last_body.lock().unwrap() = body.clone();
    Json(json!({
        "folder": { "id": "fold-1", "name": body["name"], "envId": "env-dev", "version": 1 }
    }))
    .into_response()
}

async fn list_folders(
    State(up): Shared,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    require_auth!(headers);
    if query.get("path").map(String::as_str) == Some("/held") {
        up.held_entered.notify_one();
        up.held_release.notified().await;
    }
    if query.get("workspaceId").map(String::as_str) != Some(PROJECT_ID) {
        return Json(json!({ "folders": [] })).into_response();
    }
    Json(json!({
        "folders": [
            { "id": "fold-1", "name": "db" },
            { "id": "fold-2", "name": "api" }
        ]
    }))
    .into_response()
}

// ── KMS ──────────────────────────────────────────────────────────────

const SIGNATURE: &str = "c2lnbmF0dXJl";

async fn create_key(State(up): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    require_auth!(headers);
    let mut keys = up.keys.lock().unwrap();
    let id = format!("key-{}", keys.len() + 1);
    let key = json!({
        "id": id,
        "name": body["name"],
        "description": body["description"].as_str().unwrap_or_default(),
        "isDisabled": false,
        "orgId": "org-1",
        "projectId": body["projectId"],
        "keyUsage": body["keyUsage"].as_str().unwrap_or("encrypt-decrypt"),
        "encryptionAlgorithm": body["encryptionAlgorithm"].as_str().unwrap_or("aes-256-gcm"),
        "version": 1
    });
    keys.insert(id, key.clone());
    Json(json!({ "key": key })).into_response()
}

async fn get_key(State(up): Shared, headers: HeaderMap, Path(id): Path<String>) -> Response {
    require_auth!(headers);
    match up.keys.lock().unwrap().get(&id) {
        Some(key) => Json(json!({ "key": key })).into_response(),
        None => error(StatusCode::NOT_FOUND, "Key not found"),
    }
}

async fn delete_key(State(up): Shared, headers: HeaderMap, Path(id): Path<String>) -> Response {
    require_auth!(headers);
    match up.keys.lock().unwrap().remove(&id) {
        Some(key) => Json(json!({ "key": key })).into_response(),
        None => error(StatusCode::NOT_FOUND, "Key not found"),
    }
}

async fn get_key_by_name(
    State(up): Shared,
    headers: HeaderMap,
    Path(name): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    require_auth!(headers);
    let project_id = query.get("projectId").cloned().unwrap_or_default();
    let keys = up.keys.lock().unwrap();
    match keys
        .values()
        .find(|k| k["name"] == name.as_str() && k["projectId"] == project_id.as_str())
    {
        Some(key) => Json(json!({ "key": key })).into_response(),
        None => error(StatusCode::NOT_FOUND, "Key not found"),
    }
}

async fn encrypt(State(up): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    require_auth!(headers);
    up.kms_ops.fetch_add(1, Ordering::SeqCst);
    let plaintext = body["plaintext"].as_str().unwrap_or_default();
    Json(json!({ "ciphertext": format!("ct:{plaintext}") })).into_response()
}

async fn decrypt(State(up): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    require_auth!(headers);
    up.kms_ops.fetch_add(1, Ordering::SeqCst);
    let ciphertext = body["ciphertext"].as_str().unwrap_or_default();
    match ciphertext.strip_prefix("ct:") {
        Some(plaintext) => Json(json!({ "plaintext": plaintext })).into_response(),
        None => error(StatusCode::BAD_REQUEST, "Invalid ciphertext"),
    }
}

async fn sign(
    State(up): Shared,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    require_auth!(headers);
    up.kms_ops.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "signature": SIGNATURE,
        "keyId": id,
        "signingAlgorithm": body["signingAlgorithm"]
    }))
    .into_response()
}

async fn verify(
    State(up): Shared,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    require_auth!(headers);
    up.kms_ops.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "signatureValid": body["signature"] == SIGNATURE,
        "keyId": id,
        "signingAlgorithm": body["signingAlgorithm"]
    }))
    .into_response()
}

async fn public_key(headers: HeaderMap) -> Response {
    require_auth!(headers);
    Json(json!({ "publicKey": "MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAE" })).into_response()
}

async fn signing_algorithms(headers: HeaderMap) -> Response {
    require_auth!(headers);
    Json(json!({ "signingAlgorithms": ["ECDSA_SHA_256", "ECDSA_SHA_384"] })).into_response()
}

/// Start the fake API and return its base URL.
pub async fn spawn_upstream(up: Arc<Upstream>) -> String {
    let app = Router::new()
        .route("/api/v1/auth/universal-auth/login", post(login))
        .route("/api/v3/secrets/raw", get(list_secrets))
        .route(
            "/api/v3/secrets/raw/{name}",
            get(get_secret)
                .post(create_secret)
                .patch(update_secret)
                .delete(delete_secret),
        )
        .route("/api/v1/dynamic-secrets", post(create_dynamic_secret))
        .route("/api/v1/dynamic-secrets/{name}", delete(delete_dynamic_secret))
        .route("/api/v1/dynamic-secret-leases", post(create_lease))
        .route("/api/v1/dynamic-secret-leases/{id}", delete(delete_lease))
        .route("/api/v1/dynamic-secret-leases/{id}/renew", post(renew_lease))
        .route("/api/v2/workspace", post(create_project))
        .route("/api/v2/workspace/{id}/memberships", post(invite_members))
        .route("/api/v1/workspace/{id}/environments", post(create_environment))
        .route("/api/v1/folders", post(create_folder).get(list_folders))
        .route("/api/v1/kms/keys", post(create_key))
        .route("/api/v1/kms/keys/{id}", get(get_key).delete(delete_key))
        .route("/api/v1/kms/keys/key-name/{name}", get(get_key_by_name))
        .route("/api/v1/kms/keys/{id}/encrypt", post(encrypt))
        .route("/api/v1/kms/keys/{id}/decrypt", post(decrypt))
        .route("/api/v1/kms/keys/{id}/sign", post(sign))
        .route("/api/v1/kms/keys/{id}/verify", post(verify))
        .route("/api/v1/kms/keys/{id}/public-key", get(public_key))
        .route(
            "/api/v1/kms/keys/{id}/signing-algorithms",
            get(signing_algorithms),
        )
        .with_state(up);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Options for building a gateway in tests.
pub struct GatewayOptions {
    pub client_secret: &'static str,
    pub project_slug: Option<&'static str>,
    pub docs_enabled: bool,
    pub max_concurrent_requests: usize,
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self {
            client_secret: "secret",
            project_slug: Some("payments"),
            docs_enabled: true,
            max_concurrent_requests: 256,
        }
    }
}

/// A gateway router wired to `site_url`.
pub fn gateway(site_url: &str, opts: GatewayOptions) -> Router {
    let client = InfisicalClient::with_config(InfisicalConfig {
        credentials: Credentials::UniversalAuth {
            client_id: "id".to_owned(),
            client_secret: opts.client_secret.to_owned(),
        },
        site_url: site_url.to_owned(),
        timeout: Duration::from_secs(5),
        max_retries: 0,
    })
    .unwrap();

    let defaults = ProjectDefaults {
        project_id: PROJECT_ID.to_owned(),
        project_slug: opts.project_slug.map(str::to_owned),
        environment: "dev".to_owned(),
        secret_path: "/".to_owned(),
    };

    routes::router(Arc::new(AppState {
        service: GatewayService::new(Arc::new(client), defaults),
        docs_enabled: opts.docs_enabled,
        max_concurrent_requests: opts.max_concurrent_requests,
    }))
}

/// Fake upstream plus a gateway in front of it.
pub async fn setup() -> (Router, Arc<Upstream>) {
    let up = Arc::new(Upstream::default());
    let url = spawn_upstream(Arc::clone(&up)).await;
    (gateway(&url, GatewayOptions::default()), up)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap_or(Value::Null)
    }
}

/// Send one request through the gateway router.
pub async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse {
        status,
        headers,
        text: String::from_utf8_lossy(&bytes).into_owned(),
    }
}
