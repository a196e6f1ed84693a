use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::Value;

use userdir_api::app::build_app;
use userdir_auth::Claims;
use userdir_core::UserId;
use userdir_store::{InMemoryUserStore, StoreError, UserRecord, UserStore};

const SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(jwt_secret: &str, users: Arc<dyn UserStore>) -> Self {
        // Build the same router as prod, but bind to an ephemeral port.
        let app = build_app(users, jwt_secret);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn record(id: &str, name: &str) -> UserRecord {
    UserRecord {
        id: UserId::new(id).unwrap(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        password_hash: "x".to_string(),
        created_at: Utc::now(),
    }
}

fn seeded_store() -> Arc<InMemoryUserStore> {
    let store = InMemoryUserStore::new();
    store.insert_record(record("u1", "Ann"));
    store.insert_record(record("u2", "Bob"));
    Arc::new(store)
}

fn mint_jwt_with_window(
    secret: &str,
    sub: &str,
    iat: DateTime<Utc>,
    ttl: ChronoDuration,
) -> String {
    let claims = Claims {
        sub: UserId::new(sub).unwrap(),
        iat,
        exp: iat + ttl,
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}

fn mint_jwt(secret: &str, sub: &str) -> String {
    mint_jwt_with_window(secret, sub, Utc::now(), ChronoDuration::minutes(10))
}

#[tokio::test]
async fn health_responds_ok() {
    let srv = TestServer::spawn(SECRET, seeded_store()).await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn list_users_mirrors_store_without_credentials() {
    let srv = TestServer::spawn(SECRET, seeded_store()).await;

    let res = reqwest::get(format!("{}/users", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["id"], "u1");
    assert_eq!(data[0]["name"], "Ann");
    assert_eq!(data[1]["id"], "u2");
    assert_eq!(data[1]["name"], "Bob");

    for item in data {
        assert!(item.get("password_hash").is_none());
    }
}

#[tokio::test]
async fn guarded_endpoint_requires_token() {
    let srv = TestServer::spawn(SECRET, seeded_store()).await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/users/u1", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Unauthorised, token is needed");
}

#[tokio::test]
async fn non_bearer_scheme_counts_as_missing_token() {
    let srv = TestServer::spawn(SECRET, seeded_store()).await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/users/u1", srv.base_url))
        .header("Authorization", "Basic dTE6eA==")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Unauthorised, token is needed");
}

#[tokio::test]
async fn malformed_token_echoes_verification_error() {
    let srv = TestServer::spawn(SECRET, seeded_store()).await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/users/u1", srv.base_url))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Unauthorised, token is invalid");
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let srv = TestServer::spawn(SECRET, seeded_store()).await;

    let token = mint_jwt_with_window(
        SECRET,
        "u1",
        Utc::now() - ChronoDuration::minutes(20),
        ChronoDuration::minutes(10),
    );

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/users/u1", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Unauthorised, token is invalid");
    assert!(body["error"].as_str().unwrap().contains("expired"));
}

#[tokio::test]
async fn token_signed_with_other_secret_is_rejected() {
    let srv = TestServer::spawn(SECRET, seeded_store()).await;

    let token = mint_jwt("other-secret", "u1");

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/users/u1", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Unauthorised, token is invalid");
}

#[tokio::test]
async fn unknown_subject_is_rejected() {
    let srv = TestServer::spawn(SECRET, seeded_store()).await;

    let token = mint_jwt(SECRET, "ghost");

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/users/u1", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Unauthorised, user is not found");
}

#[tokio::test]
async fn get_user_returns_record_without_credential() {
    let srv = TestServer::spawn(SECRET, seeded_store()).await;

    let token = mint_jwt(SECRET, "u1");

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/users/u1", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], "u1");
    assert_eq!(body["data"]["name"], "Ann");
    assert_eq!(body["data"]["email"], "ann@example.com");
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn get_user_with_absent_id_yields_null_data() {
    let srv = TestServer::spawn(SECRET, seeded_store()).await;

    // The token subject exists, the requested id does not.
    let token = mint_jwt(SECRET, "u1");

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/users/u999", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn write_stubs_acknowledge_without_acting() {
    let srv = TestServer::spawn(SECRET, seeded_store()).await;

    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/users", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["title"], "CREATE new user");

    let res = client
        .put(format!("{}/users/u1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["title"], "UPDATE user");

    let res = client
        .delete(format!("{}/users/u1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["title"], "DELETE user");

    // Nothing was persisted or removed.
    let res = reqwest::get(format!("{}/users", srv.base_url)).await.unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

/// A store whose every query fails, for exercising the shared error path.
struct FailingStore;

#[async_trait]
impl UserStore for FailingStore {
    async fn find_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        Err(StoreError::Query("connection reset".to_string()))
    }

    async fn find_by_id(&self, _id: &UserId) -> Result<Option<UserRecord>, StoreError> {
        Err(StoreError::Query("connection reset".to_string()))
    }
}

#[tokio::test]
async fn store_failure_surfaces_through_shared_error_path() {
    let srv = TestServer::spawn(SECRET, Arc::new(FailingStore)).await;

    // Listing: the handler forwards the failure.
    let res = reqwest::get(format!("{}/users", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "store_error");

    // Subject lookup inside the guard: also forwarded, not turned into a 401.
    let token = mint_jwt(SECRET, "u1");
    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/users/u1", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "store_error");
}
