use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use storage::MemoryStore;
use storage::config::AccessConfig;
use storage::models::{NewUser, NormalizedEmail};
use storage::repository::UserStore;
use storage::services::access::AccessPolicy;
use tower::ServiceExt;
use uuid::Uuid;
use weighin_api::{middleware::auth::ApiKeys, state::AppState};

const API_KEY: &str = "test-key";
const ADMIN_EMAIL: &str = "admin@example.com";
const SUPER_ADMIN_EMAIL: &str = "root@example.com";

struct TestApp {
    router: Router,
    store: Arc<MemoryStore>,
}

impl TestApp {
    fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState {
            store: store.clone(),
            policy: Arc::new(AccessPolicy::new(AccessConfig::new(
                [ADMIN_EMAIL],
                [SUPER_ADMIN_EMAIL],
            ))),
        };
        let router = weighin_api::router(state, ApiKeys::from_comma_separated(API_KEY));
        Self { router, store }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        user_id: Option<Uuid>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {API_KEY}"));
        if let Some(user_id) = user_id {
            builder = builder.header("x-user-id", user_id.to_string());
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    async fn signup(&self, email: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/api/users/signup",
            None,
            Some(json!({
                "first_name": "Pat",
                "last_name": "Doe",
                "email": email,
                "height": 70.0
            })),
        )
        .await
    }

    async fn seed_user(&self, email: &str) -> Uuid {
        self.store
            .create_user(&NewUser {
                first_name: "Seeded".to_string(),
                last_name: "User".to_string(),
                email: NormalizedEmail::new(email),
                height: 68.0,
                is_admin: false,
            })
            .await
            .unwrap()
            .user_id
    }
}

fn id_of(value: &Value, field: &str) -> Uuid {
    value[field].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn test_health_needs_no_api_key() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_api_rejects_missing_or_wrong_key() {
    let app = TestApp::new();

    let request = Request::builder()
        .uri("/api/leaderboard")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .uri("/api/leaderboard")
        .header(header::AUTHORIZATION, "Bearer wrong")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_routes_require_user_header() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/api/competitions", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["reason"], "unauthorized");
}

#[tokio::test]
async fn test_signup_refused_for_unknown_email() {
    let app = TestApp::new();

    let (status, body) = app.signup("stranger@example.com").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["reason"], "forbidden");
}

#[tokio::test]
async fn test_competition_flow() {
    let app = TestApp::new();

    let (status, body) = app.signup(ADMIN_EMAIL).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["is_admin"], true);
    let admin_id = id_of(&body["user"], "user_id");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/competitions",
            Some(admin_id),
            Some(json!({
                "name": "New Year Cut",
                "start_date": "2025-01-01",
                "end_date": "2025-03-31"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "active");
    let competition_id = id_of(&body, "competition_id");
    let allowlist_uri = format!("/api/competitions/{competition_id}/allowlist");

    let (status, _) = app
        .send(
            Method::POST,
            &allowlist_uri,
            Some(admin_id),
            Some(json!({ "email": "Friend@Example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .send(
            Method::POST,
            &allowlist_uri,
            Some(admin_id),
            Some(json!({ "email": "friend@example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["reason"], "duplicate");

    let (status, body) = app
        .send(
            Method::POST,
            &allowlist_uri,
            Some(admin_id),
            Some(json!({ "emails": ["a@example.com", "FRIEND@example.com", "bad"] })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["added"], 1);
    assert_eq!(body["skipped"], 1);
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);

    let (status, body) = app.signup("friend@example.com").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["is_admin"], false);
    assert_eq!(
        body["enrolled_competitions"][0].as_str().unwrap(),
        competition_id.to_string()
    );
    let friend_id = id_of(&body["user"], "user_id");

    for (date, weight) in [("2025-01-02", 200.0), ("2025-02-15", 192.5)] {
        let (status, _) = app
            .send(
                Method::POST,
                "/api/weight",
                Some(friend_id),
                Some(json!({ "date": date, "weight": weight })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app
        .send(
            Method::GET,
            &format!("/api/competitions/{competition_id}/leaderboard"),
            Some(friend_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["rank"], 1);
    assert_eq!(rows[0]["weight_change"], 7.5);
    assert_eq!(rows[0]["observation_count"], 2);

    let (status, body) = app
        .send(
            Method::GET,
            &format!("/api/competitions/{competition_id}"),
            Some(friend_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_participant"], true);
    assert_eq!(body["participants"].as_array().unwrap().len(), 2);

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/competitions/{competition_id}/join"),
            Some(friend_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["reason"], "duplicate");

    let (status, _) = app
        .send(Method::GET, &allowlist_uri, Some(friend_id), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_outsider_cannot_view_or_join() {
    let app = TestApp::new();
    let (_, body) = app.signup(ADMIN_EMAIL).await;
    let admin_id = id_of(&body["user"], "user_id");
    let outsider_id = app.seed_user("outsider@example.com").await;

    let (_, body) = app
        .send(
            Method::POST,
            "/api/competitions",
            Some(admin_id),
            Some(json!({ "name": "Closed", "start_date": "2025-05-01" })),
        )
        .await;
    let competition_id = id_of(&body, "competition_id");

    let (status, _) = app
        .send(
            Method::GET,
            &format!("/api/competitions/{competition_id}"),
            Some(outsider_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            Method::POST,
            &format!("/api/competitions/{competition_id}/join"),
            Some(outsider_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            Method::GET,
            &format!("/api/competitions/{}", Uuid::new_v4()),
            Some(admin_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_competition_validation() {
    let app = TestApp::new();
    let (_, body) = app.signup(ADMIN_EMAIL).await;
    let admin_id = id_of(&body["user"], "user_id");

    let (status, _) = app
        .send(
            Method::POST,
            "/api/competitions",
            Some(admin_id),
            Some(json!({
                "name": "Backwards",
                "start_date": "2025-03-01",
                "end_date": "2025-03-01"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/competitions",
            Some(admin_id),
            Some(json!({ "name": "", "start_date": "2025-03-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_management_is_super_admin_only() {
    let app = TestApp::new();
    let root_id = app.seed_user(SUPER_ADMIN_EMAIL).await;
    let member_id = app.seed_user("member@example.com").await;

    let (status, body) = app
        .send(Method::GET, "/api/users/me/admin", Some(root_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_super_admin"], true);
    assert_eq!(body["is_admin"], true);

    let (status, _) = app
        .send(Method::GET, "/api/users", Some(member_id), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/users/{member_id}/admin"),
            Some(root_id),
            Some(json!({ "is_admin": true })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_admin"], true);

    // Promotion grants admin, never user management.
    let (status, _) = app
        .send(Method::GET, "/api/users", Some(member_id), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/users/{root_id}/admin"),
            Some(root_id),
            Some(json!({ "is_admin": false })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_padded_emails_are_normalized_end_to_end() {
    let app = TestApp::new();
    let (status, body) = app.signup(&format!("  {} ", ADMIN_EMAIL.to_uppercase())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], ADMIN_EMAIL);
    let admin_id = id_of(&body["user"], "user_id");

    let (_, body) = app
        .send(
            Method::POST,
            "/api/competitions",
            Some(admin_id),
            Some(json!({ "name": "Padded", "start_date": "2025-01-01" })),
        )
        .await;
    let allowlist_uri = format!("/api/competitions/{}/allowlist", id_of(&body, "competition_id"));

    let (status, body) = app
        .send(
            Method::POST,
            &allowlist_uri,
            Some(admin_id),
            Some(json!({ "email": "  Jane@Example.com " })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "jane@example.com");

    let (status, body) = app
        .send(
            Method::POST,
            &allowlist_uri,
            Some(admin_id),
            Some(json!({ "email": "jane@example.com\t" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["reason"], "duplicate");

    let (status, _) = app
        .send(
            Method::POST,
            &allowlist_uri,
            Some(admin_id),
            Some(json!({ "email": "  not-an-email " })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(
            Method::DELETE,
            &allowlist_uri,
            Some(admin_id),
            Some(json!({ "email": " JANE@example.com  " })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(Method::GET, &allowlist_uri, Some(admin_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}
