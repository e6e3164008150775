//! Integration tests for the HTTP API.
//!
//! Drives the full axum router (auth middleware, extractors, error mapping)
//! against the in-memory store with real JWT tokens and session validation.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use fitpass::adapters::auth::{AccountSessionValidator, JwtTokenService};
use fitpass::adapters::http::{api_router, AppState, Credentials, Policy};
use fitpass::adapters::memory::InMemoryStore;
use fitpass::application::handlers::auth::{
    EnsureBootstrapAdminCommand, EnsureBootstrapAdminHandler, SignupPolicy,
};
use fitpass::domain::foundation::{DomainError, Money};
use fitpass::ports::PasswordHasher;

// =============================================================================
// Test Infrastructure
// =============================================================================

const PASSWORD: &str = "correct-horse-42";
const ADMIN_EMAIL: &str = "admin@fitpass.test";

/// Argon2 is too slow for unoptimised test builds.
struct PrefixHasher;

impl PasswordHasher for PrefixHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("hashed:{}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash == format!("hashed:{}", password))
    }
}

struct TestApp {
    router: Router,
    store: Arc<InMemoryStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl TestApp {
    fn new() -> Self {
        let policy = Policy {
            signup: SignupPolicy {
                allow_signup: true,
                signup_bonus: Money::from_cents(500).unwrap(),
            },
            cashback_percent: 10,
            min_withdrawal: Money::from_cents(100).unwrap(),
            verbose_errors: false,
        };
        Self::with_policy(policy)
    }

    fn with_policy(policy: Policy) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let tokens = Arc::new(JwtTokenService::new(
            b"integration-test-secret-0123456789abcdef",
            "fitpass-test",
            1,
        ));
        let hasher: Arc<dyn PasswordHasher> = Arc::new(PrefixHasher);
        let credentials = Credentials {
            hasher: hasher.clone(),
            tokens: tokens.clone(),
            sessions: Arc::new(AccountSessionValidator::new(tokens, store.clone())),
        };
        let router = api_router(AppState::new(store.clone(), credentials, policy));
        Self {
            router,
            store,
            hasher,
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    /// Signs up and returns `(token, user)`.
    async fn signup(&self, email: &str, referral_code: Option<&str>) -> (String, Value) {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/signup",
                None,
                Some(json!({
                    "email": email,
                    "password": PASSWORD,
                    "display_name": email.split('@').next().unwrap(),
                    "referral_code": referral_code,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);
        (
            body["access_token"].as_str().unwrap().to_string(),
            body["user"].clone(),
        )
    }

    async fn admin_token(&self) -> String {
        EnsureBootstrapAdminHandler::new(self.store.clone(), self.hasher.clone())
            .handle(EnsureBootstrapAdminCommand {
                email: ADMIN_EMAIL.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .unwrap();
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "email": ADMIN_EMAIL, "password": PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["access_token"].as_str().unwrap().to_string()
    }

    async fn create_program(&self, admin: &str, price_cents: i64) -> String {
        let (status, body) = self
            .post(
                "/api/admin/programs",
                admin,
                json!({
                    "title": "Strength Foundations",
                    "level": "beginner",
                    "duration_weeks": 4,
                    "price_cents": price_cents,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create program failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }

    async fn balance(&self, token: &str) -> i64 {
        let (status, body) = self.get("/api/wallet", token).await;
        assert_eq!(status, StatusCode::OK);
        body["balance_cents"].as_i64().unwrap()
    }
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn signup_then_login_then_me() {
    let app = TestApp::new();
    let (token, user) = app.signup("ana@fitpass.test", None).await;
    assert_eq!(user["role"], "member");
    assert!(user.get("password_hash").is_none());

    let (status, me) = app.get("/api/auth/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "ana@fitpass.test");

    let (status, login) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "ANA@fitpass.test", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["token_type"], "Bearer");
}

#[tokio::test]
async fn duplicate_email_is_conflict() {
    let app = TestApp::new();
    app.signup("ana@fitpass.test", None).await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({
                "email": "ana@fitpass.test",
                "password": PASSWORD,
                "display_name": "Other Ana",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "EMAIL_TAKEN");
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = TestApp::new();
    app.signup("ana@fitpass.test", None).await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "ana@fitpass.test", "password": "not-the-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn garbage_token_is_rejected_even_on_public_routes() {
    let app = TestApp::new();
    let (status, _) = app.get("/api/programs", "not-a-jwt").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn deactivated_member_loses_access_immediately() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let (token, user) = app.signup("ana@fitpass.test", None).await;
    let user_id = user["id"].as_str().unwrap();

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/api/admin/users/{}", user_id),
            Some(&admin),
            Some(json!({ "is_active": false })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get("/api/auth/me", &token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn members_cannot_reach_admin_routes() {
    let app = TestApp::new();
    let (token, _) = app.signup("ana@fitpass.test", None).await;

    let (status, body) = app.get("/api/admin/stats", &token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error_code"], "FORBIDDEN");
}

// =============================================================================
// Payments, referrals and wallet
// =============================================================================

#[tokio::test]
async fn approved_payment_grants_access_and_pays_referral_cashback() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let program_id = app.create_program(&admin, 5_000).await;

    let (referrer, referrer_user) = app.signup("rita@fitpass.test", None).await;
    let code = referrer_user["referral_code"].as_str().unwrap().to_string();
    let (member, _) = app.signup("milo@fitpass.test", Some(&code)).await;
    assert_eq!(app.balance(&referrer).await, 500);

    let (status, payment) = app
        .post(
            "/api/payments",
            &member,
            json!({
                "program_id": program_id,
                "amount_cents": 5_000,
                "reference": "TRX-1001",
                "receipt_url": "https://receipts.example.com/1001.png",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", payment);
    let payment_id = payment["id"].as_str().unwrap().to_string();

    let (status, queue) = app.get("/api/admin/payments?status=pending", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(queue["total"], 1);

    let (status, approval) = app
        .post(
            &format!("/api/admin/payments/{}/approve", payment_id),
            &admin,
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", approval);
    assert_eq!(approval["payment"]["status"], "approved");
    assert_eq!(approval["referral_cashback_cents"], 500);

    let (_, access) = app
        .get(&format!("/api/programs/{}/access", program_id), &member)
        .await;
    assert_eq!(access["has_access"], true);
    assert_eq!(app.balance(&referrer).await, 1_000);

    let (_, overview) = app.get("/api/referrals", &referrer).await;
    assert_eq!(overview["referred_count"], 1);
    assert_eq!(overview["total_earned"], 1_000);

    let (status, body) = app
        .post(
            &format!("/api/admin/payments/{}/approve", payment_id),
            &admin,
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "INVALID_STATE_TRANSITION");
}

#[tokio::test]
async fn wrong_payment_amount_is_a_validation_error() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let program_id = app.create_program(&admin, 5_000).await;
    let (member, _) = app.signup("milo@fitpass.test", None).await;

    let (status, body) = app
        .post(
            "/api/payments",
            &member,
            json!({
                "program_id": program_id,
                "amount_cents": 4_000,
                "reference": "TRX-1",
                "receipt_url": "https://receipts.example.com/1.png",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn rejected_withdrawal_restores_the_balance() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let (referrer, referrer_user) = app.signup("rita@fitpass.test", None).await;
    let code = referrer_user["referral_code"].as_str().unwrap().to_string();
    app.signup("milo@fitpass.test", Some(&code)).await;
    assert_eq!(app.balance(&referrer).await, 500);

    let (status, body) = app
        .post(
            "/api/wallet/withdrawals",
            &referrer,
            json!({ "amount_cents": 300, "destination": "IBAN DE89 3704 0044 0532 0130 00" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["transaction"]["balance_after_cents"], 200);
    let withdrawal_id = body["withdrawal"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(
            &format!("/api/admin/withdrawals/{}/reject", withdrawal_id),
            &admin,
            json!({ "reason": "Destination account name mismatch" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["status"], "rejected");
    assert_eq!(app.balance(&referrer).await, 500);

    let (_, history) = app.get("/api/wallet/transactions", &referrer).await;
    assert_eq!(history["total"], 3);
}

#[tokio::test]
async fn overdrawn_withdrawal_is_unprocessable() {
    let app = TestApp::new();
    let (member, _) = app.signup("milo@fitpass.test", None).await;

    let (status, body) = app
        .post(
            "/api/wallet/withdrawals",
            &member,
            json!({ "amount_cents": 1_000, "destination": "PayPal milo@example.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error_code"], "INSUFFICIENT_FUNDS");
}

#[tokio::test]
async fn admin_adjustment_is_visible_in_the_admin_ledger() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let (member, user) = app.signup("milo@fitpass.test", None).await;
    let user_id = user["id"].as_str().unwrap().to_string();

    let (status, entry) = app
        .post(
            "/api/admin/wallet/adjustments",
            &admin,
            json!({
                "user_id": user_id,
                "direction": "credit",
                "amount_cents": 250,
                "description": "Goodwill credit",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", entry);
    assert_eq!(entry["category"], "admin_credit");
    assert_eq!(app.balance(&member).await, 250);

    let (_, ledger) = app
        .get(&format!("/api/admin/wallet/transactions?user_id={}", user_id), &admin)
        .await;
    assert_eq!(ledger["total"], 1);
}

// =============================================================================
// Friends and tracking
// =============================================================================

#[tokio::test]
async fn friend_request_accept_feed_and_remove() {
    let app = TestApp::new();
    let (ana, ana_user) = app.signup("ana@fitpass.test", None).await;
    let (ben, _) = app.signup("ben@fitpass.test", None).await;

    let (status, sent) = app
        .post("/api/friends/requests", &ana, json!({ "email": "ben@fitpass.test" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sent["outcome"], "sent");

    let (_, requests) = app.get("/api/friends/requests", &ben).await;
    assert_eq!(requests["incoming"].as_array().unwrap().len(), 1);
    let friendship_id = requests["incoming"][0]["friendship_id"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, accepted) = app
        .post(
            &format!("/api/friends/requests/{}/accept", friendship_id),
            &ben,
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(accepted["status"], "accepted");

    let (status, _) = app
        .post(
            "/api/workouts",
            &ana,
            json!({
                "title": "Leg day",
                "duration_minutes": 45,
                "exercises": [{ "name": "Squat", "sets": 5, "reps": 5, "weight_kg": 80.0 }],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, feed) = app.get("/api/friends/activity", &ben).await;
    assert_eq!(feed.as_array().unwrap().len(), 1);
    assert_eq!(feed[0]["workout"]["title"], "Leg day");

    let ana_id = ana_user["id"].as_str().unwrap();
    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/friends/{}", ana_id),
            Some(&ben),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, friends) = app.get("/api/friends", &ana).await;
    assert!(friends.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn weight_logged_twice_on_one_day_keeps_one_entry() {
    let app = TestApp::new();
    let (token, _) = app.signup("ana@fitpass.test", None).await;

    for kg in [72.4, 71.9] {
        let (status, _) = app
            .post(
                "/api/weights",
                &token,
                json!({ "weight_kg": kg, "recorded_on": "2024-03-01" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, entries) = app.get("/api/weights", &token).await;
    assert_eq!(status, StatusCode::OK);
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["weight_kg"], 71.9);
}

// =============================================================================
// Request validation
// =============================================================================

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/signup")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error_code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn invalid_path_id_is_a_validation_error() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/api/programs/not-a-uuid", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn disabled_signup_is_forbidden() {
    let mut policy = Policy::default();
    policy.signup.allow_signup = false;
    let app = TestApp::with_policy(policy);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({
                "email": "ana@fitpass.test",
                "password": PASSWORD,
                "display_name": "Ana",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
