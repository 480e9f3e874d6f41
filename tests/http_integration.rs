//! Integration tests for the assembled HTTP application.
//!
//! Builds the full router over in-memory adapters and a real HS256
//! validator, then drives requests through it with `oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use secrecy::Secret;
use serde_json::{json, Value};
use tower::ServiceExt;

use karma_portal::adapters::auth::{AccessClaims, Argon2PasswordHasher, JwtSessionValidator};
use karma_portal::adapters::http::{
    api_router, ApiStates, AuthState, IntegrationAppState, RegisterAppState, RoleAppState,
    VoucherAppState,
};
use karma_portal::adapters::memory::{
    InMemoryDynamicRoleRepository, InMemoryIntegrationRepository, InMemoryReferenceData,
    InMemoryRoleReader, InMemoryTaskCatalog, InMemoryUserDirectory, InMemoryUserRepository,
    InMemoryVoucherRepository, RecordingEmailSender, StubAuthService,
};
use karma_portal::adapters::voucher::{EmailVoucherNotifier, SvgVoucherRenderer};
use karma_portal::domain::foundation::{RoleId, Timestamp};
use karma_portal::domain::integration::{ConfirmationTokens, Integration};
use karma_portal::domain::role::Role;

// =============================================================================
// Test Infrastructure
// =============================================================================

const SECRET: &str = "integration-test-secret";

fn validator() -> JwtSessionValidator {
    JwtSessionValidator::new(&Secret::new(SECRET.to_string()))
}

fn bearer(sub: &str, roles: &[&str]) -> String {
    let token = validator()
        .sign(&AccessClaims {
            sub: sub.to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: Timestamp::now().plus_secs(600).as_unix_secs(),
        })
        .unwrap();
    format!("Bearer {}", token)
}

fn app() -> Router {
    let secret = Secret::new(SECRET.to_string());
    let directory = Arc::new(InMemoryUserDirectory::default());
    let tasks = Arc::new(InMemoryTaskCatalog::default());
    let vouchers = Arc::new(InMemoryVoucherRepository::new(directory.clone(), tasks.clone()));
    let email = Arc::new(RecordingEmailSender::new());
    let roles = Arc::new(InMemoryRoleReader::with_roles(vec![Role {
        id: RoleId::new("r-lead").unwrap(),
        title: "Campus Lead".to_string(),
        description: None,
    }]));
    let auth_service = Arc::new(StubAuthService::accepting_all());

    let states = ApiStates {
        voucher: VoucherAppState {
            users: directory,
            tasks,
            notifier: Arc::new(EmailVoucherNotifier::new(
                Arc::new(SvgVoucherRenderer::new()),
                email.clone(),
            )),
            repository: vouchers.clone(),
            reader: vouchers,
        },
        role: RoleAppState {
            roles: roles.clone(),
            dynamic_roles: Arc::new(InMemoryDynamicRoleRepository::new(roles.clone())),
        },
        integration: IntegrationAppState {
            integrations: Arc::new(InMemoryIntegrationRepository::with(vec![Integration::new(
                "kkem",
                "kkem-token",
            )])),
            auth_service: auth_service.clone(),
            tokens: ConfirmationTokens::new(&secret, 3600),
        },
        register: RegisterAppState {
            users: Arc::new(InMemoryUserRepository::new()),
            hasher: Arc::new(Argon2PasswordHasher::new()),
            auth_service,
            email,
            reference: Arc::new(InMemoryReferenceData::sample()),
            roles,
        },
    };

    api_router(states, AuthState::new(Arc::new(validator()), "Admins"))
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn json_request(method: &str, uri: &str, auth: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(auth) = auth {
        builder = builder.header("Authorization", auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn registered_user_can_be_exchanged_through_an_integration() {
    let app = app();

    let (status, registered) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/register/",
            None,
            json!({
                "first_name": "Ravi",
                "email": "ravi@example.com",
                "mobile": "+919876543210",
                "password": "long-enough-pass",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let access = registered["response"]["accessToken"].as_str().unwrap().to_string();

    let (status, exchanged) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/integrations/kkem/access-token/",
            Some("Bearer kkem-token"),
            json!({"token": access}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(exchanged["response"]["accessToken"], registered["response"]["accessToken"]);
}

#[tokio::test]
async fn dynamic_roles_accept_any_signed_user() {
    let app = app();
    let auth = bearer("user-9", &[]);

    let (status, created) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/dashboard/dynamic-role/",
            Some(&auth),
            json!({"type": "lc_approver", "role": "Campus Lead"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["hasError"], false);
    assert_eq!(created["statusCode"], 200);
}

#[tokio::test]
async fn voucher_listing_requires_the_admin_role() {
    let app = app();
    let list = |auth: String| {
        Request::builder()
            .uri("/api/v1/dashboard/karma-voucher/")
            .header("Authorization", auth)
            .body(Body::empty())
            .unwrap()
    };

    let (status, body) = call(&app, list(bearer("user-9", &["Student"]))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["hasError"], true);

    let (status, body) = call(&app, list(bearer("admin-1", &["Admins"]))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["pagination"]["count"], 0);
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let forged = JwtSessionValidator::new(&Secret::new("other-secret".to_string()))
        .sign(&AccessClaims {
            sub: "admin-1".to_string(),
            roles: vec!["Admins".to_string()],
            exp: Timestamp::now().plus_secs(600).as_unix_secs(),
        })
        .unwrap();

    let (status, _) = call(
        &app(),
        Request::builder()
            .uri("/api/v1/dashboard/karma-voucher/")
            .header("Authorization", format!("Bearer {}", forged))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
