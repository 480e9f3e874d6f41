//! Axum router configuration for integration endpoints.

use axum::{routing::post, Router};

use super::handlers::{
    exchange_access_token, issue_confirmation_token, verify_confirmation_token,
    IntegrationAppState,
};

/// Integration routes, mounted under `/api/v1/integrations`.
pub fn integration_routes() -> Router<IntegrationAppState> {
    Router::new()
        .route("/:name/confirmation-token/", post(issue_confirmation_token))
        .route("/:name/verify-token/", post(verify_confirmation_token))
        .route("/:name/access-token/", post(exchange_access_token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use secrecy::Secret;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::adapters::memory::{InMemoryIntegrationRepository, StubAuthService};
    use crate::domain::integration::{ConfirmationTokens, Integration};

    fn app() -> Router {
        let state = IntegrationAppState {
            integrations: Arc::new(InMemoryIntegrationRepository::with(vec![
                Integration::new("kkem", "kkem-token"),
                Integration::new("other", "other-token"),
            ])),
            auth_service: Arc::new(StubAuthService::accepting_all()),
            tokens: ConfirmationTokens::new(&Secret::new("test-secret".to_string()), 3600),
        };
        integration_routes().with_state(state)
    }

    fn post(uri: &str, authorization: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json");
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn issued_token_verifies_to_authorization_id() {
        let app = app();

        let (status, body) = call(
            &app,
            post(
                "/kkem/confirmation-token/",
                Some("Bearer kkem-token"),
                json!({"authorization_id": "auth-42"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["response"]["token"].as_str().unwrap().to_string();

        let (status, body) = call(
            &app,
            post("/kkem/verify-token/", Some("Bearer kkem-token"), json!({"token": token})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"]["authorization_id"], "auth-42");
    }

    #[tokio::test]
    async fn bearer_guard_rejects_bad_headers() {
        let app = app();
        for header in [None, Some("Token kkem-token"), Some("Bearer other-token")] {
            let (status, body) = call(
                &app,
                post("/kkem/confirmation-token/", header, json!({"authorization_id": "a"})),
            )
            .await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["message"]["general"][0], "Invalid Authorization header");
        }
    }

    #[tokio::test]
    async fn garbage_token_fails_verification() {
        let (status, body) = call(
            &app(),
            post("/kkem/verify-token/", Some("Bearer kkem-token"), json!({"token": "nope"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"]["general"][0], "Token invalid or expired");
    }

    #[tokio::test]
    async fn access_token_exchanges_credentials() {
        let (status, body) = call(
            &app(),
            post(
                "/kkem/access-token/",
                Some("Bearer kkem-token"),
                json!({"emailOrMuid": "asha@karma", "password": "hunter22"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"]["accessToken"], "access-asha@karma");
        assert_eq!(body["response"]["refreshToken"], "refresh-asha@karma");
    }

    #[tokio::test]
    async fn malformed_json_is_an_envelope_failure() {
        let request = Request::builder()
            .method("POST")
            .uri("/kkem/verify-token/")
            .header("Authorization", "Bearer kkem-token")
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = call(&app(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["hasError"], true);
    }
}
