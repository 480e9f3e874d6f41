//! Axum router configuration for voucher endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{import_vouchers, list_vouchers, VoucherAppState};

/// Voucher routes, mounted under `/api/v1/dashboard`.
///
/// Both routes require the admin role.
pub fn voucher_routes() -> Router<VoucherAppState> {
    Router::new()
        .route("/karma-voucher/", get(list_vouchers))
        .route("/karma-voucher/import/", post(import_vouchers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::middleware;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::adapters::auth::{MockSessionValidator, MOCK_ADMIN_ROLE};
    use crate::adapters::http::middleware::{auth_middleware, AuthState};
    use crate::adapters::memory::{
        InMemoryTaskCatalog, InMemoryUserDirectory, InMemoryVoucherRepository,
        RecordingEmailSender,
    };
    use crate::adapters::voucher::{EmailVoucherNotifier, SvgVoucherRenderer};
    use crate::domain::foundation::{TaskId, UserId};
    use crate::domain::voucher::{TaskRef, UserRef};

    const BOUNDARY: &str = "voucher-boundary";

    struct Fixture {
        app: Router,
        repository: Arc<InMemoryVoucherRepository>,
        email: Arc<RecordingEmailSender>,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUserDirectory::with(vec![UserRef {
            id: UserId::new("u-1").unwrap(),
            email: "asha@example.com".to_string(),
            first_name: "Asha".to_string(),
            last_name: Some("Menon".to_string()),
        }]));
        let tasks = Arc::new(InMemoryTaskCatalog::with(vec![TaskRef {
            id: TaskId::new("t-1").unwrap(),
            hashtag: "#cl-web".to_string(),
        }]));
        let repository = Arc::new(InMemoryVoucherRepository::new(users.clone(), tasks.clone()));
        let email = Arc::new(RecordingEmailSender::new());
        let notifier = Arc::new(EmailVoucherNotifier::new(
            Arc::new(SvgVoucherRenderer::new()),
            email.clone(),
        ));

        let state = VoucherAppState {
            users,
            tasks,
            notifier,
            repository: repository.clone(),
            reader: repository.clone(),
        };
        let validator = MockSessionValidator::new()
            .with_admin("admin-token", "admin-1")
            .with_test_user("user-token", "user-1");
        let auth = AuthState::new(Arc::new(validator), MOCK_ADMIN_ROLE);

        let app = voucher_routes()
            .with_state(state)
            .layer(middleware::from_fn_with_state(auth, auth_middleware));

        Fixture {
            app,
            repository,
            email,
        }
    }

    fn upload(field: &str, csv: &str, token: &str) -> Request<Body> {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"vouchers.csv\"\r\n\
             Content-Type: text/csv\r\n\r\n{csv}\r\n--{b}--\r\n",
            b = BOUNDARY,
            field = field,
            csv = csv,
        );
        Request::builder()
            .method("POST")
            .uri("/karma-voucher/import/")
            .header("Authorization", format!("Bearer {}", token))
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn import_splits_rows_into_success_and_failed() {
        let fixture = fixture();
        let csv = "karma,mail,task,month,week\n\
                   50,asha@example.com,#cl-web,January,W1\n\
                   10,ghost@example.com,#cl-web,January,W1\n";

        let response = fixture
            .app
            .oneshot(upload("voucher_log", csv, "admin-token"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["hasError"], false);
        assert_eq!(body["response"]["Success"].as_array().unwrap().len(), 1);
        assert_eq!(
            body["response"]["Failed"][0]["error"],
            "Invalid email: ghost@example.com"
        );
        assert_eq!(fixture.repository.records().await.len(), 1);
        assert_eq!(fixture.email.sent().await.len(), 1);
    }

    #[tokio::test]
    async fn missing_file_field_is_rejected() {
        let response = fixture()
            .app
            .oneshot(upload("attachment", "karma\n1\n", "admin-token"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json(response).await["message"]["general"][0], "File not found.");
    }

    #[tokio::test]
    async fn missing_column_is_reported() {
        let csv = "karma,mail,task,month\n50,asha@example.com,#cl-web,January\n";

        let response = fixture()
            .app
            .oneshot(upload("voucher_log", csv, "admin-token"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json(response).await["message"]["general"][0],
            "week does not exist in the file."
        );
    }

    #[tokio::test]
    async fn import_requires_admin() {
        let response = fixture()
            .app
            .oneshot(upload("voucher_log", "karma\n", "user-token"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn listing_returns_data_and_pagination() {
        let fixture = fixture();
        let csv = "karma,mail,task,month,week\n50,asha@example.com,#cl-web,January,W1\n";
        fixture
            .app
            .clone()
            .oneshot(upload("voucher_log", csv, "admin-token"))
            .await
            .unwrap();

        let response = fixture
            .app
            .oneshot(
                Request::builder()
                    .uri("/karma-voucher/?perPage=5&sortBy=-karma")
                    .header("Authorization", "Bearer admin-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["response"]["data"][0]["user"], "Asha Menon");
        assert_eq!(body["response"]["pagination"]["count"], 1);
        assert_eq!(body["response"]["pagination"]["isNext"], false);
    }
}
