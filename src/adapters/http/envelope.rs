//! Response envelope shared by every endpoint.
//!
//! ```text
//! {"hasError": false, "statusCode": 200, "message": {"general": []}, "response": {...}}
//! ```
//!
//! Failures default to HTTP 400 with `hasError = true`. Field-level
//! validation messages sit next to `general` inside `message`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnvelopeMessage {
    pub general: Vec<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub has_error: bool,
    pub status_code: u16,
    pub message: EnvelopeMessage,
    pub response: Value,
}

/// An envelope plus the HTTP status it is sent with.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    envelope: Envelope,
}

impl ApiResponse {
    /// 200 with `response` as the payload.
    pub fn success(response: impl Serialize) -> Self {
        match serde_json::to_value(response) {
            Ok(value) => Self::build(StatusCode::OK, false, EnvelopeMessage::default(), value),
            Err(err) => {
                tracing::error!(error = %err, "Failed to serialize response payload");
                Self::internal()
            }
        }
    }

    /// 200 with only a general message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::success(Value::Object(Default::default())).with_message(message)
    }

    /// 400 with a general message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::build(
            StatusCode::BAD_REQUEST,
            true,
            EnvelopeMessage {
                general: vec![message.into()],
                fields: BTreeMap::new(),
            },
            Value::Object(Default::default()),
        )
    }

    /// 400 with per-field messages.
    pub fn invalid_fields(
        message: impl Into<String>,
        fields: BTreeMap<String, Vec<String>>,
    ) -> Self {
        let mut response = Self::failure(message);
        response.envelope.message.fields = fields;
        response
    }

    /// 500 without leaking the cause.
    pub fn internal() -> Self {
        Self::failure("Something went wrong").with_status(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.envelope.message.general.push(message.into());
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self.envelope.status_code = status.as_u16();
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn build(status: StatusCode, has_error: bool, message: EnvelopeMessage, response: Value) -> Self {
        Self {
            status,
            envelope: Envelope {
                has_error,
                status_code: status.as_u16(),
                message,
                response,
            },
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}

/// `Json<T>` whose rejection is a failure envelope.
#[derive(Debug, Clone)]
pub struct EnvelopeJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for EnvelopeJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiResponse::failure(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to_json(response: &ApiResponse) -> Value {
        serde_json::to_value(response.envelope()).unwrap()
    }

    #[test]
    fn success_wraps_payload() {
        let response = ApiResponse::success(json!({"value": true})).with_message("ok");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            to_json(&response),
            json!({
                "hasError": false,
                "statusCode": 200,
                "message": {"general": ["ok"]},
                "response": {"value": true}
            })
        );
    }

    #[test]
    fn failure_is_400_with_general_message() {
        let response = ApiResponse::failure("Empty csv file.");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_json(&response);
        assert_eq!(body["hasError"], true);
        assert_eq!(body["statusCode"], 400);
        assert_eq!(body["message"]["general"][0], "Empty csv file.");
        assert_eq!(body["response"], json!({}));
    }

    #[test]
    fn field_errors_sit_beside_general() {
        let mut fields = BTreeMap::new();
        fields.insert("email".to_string(), vec!["Enter a valid email address.".to_string()]);

        let body = to_json(&ApiResponse::invalid_fields("Invalid fields", fields));

        assert_eq!(body["message"]["general"][0], "Invalid fields");
        assert_eq!(body["message"]["email"][0], "Enter a valid email address.");
    }

    #[test]
    fn status_override_updates_body() {
        let response = ApiResponse::failure("nope").with_status(StatusCode::FORBIDDEN);
        assert_eq!(to_json(&response)["statusCode"], 403);
    }
}
