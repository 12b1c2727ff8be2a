//! API error envelope.
//!
//! Every handler failure is rendered as `{"error": "<message>"}` with the
//! matching status code. Errors raised by salvo itself (unmatched routes,
//! caught panics) pass through [`catcher`] and get the same body.

use salvo::{
    catcher::Catcher,
    handler,
    http::{ResBody, StatusCode},
    oapi::{
        Components, Content, EndpointOutRegister, Operation, Response as OapiResponse, ToSchema,
    },
    prelude::{Json, Response},
    writing::Scribe,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Error Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// Human readable description of the failure
    pub error: String,
}

/// A handler failure carrying the status code and message sent to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {message}")]
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// A 500 that reveals nothing about the cause.
    pub(crate) fn internal_unexpected() -> Self {
        Self::internal(INTERNAL_ERROR_MESSAGE)
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(ErrorResponse {
            error: self.message,
        }));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Bad Request"),
            (StatusCode::NOT_FOUND, "Not Found"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        ] {
            operation.responses.insert(
                status.as_str(),
                OapiResponse::new(description).add_content(
                    "application/json",
                    Content::new(ErrorResponse::to_schema(components)),
                ),
            );
        }
    }
}

/// Rewrites salvo's own error responses into the [`ErrorResponse`] envelope.
#[handler]
async fn render_status_error(res: &mut Response) {
    let status = res
        .status_code
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = match res.take_body() {
        ResBody::Error(error) => error.brief,
        _ => status.canonical_reason().unwrap_or("Error").to_owned(),
    };

    res.render(ApiError::new(status, message));
}

/// Catcher installed on every service so no response falls back to an HTML error page.
pub(crate) fn catcher() -> Catcher {
    Catcher::new(render_status_error)
}
