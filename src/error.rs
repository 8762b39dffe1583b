use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("no route to an upstream service")]
    NoUpstreamRoute,
}

#[derive(Serialize)]
struct ErrorResponseBody {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            // Rejections carry no body and no cause: a caller probing the gate
            // cannot tell a bad token from an unreachable auth service.
            GatewayError::Unauthorized => return StatusCode::UNAUTHORIZED.into_response(),
            GatewayError::NoUpstreamRoute => (StatusCode::BAD_GATEWAY, "NO_UPSTREAM_ROUTE"),
        };

        let body = ErrorResponseBody {
            error: ErrorBody {
                code,
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}
