// --- File: crates/calbridge_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{ErrorBody, HttpStatusCode};

pub mod client;

/// Extension trait turning a domain error into an Axum HTTP response.
pub trait IntoHttpResponse {
    fn into_http_response(self) -> Response;
}

impl<E> IntoHttpResponse for E
where
    E: HttpStatusCode + ErrorBody,
{
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status_code, Json(self.error_body())).into_response()
    }
}
