//! Uniform error page rendering
//!
//! Every failed request, whatever its origin, becomes the same rendered
//! error page carrying the numeric status and a reason line.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::fmt;
use tera::Context;

use crate::templates;

/// A request failure, rendered as the shared error page.
#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub message: String,
}

impl HttpError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for HttpError {}

impl From<anyhow::Error> for HttpError {
    fn from(err: anyhow::Error) -> Self {
        // The error chain is surfaced to the client. Fine for a personal
        // site; a hardened deployment would log it and show a stock line.
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("{err:#}"),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("Internal server error: {}", self.message);
        } else {
            tracing::debug!("Request failed with {}: {}", self.status, self.message);
        }

        let mut context = Context::new();
        context.insert("status", &self.status.as_u16());
        context.insert("error", &self.message);

        match templates::renderer().render("error.html", &context) {
            Ok(body) => (self.status, Html(body)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (self.status, self.message).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_renders_error_page() {
        let response = HttpError::not_found("no such page").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_of(response).await;
        assert!(body.contains("Error 404"));
        assert!(body.contains("no such page"));
    }

    #[tokio::test]
    async fn test_anyhow_errors_become_500() {
        let err: HttpError = anyhow::anyhow!("the disk is on fire").into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert!(body.contains("Error 500"));
        assert!(body.contains("the disk is on fire"));
    }
}
