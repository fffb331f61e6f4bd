//! Request error handling
//!
//! Handlers return `Result<T, BoardError>`. Every failure is a server-side
//! collaborator failure, so each variant is logged in full and answered with a
//! generic 500 page.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum BoardError {
    /// The message store could not be read or written.
    #[error("store error: {0:#}")]
    Store(anyhow::Error),

    #[error("render error: {0}")]
    Render(#[from] minijinja::Error),

    /// A blocking store call panicked or was cancelled.
    #[error("task error: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl BoardError {
    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        match &self {
            BoardError::Store(e) => error!(error = ?e, "message store failed"),
            BoardError::Render(e) => error!(error = %e, "template rendering failed"),
            BoardError::Task(e) => error!(error = %e, "blocking store task failed"),
        }

        (self.status(), Html("<h1>Internal Server Error</h1>")).into_response()
    }
}
