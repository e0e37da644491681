use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failure to read the bundled dataset. Fatal at startup.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("dataset is not valid CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset header has {found} columns, need at least {expected}")]
    MissingColumns { found: usize, expected: usize },
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// The presenter could not render a page.
#[derive(Error, Debug, PartialEq)]
pub enum RenderError {
    #[error("grid needs at least one column")]
    NoColumns,
}

/// Request-time failures. Bodies are plain text.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("content not found")]
    CacheMiss,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::CacheMiss => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}
