//! Error types for spendweb-api

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use spendweb_core::CoreError;
use spendweb_utils::escape_html;
use thiserror::Error;

pub const VIEW_EXPIRED_MESSAGE: &str = "This form has expired. Reload the page.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("View not found: {view_id}")]
    ViewNotFound { view_id: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ViewNotFound { .. } => StatusCode::GONE,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown in the page
    pub fn user_message(&self) -> String {
        match self {
            ApiError::ViewNotFound { .. } => VIEW_EXPIRED_MESSAGE.to_string(),
            ApiError::BadRequest { message } => message.clone(),
            ApiError::Unauthorized => "You are not allowed to do this.".to_string(),
            ApiError::Internal { .. } => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation { message } => ApiError::BadRequest { message },
            other => ApiError::Internal { message: other.to_string() },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::debug!("{}", self);
        }
        let body = format!(
            "<div class='p-4 rounded-lg bg-red-50 text-red-700 border border-red-200' role='alert'>{}</div>",
            escape_html(&self.user_message())
        );
        (status, Html(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
