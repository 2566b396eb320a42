use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use recital_core::CoreError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    ValidationError(String),
    NotConfigured(String),
    /// `public` goes to the caller, `detail` only to the log.
    InternalServerError { public: String, detail: String },
    Anyhow(anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn unauthorized() -> Self {
        AppError::AuthenticationError("Unauthorized".to_string())
    }

    pub fn internal(public: impl Into<String>, detail: impl ToString) -> Self {
        AppError::InternalServerError {
            public: public.into(),
            detail: detail.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotConfigured(msg) => {
                tracing::error!("Not configured: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::InternalServerError { public, detail } => {
                tracing::error!("{}: {}", public, detail);
                (StatusCode::INTERNAL_SERVER_ERROR, public)
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "success": false,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Unauthorized => AppError::unauthorized(),
            CoreError::Validation(msg) => AppError::ValidationError(msg),
            CoreError::NotConfigured(msg) => AppError::NotConfigured(msg),
            other => AppError::internal("Internal Server Error", other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection);
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}

/// Attaches the caller-facing message used when a storage or upstream
/// failure surfaces from a handler.
pub trait OrFail<T> {
    fn or_fail(self, public: &str) -> AppResult<T>;
}

impl<T> OrFail<T> for Result<T, CoreError> {
    fn or_fail(self, public: &str) -> AppResult<T> {
        self.map_err(|err| match err {
            CoreError::Storage(_) | CoreError::Upstream(_) => AppError::internal(public, err),
            other => other.into(),
        })
    }
}
