use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_with::skip_serializing_none;
use thiserror::Error;

/// Failure taxonomy of the vote and follow engines. Every variant
/// surfaces to the caller unchanged; nothing is retried or swallowed
/// inside the engines.
#[derive(Debug, Error)]
pub enum SocialError {
    /// Bad input shape or value; nothing was looked up in the store.
    #[error("{0}")]
    Validation(String),
    /// A referenced post, user, or vote record does not exist.
    #[error("{0}")]
    NotFound(String),
    /// An atomic multi-write failed; the caller may assume zero side
    /// effects.
    #[error("{0}")]
    TransactionAborted(String),
    /// Store I/O failure; retryable by the caller, never retried here.
    #[error(transparent)]
    TransientStore(#[from] anyhow::Error),
}

impl SocialError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::TransactionAborted(_) => StatusCode::CONFLICT,
            Self::TransientStore(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<diesel::result::Error> for SocialError {
    fn from(err: diesel::result::Error) -> Self {
        Self::TransientStore(err.into())
    }
}

#[derive(Serialize, Debug)]
#[skip_serializing_none]
pub struct ApiError {
    pub error: String,
    #[serde(rename = "error_description")]
    pub description: Option<String>,
    #[serde(skip_serializing)]
    pub status_code: StatusCode,
}

impl ApiError {
    pub fn new(error: &str, status_code: StatusCode) -> Self {
        ApiError {
            error: String::from(error),
            description: None,
            status_code,
        }
    }

    pub fn new_with_description(error: &str, description: &str, status_code: StatusCode) -> Self {
        ApiError {
            error: String::from(error),
            description: Some(String::from(description)),
            status_code,
        }
    }
}

impl From<SocialError> for ApiError {
    fn from(err: SocialError) -> Self {
        ApiError::new(&err.to_string(), err.status_code())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::SocialError;

    #[test]
    fn status_codes() {
        let err = SocialError::Validation("cannot follow yourself".to_string());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = SocialError::NotFound("not voted".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = SocialError::TransactionAborted("follow aborted".to_string());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err = SocialError::TransientStore(anyhow::anyhow!("pool exhausted"));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
