use reqwest::StatusCode;
use scout_core::{ErrorKind, ErrorReport, ValidationErrors};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        errors: ValidationErrors,
    },
    #[error("session is not authenticated (http {status})")]
    Unauthenticated { status: u16, message: Option<String> },
    #[error("server error (http {status})")]
    Server { status: u16, message: Option<String> },
    #[error("http status {status}")]
    Http { status: u16, message: Option<String> },
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Laravel-style error body: `{message, errors}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: ValidationErrors,
}

impl ApiError {
    /// Classifies a non-success response.
    pub(crate) fn from_status(status: StatusCode, body: &[u8]) -> Self {
        let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
        let message = parsed.message.filter(|m| !m.trim().is_empty());
        let code = status.as_u16();
        match code {
            422 => ApiError::Validation {
                message: message.unwrap_or_default(),
                errors: parsed.errors,
            },
            401 | 419 => ApiError::Unauthenticated {
                status: code,
                message,
            },
            500..=599 => ApiError::Server {
                status: code,
                message,
            },
            _ => ApiError::Http {
                status: code,
                message,
            },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Validation { .. } => Some(422),
            ApiError::Unauthenticated { status, .. }
            | ApiError::Server { status, .. }
            | ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Reduces the error to what the UI shows. The message is empty unless the
    /// server supplied one.
    pub fn report(&self) -> ErrorReport {
        match self {
            ApiError::Validation { message, errors } => {
                ErrorReport::validation(message.clone(), errors.clone())
            }
            ApiError::Unauthenticated { message, .. } => {
                ErrorReport::new(ErrorKind::Unauthorized, message.clone().unwrap_or_default())
            }
            ApiError::Server { message, .. } => {
                ErrorReport::new(ErrorKind::Server, message.clone().unwrap_or_default())
            }
            ApiError::Http { message, .. } => {
                ErrorReport::new(ErrorKind::Network, message.clone().unwrap_or_default())
            }
            ApiError::InvalidUrl(_)
            | ApiError::Timeout
            | ApiError::Network(_)
            | ApiError::Decode(_) => ErrorReport::new(ErrorKind::Network, String::new()),
        }
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    if err.is_decode() {
        return ApiError::Decode(err.to_string());
    }
    ApiError::Network(err.to_string())
}
