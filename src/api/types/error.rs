//! Error envelope returned by every failing endpoint

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Externally visible error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "400_INVALID_INPUT")]
    InvalidInput,
    #[serde(rename = "404_NO_RESULTS")]
    NoResults,
    #[serde(rename = "422_VALIDATION_ERROR")]
    ValidationError,
    #[serde(rename = "429_RATE_LIMITED")]
    RateLimited,
    #[serde(rename = "502_PROVIDER_UNAVAILABLE")]
    ProviderUnavailable,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::NoResults => StatusCode::NOT_FOUND,
            Self::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::ProviderUnavailable => StatusCode::BAD_GATEWAY,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "400_INVALID_INPUT"),
            Self::NoResults => write!(f, "404_NO_RESULTS"),
            Self::ValidationError => write!(f, "422_VALIDATION_ERROR"),
            Self::RateLimited => write!(f, "429_RATE_LIMITED"),
            Self::ProviderUnavailable => write!(f, "502_PROVIDER_UNAVAILABLE"),
        }
    }
}

/// `{ "code": ..., "message": ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: code.status(),
            response: ApiErrorResponse {
                code,
                message: message.into(),
            },
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn no_results(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NoResults, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RateLimited, message)
    }

    pub fn provider_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ProviderUnavailable, message)
    }

    pub fn code(&self) -> ErrorCode {
        self.response.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidInput { message } => Self::invalid_input(message),
            DomainError::Validation { message } => Self::validation(message),
            DomainError::NoResults { message } => Self::no_results(message),
            DomainError::RateLimited { message } => Self::rate_limited(message),
            DomainError::ProviderUnavailable { message } => Self::provider_unavailable(message),
            DomainError::Upstream {
                provider,
                status,
                message,
            } => {
                tracing::error!(%provider, ?status, %message, "Unhandled upstream error");
                Self::provider_unavailable(format!("{} is unavailable", provider))
            }
            DomainError::Configuration { message } | DomainError::Internal { message } => {
                tracing::error!(%message, "Internal error");
                Self::provider_unavailable("Internal server error")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.response.code, self.response.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_conversion() {
        let cases = [
            (DomainError::invalid_input("x"), StatusCode::BAD_REQUEST, ErrorCode::InvalidInput),
            (DomainError::validation("x"), StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::ValidationError),
            (DomainError::no_results("x"), StatusCode::NOT_FOUND, ErrorCode::NoResults),
            (DomainError::rate_limited("x"), StatusCode::TOO_MANY_REQUESTS, ErrorCode::RateLimited),
            (
                DomainError::provider_unavailable("x"),
                StatusCode::BAD_GATEWAY,
                ErrorCode::ProviderUnavailable,
            ),
        ];

        for (domain, status, code) in cases {
            let api: ApiError = domain.into();
            assert_eq!(api.status, status);
            assert_eq!(api.code(), code);
            assert_eq!(api.response.message, "x");
        }
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let api: ApiError = DomainError::internal("pool exhausted at db.rs:42").into();

        assert_eq!(api.status, StatusCode::BAD_GATEWAY);
        assert_eq!(api.response.message, "Internal server error");

        let api: ApiError =
            DomainError::upstream("rentcast", Some(500), "<html>stack trace</html>").into();

        assert_eq!(api.code(), ErrorCode::ProviderUnavailable);
        assert!(!api.response.message.contains("stack trace"));
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::invalid_input("Invalid US address format");
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "code": "400_INVALID_INPUT",
                "message": "Invalid US address format"
            })
        );
    }

    #[test]
    fn test_code_display_matches_serialization() {
        for code in [
            ErrorCode::InvalidInput,
            ErrorCode::NoResults,
            ErrorCode::ValidationError,
            ErrorCode::RateLimited,
            ErrorCode::ProviderUnavailable,
        ] {
            let serialized = serde_json::to_value(code).unwrap();
            assert_eq!(serialized, serde_json::Value::String(code.to_string()));
        }
    }
}
