use auth_identity::IdentityError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use database_layer::DatabaseError;
use error_common::codes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Body of every error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Human-readable error message
    #[schema(example = "Resource not found: appointment")]
    pub error: String,
    /// Error kind
    #[schema(example = "not_found")]
    pub error_type: String,
    /// Stable machine-readable code
    #[schema(example = "RESOURCE_5001")]
    pub error_code: String,
    /// Unique error ID, also written to the server log
    pub error_id: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Main API error enum
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {message}")]
    Validation { message: String, code: &'static str },

    #[error("Authentication error: {message}")]
    Authentication { message: String, code: &'static str },

    #[error("Authorization error: {message}")]
    Authorization { message: String },

    #[error("Resource not found: {resource_type}")]
    NotFound { resource_type: String },

    #[error("Resource conflict: {message}")]
    Conflict { message: String },

    #[error("Cannot change status from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl ApiError {
    /// Create a simple validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: codes::validation::INVALID_INPUT,
        }
    }

    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: codes::validation::MISSING_REQUIRED_FIELD,
        }
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: codes::validation::INVALID_FORMAT,
        }
    }

    /// Create an authentication error for rejected credentials
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            code: codes::authentication::INVALID_CREDENTIALS,
        }
    }

    pub fn missing_token(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            code: codes::authentication::TOKEN_MISSING,
        }
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            code: codes::authentication::TOKEN_INVALID,
        }
    }

    /// Create an authorization error
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(resource_type: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Authentication { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Authorization { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } | ApiError::InvalidTransition { .. } => StatusCode::CONFLICT,
            ApiError::Database(db_err) => match db_err {
                DatabaseError::Conflict(_) => StatusCode::CONFLICT,
                DatabaseError::ConnectionFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation_error",
            ApiError::Authentication { .. } => "authentication_error",
            ApiError::Authorization { .. } => "authorization_error",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Conflict { .. } | ApiError::Database(DatabaseError::Conflict(_)) => "conflict",
            ApiError::InvalidTransition { .. } => "invalid_transition",
            ApiError::Database(DatabaseError::ConnectionFailed(_)) => "service_unavailable",
            ApiError::Database(_) => "database_error",
            ApiError::Internal { .. } => "internal_error",
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation { code, .. } | ApiError::Authentication { code, .. } => *code,
            ApiError::Authorization { .. } => codes::authorization::ACCESS_DENIED,
            ApiError::NotFound { .. } => codes::resource::NOT_FOUND,
            ApiError::Conflict { .. } | ApiError::Database(DatabaseError::Conflict(_)) => {
                codes::resource::CONFLICT
            }
            ApiError::InvalidTransition { .. } => codes::resource::INVALID_TRANSITION,
            ApiError::Database(DatabaseError::ConnectionFailed(_)) => codes::database::CONNECTION_FAILED,
            ApiError::Database(_) => codes::database::QUERY_FAILED,
            ApiError::Internal { .. } => codes::internal::UNEXPECTED,
        }
    }

    /// Message safe to return to clients; server-side failures are never echoed
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Database(DatabaseError::Conflict(msg)) => msg.clone(),
            ApiError::Database(DatabaseError::ConnectionFailed(_)) => {
                "The service is temporarily unavailable. Please try again later.".to_string()
            }
            ApiError::Database(_) | ApiError::Internal { .. } => {
                "An internal error occurred. Quote the error ID when contacting support.".to_string()
            }
            ApiError::Validation { message, .. }
            | ApiError::Authentication { message, .. }
            | ApiError::Authorization { message }
            | ApiError::Conflict { message } => message.clone(),
            ApiError::NotFound { .. } | ApiError::InvalidTransition { .. } => self.to_string(),
        }
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidCredentials => ApiError::authentication("Invalid email or password"),
            IdentityError::AccountDisabled => ApiError::authentication("Account disabled"),
            IdentityError::TokenExpired => ApiError::invalid_token("Token expired"),
            IdentityError::InvalidToken(_) => ApiError::invalid_token("Invalid token"),
            IdentityError::UserAlreadyExists => ApiError::conflict("An account with this email already exists"),
            IdentityError::InvalidEmail
            | IdentityError::EmptyPassword
            | IdentityError::UnknownRole(_) => ApiError::validation(err.to_string()),
            IdentityError::DatabaseError(e) => ApiError::Database(DatabaseError::from(e)),
            IdentityError::CorruptRecord(_)
            | IdentityError::HashingError(_)
            | IdentityError::JwtError(_) => ApiError::internal(err.to_string()),
        }
    }
}

// Rejections from axum's own extractors keep the JSON error body

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_format(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::invalid_format(format!("Invalid query string: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::invalid_format(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();

        // Log the error with correlation ID
        if status_code.is_server_error() {
            error!(
                error_id = %error_id,
                error_type = %self.error_type(),
                status_code = %status_code.as_u16(),
                error = %self,
                "API error occurred"
            );
        } else {
            warn!(
                error_id = %error_id,
                error_type = %self.error_type(),
                status_code = %status_code.as_u16(),
                error = %self,
                "Request rejected"
            );
        }

        let body = ApiErrorResponse {
            error: self.public_message(),
            error_type: self.error_type().to_string(),
            error_code: self.error_code().to_string(),
            error_id,
            timestamp: chrono::Utc::now(),
        };

        (status_code, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
