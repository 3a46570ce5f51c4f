//! Application error taxonomy.
//!
//! Every handler returns `Result<_, AppError>`. Each variant maps to exactly one
//! HTTP status and a JSON body of the form `{"message": "..."}`:
//!
//! | Variant | Status |
//! |---------|--------|
//! | [`AppError::ValidationFailed`] | 400 (adds `errors`) |
//! | [`AppError::BadRequest`] | 400 |
//! | [`AppError::DuplicateCredential`] | 400 |
//! | [`AppError::DuplicateField`] | 400 (adds `field`) |
//! | [`AppError::MissingToken`] | 401 |
//! | [`AppError::InvalidCredentials`] | 401 |
//! | [`AppError::InvalidToken`] | 403 |
//! | [`AppError::InsufficientRole`] | 403 |
//! | [`AppError::AccessDenied`] | 403 |
//! | [`AppError::NotFound`] | 404 |
//! | [`AppError::Internal`] | 500 |
//!
//! Internal errors are logged server-side and reduced to a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// A single failed field rule, reported with the wire (camelCase) field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Generic error body used in OpenAPI responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

/// Plain acknowledgement body.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed")]
    ValidationFailed(Vec<FieldError>),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    DuplicateCredential(String),

    #[error("{message}")]
    DuplicateField {
        field: &'static str,
        message: &'static str,
    },

    #[error("Access token required")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Admin access required")]
    InsufficientRole,

    #[error("Access denied")]
    AccessDenied,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn duplicate_credential(message: impl Into<String>) -> Self {
        Self::DuplicateCredential(message.into())
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::Internal(anyhow::anyhow!(message.into()))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationFailed(_)
            | Self::BadRequest(_)
            | Self::DuplicateCredential(_)
            | Self::DuplicateField { .. } => StatusCode::BAD_REQUEST,
            Self::MissingToken | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::InvalidToken | Self::InsufficientRole | Self::AccessDenied => {
                StatusCode::FORBIDDEN
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            Self::ValidationFailed(errors) => json!({
                "message": self.to_string(),
                "errors": errors,
            }),
            Self::DuplicateField { field, message } => json!({
                "message": message,
                "field": field,
            }),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "Request failed with internal error");
                json!({ "message": "Server error" })
            }
            _ => json!({ "message": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errors)| {
                errors.first().map(|error| {
                    let field = wire_field_name(&field);
                    let message = error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    FieldError { field, message }
                })
            })
            .collect();

        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationFailed(fields)
    }
}

/// Converts a Rust field name to the camelCase name clients send.
pub fn wire_field_name(field: &str) -> String {
    if field == "capacity_va" {
        return "capacityVA".to_string();
    }

    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
