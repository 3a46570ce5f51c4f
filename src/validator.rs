use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError};

use inventra_core::AppError;
use inventra_core::serde::LenientInt;
use inventra_models::{AssetStatus, UserRole, parse_issue_date};

/// JSON body extractor that runs the payload's `Validate` rules.
///
/// Body problems (bad JSON, wrong types, missing content type) are reported as
/// [`AppError::BadRequest`]; rule failures as [`AppError::ValidationFailed`]
/// with one entry per failing field.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let error_msg = rejection.body_text();

    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request("Missing 'Content-Type: application/json' header");
    }

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return AppError::bad_request(format!("{} is required", field));
    }

    if error_msg.contains("invalid type") {
        return AppError::bad_request("Invalid field type in request");
    }

    AppError::bad_request("Invalid request body")
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

// Field rules used by request DTOs via `#[validate(custom(function = ...))]`.
// The error message comes from the attribute.

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

pub fn valid_role(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<UserRole>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("role"))
}

pub fn valid_status(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<AssetStatus>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("status"))
}

/// Integer fields that must be at least 1. Non-integer input fails too.
pub fn positive_int(value: &LenientInt) -> Result<(), ValidationError> {
    match value {
        LenientInt::Valid(n) if *n >= 1 => Ok(()),
        _ => Err(ValidationError::new("positive_int")),
    }
}

pub fn iso8601_date(value: &str) -> Result<(), ValidationError> {
    parse_issue_date(value)
        .map(|_| ())
        .ok_or_else(|| ValidationError::new("iso8601"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("x").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
    }

    #[test]
    fn test_valid_role() {
        assert!(valid_role("user").is_ok());
        assert!(valid_role("admin").is_ok());
        assert!(valid_role("superuser").is_err());
    }

    #[test]
    fn test_valid_status() {
        assert!(valid_status("functional").is_ok());
        assert!(valid_status("non-functional").is_ok());
        assert!(valid_status("broken").is_err());
    }

    #[test]
    fn test_positive_int() {
        assert!(positive_int(&LenientInt::Valid(1)).is_ok());
        assert!(positive_int(&LenientInt::Valid(0)).is_err());
        assert!(positive_int(&LenientInt::Valid(-4)).is_err());
        assert!(positive_int(&LenientInt::Invalid).is_err());
    }

    #[test]
    fn test_iso8601_date() {
        assert!(iso8601_date("2024-01-15").is_ok());
        assert!(iso8601_date("2024-01-15T08:00:00Z").is_ok());
        assert!(iso8601_date("next tuesday").is_err());
    }
}
