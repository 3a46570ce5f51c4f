//! JWT claim structure for bearer tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use inventra_core::AppError;
use inventra_models::{UserId, UserRole};

/// Claims embedded in every issued token.
///
/// Role and identity are snapshotted at issue time. A later role change only
/// takes effect once the client obtains a new token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    /// Issued-at (Unix timestamp)
    pub iat: usize,
    /// Expiration (Unix timestamp)
    pub exp: usize,
}

impl Claims {
    /// Parses the subject back into a typed ID.
    ///
    /// A signed token with a malformed subject is treated like any other
    /// invalid token.
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.sub.parse().map_err(|_| AppError::InvalidToken)
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_with_sub(sub: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            role: UserRole::User,
            iat: 0,
            exp: 0,
        }
    }

    #[test]
    fn test_user_id_parses_subject() {
        let id = UserId::new();
        assert_eq!(claims_with_sub(&id.to_string()).user_id().unwrap(), id);
    }

    #[test]
    fn test_malformed_subject_is_invalid_token() {
        assert!(matches!(
            claims_with_sub("42").user_id(),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_role_serializes_as_string() {
        let json = serde_json::to_value(claims_with_sub("x")).unwrap();
        assert_eq!(json["role"], "user");
    }
}
