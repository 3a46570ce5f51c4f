//! JWT creation and verification.
//!
//! Tokens are signed with HS256 using [`JwtConfig::secret`] and expire
//! [`JwtConfig::token_expiry`] seconds after issue. Verification checks the
//! signature and expiry; every failure collapses into
//! [`AppError::InvalidToken`] so callers cannot distinguish a forged token
//! from an expired one.

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use inventra_config::JwtConfig;
use inventra_core::AppError;
use inventra_models::User;

use crate::claims::Claims;

/// Issues a token for `user`, valid from now.
pub fn create_token(user: &User, jwt_config: &JwtConfig) -> Result<String, AppError> {
    create_token_at(user, Utc::now(), jwt_config)
}

/// Issues a token as though it had been signed at `issued_at`.
///
/// Lets callers mint tokens that are already expired or close to expiry.
pub fn create_token_at(
    user: &User,
    issued_at: DateTime<Utc>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let iat = issued_at.timestamp().max(0);
    let exp = (iat + jwt_config.token_expiry).max(0);

    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        email: user.email.clone(),
        role: user.role,
        iat: iat as usize,
        exp: exp as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry and returns the embedded claims.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use inventra_models::{UserId, UserRole};

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test_secret_key_for_testing_purposes".to_string(),
            token_expiry: 86_400,
        }
    }

    fn test_user(role: UserRole) -> User {
        User {
            id: UserId::new(),
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_token_success() {
        let token = create_token(&test_user(UserRole::User), &test_config()).unwrap();

        assert!(!token.is_empty());
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_verify_token_round_trips_claims() {
        let config = test_config();
        let user = test_user(UserRole::Admin);
        let token = create_token(&user, &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "alice@x.com");
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn test_verify_token_with_wrong_secret() {
        let token = create_token(&test_user(UserRole::User), &test_config()).unwrap();
        let wrong_config = JwtConfig {
            secret: "wrong_secret".to_string(),
            ..test_config()
        };

        assert!(matches!(
            verify_token(&token, &wrong_config),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_verify_invalid_token() {
        assert!(matches!(
            verify_token("invalid.token.here", &test_config()),
            Err(AppError::InvalidToken)
        ));
        assert!(matches!(
            verify_token("", &test_config()),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = test_config();
        let issued_at = Utc::now() - Duration::hours(25);
        let token = create_token_at(&test_user(UserRole::User), issued_at, &config).unwrap();

        assert!(matches!(
            verify_token(&token, &config),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_token_near_expiry_is_still_valid() {
        let config = test_config();
        let issued_at = Utc::now() - Duration::hours(23);
        let token = create_token_at(&test_user(UserRole::User), issued_at, &config).unwrap();

        assert!(verify_token(&token, &config).is_ok());
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let config = test_config();
        let token = create_token(&test_user(UserRole::User), &config).unwrap();
        let admin_token = create_token(&test_user(UserRole::Admin), &config).unwrap();

        // splice the admin payload onto the user signature
        let parts: Vec<&str> = token.split('.').collect();
        let admin_parts: Vec<&str> = admin_token.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], admin_parts[1], parts[2]);

        assert!(matches!(
            verify_token(&forged, &config),
            Err(AppError::InvalidToken)
        ));
    }
}
