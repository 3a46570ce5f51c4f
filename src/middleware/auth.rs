use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use inventra_auth::{Claims, verify_token};
use inventra_core::AppError;
use inventra_models::{UserId, UserRole};

use crate::state::AppState;

/// The authenticated caller, resolved from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.0.user_id()
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }

    pub fn role(&self) -> UserRole {
        self.0.role
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // already resolved by `require_auth`
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::MissingToken)?;

        let claims = verify_token(bearer.token(), &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Layer that rejects unauthenticated requests and stores the caller in the
/// request extensions for downstream extractors.
pub async fn require_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    parts.extensions.insert(auth_user);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: UserRole) -> Claims {
        Claims {
            sub: UserId::new().to_string(),
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            role,
            iat: 1_700_000_000,
            exp: 9_999_999_999,
        }
    }

    #[test]
    fn test_accessors() {
        let auth_user = AuthUser(claims(UserRole::Admin));

        assert_eq!(auth_user.username(), "alice");
        assert_eq!(auth_user.role(), UserRole::Admin);
        assert!(auth_user.is_admin());
        assert!(auth_user.user_id().is_ok());
    }

    #[test]
    fn test_regular_user_is_not_admin() {
        assert!(!AuthUser(claims(UserRole::User)).is_admin());
    }
}
