//! Role and ownership checks.
//!
//! [`AccessPolicy`] holds the decision logic; the extractors apply it to the
//! authenticated caller before the handler body runs.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use inventra_core::AppError;
use inventra_models::UserId;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Only identities with the admin role.
    Admin,
    /// Admins, or the user the resource belongs to. `None` means the target
    /// is not a valid user id, so only admins pass.
    AdminOrOwner(Option<UserId>),
}

impl AccessPolicy {
    pub fn authorize(&self, auth_user: &AuthUser) -> Result<(), AppError> {
        match self {
            AccessPolicy::Admin if auth_user.is_admin() => Ok(()),
            AccessPolicy::Admin => Err(AppError::InsufficientRole),
            AccessPolicy::AdminOrOwner(_) if auth_user.is_admin() => Ok(()),
            AccessPolicy::AdminOrOwner(Some(owner)) if auth_user.user_id()? == *owner => Ok(()),
            AccessPolicy::AdminOrOwner(_) => Err(AppError::AccessDenied),
        }
    }
}

/// Extractor for admin-only endpoints.
///
/// ```rust,ignore
/// pub async fn delete_product(
///     RequireAdmin(auth_user): RequireAdmin,
///     Path(id): Path<String>,
/// ) -> Result<Json<MessageResponse>, AppError> { ... }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        AccessPolicy::Admin.authorize(&auth_user)?;

        Ok(RequireAdmin(auth_user))
    }
}

/// Extractor for routes of the form `/{id}` that a user may read about
/// themselves, and admins about anyone.
#[derive(Debug, Clone)]
pub struct RequireSelfOrAdmin {
    pub auth_user: AuthUser,
    /// The path id, if it parsed as a user id.
    pub target: Option<UserId>,
}

impl FromRequestParts<AppState> for RequireSelfOrAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        let Path(raw_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("User"))?;
        let target = raw_id.parse::<UserId>().ok();

        AccessPolicy::AdminOrOwner(target).authorize(&auth_user)?;

        Ok(RequireSelfOrAdmin { auth_user, target })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventra_auth::Claims;
    use inventra_models::UserRole;

    fn auth_user(id: UserId, role: UserRole) -> AuthUser {
        AuthUser(Claims {
            sub: id.to_string(),
            username: "tester".to_string(),
            email: "tester@x.com".to_string(),
            role,
            iat: 1_700_000_000,
            exp: 9_999_999_999,
        })
    }

    #[test]
    fn test_admin_policy() {
        let admin = auth_user(UserId::new(), UserRole::Admin);
        let user = auth_user(UserId::new(), UserRole::User);

        assert!(AccessPolicy::Admin.authorize(&admin).is_ok());
        assert!(matches!(
            AccessPolicy::Admin.authorize(&user),
            Err(AppError::InsufficientRole)
        ));
    }

    #[test]
    fn test_owner_is_admitted() {
        let id = UserId::new();
        let user = auth_user(id, UserRole::User);

        assert!(AccessPolicy::AdminOrOwner(Some(id)).authorize(&user).is_ok());
    }

    #[test]
    fn test_other_user_is_denied() {
        let user = auth_user(UserId::new(), UserRole::User);

        assert!(matches!(
            AccessPolicy::AdminOrOwner(Some(UserId::new())).authorize(&user),
            Err(AppError::AccessDenied)
        ));
        assert!(matches!(
            AccessPolicy::AdminOrOwner(None).authorize(&user),
            Err(AppError::AccessDenied)
        ));
    }

    #[test]
    fn test_admin_may_access_anyone() {
        let admin = auth_user(UserId::new(), UserRole::Admin);

        assert!(AccessPolicy::AdminOrOwner(Some(UserId::new())).authorize(&admin).is_ok());
        assert!(AccessPolicy::AdminOrOwner(None).authorize(&admin).is_ok());
    }
}
