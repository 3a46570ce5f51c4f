use axum::Json;
use axum::extract::State;
use tracing::instrument;

use inventra_core::{AppError, ErrorResponse};

use crate::middleware::role::RequireSelfOrAdmin;
use crate::modules::auth::model::ProfileResponse;
use crate::state::AppState;

/// Get a user's public profile (self or admin)
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = ProfileResponse),
        (status = 401, description = "Access token required", body = ErrorResponse),
        (status = 403, description = "Access denied", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, access), fields(user.username = %access.auth_user.username()))]
pub async fn get_user(
    State(state): State<AppState>,
    access: RequireSelfOrAdmin,
) -> Result<Json<ProfileResponse>, AppError> {
    let user_id = access.target.ok_or(AppError::NotFound("User"))?;

    let user = state
        .store
        .find_user_by_id(user_id)
        .await?
        .map(|record| record.to_user())
        .ok_or(AppError::NotFound("User"))?;

    Ok(Json(ProfileResponse { user }))
}
