use tracing::{debug, info, instrument, warn};

use inventra_auth::create_token;
use inventra_config::{JwtConfig, PasswordConfig};
use inventra_core::{AppError, PlainPassword};
use inventra_db::{Store, StoreError, UniqueConstraint};
use inventra_models::{NewUser, User, UserChanges, UserId, UserRole};

use crate::metrics;

use super::model::{LoginRequest, RegisterRequest, UpdateProfileRequest};

pub struct AuthService;

impl AuthService {
    /// Creates the account and returns it with a freshly issued token.
    #[instrument(skip(store, dto, jwt_config, password_config), fields(user.username = %dto.username))]
    pub async fn register(
        store: &dyn Store,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
        password_config: &PasswordConfig,
    ) -> Result<(User, String), AppError> {
        let RegisterRequest {
            username,
            email,
            password,
            role,
        } = dto;

        if store.credential_exists(&username, &email).await? {
            warn!(user.username = %username, "Registration with existing username or email");
            return Err(AppError::duplicate_credential(
                "Username or email already exists",
            ));
        }

        // validated upstream
        let role = match role.as_deref() {
            Some(role) => role.parse::<UserRole>().map_err(AppError::bad_request)?,
            None => UserRole::User,
        };

        let password_hash = PlainPassword::new(password).hash(password_config.bcrypt_cost)?;

        let record = store
            .insert_user(NewUser {
                username,
                email,
                password_hash,
                role,
            })
            .await?;

        let user = record.to_user();
        let token = create_token(&user, jwt_config)?;

        metrics::track_user_created(user.role.as_str());
        metrics::track_jwt_issued();
        info!(user.id = %user.id, user.role = %user.role, "User registered");

        Ok((user, token))
    }

    /// Unknown username and wrong password are indistinguishable to the caller.
    #[instrument(skip(store, dto, jwt_config), fields(user.username = %dto.username))]
    pub async fn login(
        store: &dyn Store,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<(User, String), AppError> {
        let Some(record) = store.find_user_by_username(&dto.username).await? else {
            debug!("Login for unknown username");
            metrics::track_user_login_failure("unknown_user");
            return Err(AppError::InvalidCredentials);
        };

        if !PlainPassword::new(dto.password).matches(&record.password_hash)? {
            debug!(user.id = %record.id, "Login with wrong password");
            metrics::track_user_login_failure("wrong_password");
            return Err(AppError::InvalidCredentials);
        }

        let user = record.to_user();
        let token = create_token(&user, jwt_config)?;

        metrics::track_user_login_success(user.role.as_str());
        metrics::track_jwt_issued();
        info!(user.id = %user.id, "User logged in");

        Ok((user, token))
    }

    #[instrument(skip(store))]
    pub async fn get_profile(store: &dyn Store, user_id: UserId) -> Result<User, AppError> {
        store
            .find_user_by_id(user_id)
            .await?
            .map(|record| record.to_user())
            .ok_or(AppError::NotFound("User"))
    }

    #[instrument(skip(store, dto, password_config))]
    pub async fn update_profile(
        store: &dyn Store,
        user_id: UserId,
        dto: UpdateProfileRequest,
        password_config: &PasswordConfig,
    ) -> Result<User, AppError> {
        let password_hash = dto
            .password
            .map(|password| PlainPassword::new(password).hash(password_config.bcrypt_cost))
            .transpose()?;

        let changes = UserChanges {
            email: dto.email,
            password_hash,
        };

        let record = store
            .update_user(user_id, changes)
            .await
            .map_err(|e| match e {
                StoreError::Conflict(UniqueConstraint::Email) => {
                    AppError::duplicate_credential("Email already exists")
                }
                other => other.into(),
            })?
            .ok_or(AppError::NotFound("User"))?;

        info!(user.id = %record.id, "Profile updated");
        Ok(record.to_user())
    }
}
