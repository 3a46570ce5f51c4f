use tracing::info;

use inventra_config::{AdminConfig, PasswordConfig};
use inventra_core::{AppError, PlainPassword};
use inventra_db::Store;
use inventra_models::{NewUser, UserRole};

/// Makes sure the well-known admin account exists.
///
/// A single insert-if-absent, so concurrent starts cannot create two admins.
/// Returns whether the account was created by this call.
pub async fn ensure_default_admin(
    store: &dyn Store,
    admin: &AdminConfig,
    password_config: &PasswordConfig,
) -> Result<bool, AppError> {
    let password_hash =
        PlainPassword::new(admin.password.as_str()).hash(password_config.bcrypt_cost)?;

    let created = store
        .insert_user_if_absent(NewUser {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password_hash,
            role: UserRole::Admin,
        })
        .await?;

    if created {
        info!(user.username = %admin.username, "Default admin user created");
    } else {
        info!(user.username = %admin.username, "Default admin user already present");
    }

    Ok(created)
}
