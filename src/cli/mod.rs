//! Administrative commands behind the `inventra-cli` binary.

pub mod seeder;

use anyhow::{Context, bail};
use validator::Validate;

use inventra_config::PasswordConfig;
use inventra_core::{AppError, PlainPassword};
use inventra_db::Store;
use inventra_models::{NewUser, UserRole};

use crate::modules::auth::model::RegisterRequest;

/// Creates an admin account, applying the same field rules as registration.
pub async fn create_admin(
    store: &dyn Store,
    username: &str,
    email: &str,
    password: &str,
    password_config: &PasswordConfig,
) -> anyhow::Result<()> {
    let request = RegisterRequest {
        username: username.trim().to_string(),
        email: email.trim().to_string(),
        password: password.to_string(),
        role: Some(UserRole::Admin.as_str().to_string()),
    };

    if let Err(errors) = request.validate() {
        if let AppError::ValidationFailed(fields) = AppError::from(errors) {
            let messages: Vec<String> = fields.into_iter().map(|f| f.message).collect();
            bail!("{}", messages.join(", "));
        }
        bail!("Invalid admin details");
    }

    let password_hash = PlainPassword::new(request.password)
        .hash(password_config.bcrypt_cost)
        .context("Failed to hash password")?;

    let created = store
        .insert_user_if_absent(NewUser {
            username: request.username,
            email: request.email,
            password_hash,
            role: UserRole::Admin,
        })
        .await
        .context("Failed to insert admin")?;

    if !created {
        bail!("User with this username or email already exists");
    }

    Ok(())
}
