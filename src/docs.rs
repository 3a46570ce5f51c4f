use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use inventra_core::{ErrorResponse, FieldError, MessageResponse};
use inventra_models::{Asset, AssetStatus, User, UserRole};

use crate::modules::auth::model::{
    AuthResponse, LoginRequest, ProfileResponse, RegisterRequest, UpdateProfileRequest,
};
use crate::modules::health::controller::HealthResponse;
use crate::modules::products::model::{
    CreateProductRequest, ProductMutationResponse, ProductResponse, ProductsResponse,
    UpdateProductRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::get_profile,
        crate::modules::auth::controller::update_profile,
        crate::modules::products::controller::list_products,
        crate::modules::products::controller::get_product,
        crate::modules::products::controller::create_product,
        crate::modules::products::controller::update_product,
        crate::modules::products::controller::delete_product,
        crate::modules::products::controller::search_products,
        crate::modules::users::controller::get_user,
        crate::modules::health::controller::health,
    ),
    components(
        schemas(
            User,
            UserRole,
            Asset,
            AssetStatus,
            RegisterRequest,
            LoginRequest,
            UpdateProfileRequest,
            AuthResponse,
            ProfileResponse,
            CreateProductRequest,
            UpdateProductRequest,
            ProductsResponse,
            ProductResponse,
            ProductMutationResponse,
            HealthResponse,
            MessageResponse,
            ErrorResponse,
            FieldError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and profile"),
        (name = "Products", description = "Inventory assets"),
        (name = "Users", description = "User lookup"),
        (name = "Health", description = "Liveness")
    ),
    info(
        title = "Inventra API",
        version = "0.1.0",
        description = "Inventory tracking backend built with Rust, Axum, and PostgreSQL with JWT-based authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
