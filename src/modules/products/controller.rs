use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use inventra_core::{AppError, ErrorResponse, MessageResponse};

use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreateProductRequest, ProductMutationResponse, ProductResponse, ProductsResponse,
    UpdateProductRequest,
};
use super::service::ProductService;

/// List all products, newest first
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products", body = ProductsResponse),
        (status = 401, description = "Access token required", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse)
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_products(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<ProductsResponse>, AppError> {
    let products = ProductService::list(state.store.as_ref()).await?;
    Ok(Json(ProductsResponse { products }))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = ProductResponse),
        (status = 401, description = "Access token required", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_product(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = ProductService::get(state.store.as_ref(), &id).await?;
    Ok(Json(ProductResponse { product }))
}

/// Create a product (admin only)
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductMutationResponse),
        (status = 400, description = "Validation failed or duplicate staff ID / serial number", body = ErrorResponse),
        (status = 401, description = "Access token required", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.username = %auth_user.username()))]
pub async fn create_product(
    State(state): State<AppState>,
    RequireAdmin(auth_user): RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductMutationResponse>), AppError> {
    let product = ProductService::create(state.store.as_ref(), dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductMutationResponse {
            message: "Product created successfully".to_string(),
            product,
        }),
    ))
}

/// Update a product (admin only)
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductMutationResponse),
        (status = 400, description = "Validation failed or duplicate staff ID / serial number", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.username = %auth_user.username()))]
pub async fn update_product(
    State(state): State<AppState>,
    RequireAdmin(auth_user): RequireAdmin,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateProductRequest>,
) -> Result<Json<ProductMutationResponse>, AppError> {
    let product = ProductService::update(state.store.as_ref(), &id, dto).await?;

    Ok(Json(ProductMutationResponse {
        message: "Product updated successfully".to_string(),
        product,
    }))
}

/// Delete a product (admin only)
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user.username = %auth_user.username()))]
pub async fn delete_product(
    State(state): State<AppState>,
    RequireAdmin(auth_user): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    ProductService::delete(state.store.as_ref(), &id).await?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

/// Case-insensitive substring search over name, department, make, model and serial number
#[utoipa::path(
    get,
    path = "/api/products/search/{query}",
    params(("query" = String, Path, description = "Text to search for")),
    responses(
        (status = 200, description = "Matching products, newest first", body = ProductsResponse),
        (status = 401, description = "Access token required", body = ErrorResponse)
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn search_products(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(query): Path<String>,
) -> Result<Json<ProductsResponse>, AppError> {
    let products = ProductService::search(state.store.as_ref(), &query).await?;
    Ok(Json(ProductsResponse { products }))
}
