use tracing::{info, instrument, warn};

use inventra_core::AppError;
use inventra_db::{Store, StoreError};
use inventra_models::{Asset, AssetId};

use crate::metrics;

use super::model::{CreateProductRequest, UpdateProductRequest};

/// A path id that is not a UUID cannot name a stored asset.
fn parse_id(raw: &str) -> Result<AssetId, AppError> {
    raw.parse().map_err(|_| AppError::NotFound("Product"))
}

fn log_conflict(err: StoreError) -> AppError {
    if let StoreError::Conflict(constraint) = &err {
        warn!(constraint = constraint.constraint_name(), "Asset uniqueness conflict");
    }
    err.into()
}

pub struct ProductService;

impl ProductService {
    #[instrument(skip(store))]
    pub async fn list(store: &dyn Store) -> Result<Vec<Asset>, AppError> {
        Ok(store.list_assets().await?)
    }

    #[instrument(skip(store))]
    pub async fn get(store: &dyn Store, id: &str) -> Result<Asset, AppError> {
        let id = parse_id(id)?;
        store
            .find_asset(id)
            .await?
            .ok_or(AppError::NotFound("Product"))
    }

    #[instrument(skip(store, dto), fields(asset.serial_number = %dto.serial_number))]
    pub async fn create(store: &dyn Store, dto: CreateProductRequest) -> Result<Asset, AppError> {
        let asset = store
            .insert_asset(dto.into_new_asset()?)
            .await
            .map_err(log_conflict)?;

        metrics::track_asset_created();
        info!(asset.id = %asset.id, "Asset created");
        Ok(asset)
    }

    #[instrument(skip(store, dto))]
    pub async fn update(
        store: &dyn Store,
        id: &str,
        dto: UpdateProductRequest,
    ) -> Result<Asset, AppError> {
        let id = parse_id(id)?;
        let asset = store
            .update_asset(id, dto.into_changes()?)
            .await
            .map_err(log_conflict)?
            .ok_or(AppError::NotFound("Product"))?;

        info!(asset.id = %asset.id, "Asset updated");
        Ok(asset)
    }

    #[instrument(skip(store))]
    pub async fn delete(store: &dyn Store, id: &str) -> Result<(), AppError> {
        let id = parse_id(id)?;
        if !store.delete_asset(id).await? {
            return Err(AppError::NotFound("Product"));
        }

        metrics::track_asset_deleted();
        info!(asset.id = %id, "Asset deleted");
        Ok(())
    }

    /// Literal substring match; the path segment is used as given.
    #[instrument(skip(store))]
    pub async fn search(store: &dyn Store, query: &str) -> Result<Vec<Asset>, AppError> {
        Ok(store.search_assets(query).await?)
    }
}
