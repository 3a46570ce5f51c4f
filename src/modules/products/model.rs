use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use inventra_core::AppError;
use inventra_core::serde::LenientInt;
use inventra_models::{Asset, AssetChanges, AssetStatus, NewAsset, parse_issue_date};

use crate::validator::{iso8601_date, not_blank, positive_int, valid_status};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "First name is required"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Last name is required"))]
    pub last_name: String,

    /// Positive integer; numeric strings are accepted.
    #[serde(default)]
    #[validate(
        required(message = "Staff ID must be a positive integer"),
        custom(function = "positive_int", message = "Staff ID must be a positive integer")
    )]
    #[schema(value_type = i64, example = 1001)]
    pub staff_id: Option<LenientInt>,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Designation is required"))]
    pub designation: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Department is required"))]
    pub department: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Location is required"))]
    pub location: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Block is required"))]
    pub block: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Room number is required"))]
    pub room_number: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Make is required"))]
    pub make: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Model is required"))]
    pub model: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Serial number is required"))]
    pub serial_number: String,

    #[serde(default, rename = "capacityVA")]
    #[validate(custom(function = "not_blank", message = "Capacity VA is required"))]
    pub capacity_va: String,

    /// ISO-8601 date or date-time.
    #[serde(default)]
    #[validate(custom(function = "iso8601_date", message = "Valid issue date is required"))]
    #[schema(example = "2024-01-15")]
    pub issue_date: String,

    /// Defaults to `functional`.
    #[validate(custom(
        function = "valid_status",
        message = "Status must be functional or non-functional"
    ))]
    #[schema(example = "functional")]
    pub status: Option<String>,
}

fn parse_status(status: Option<&str>) -> Result<Option<AssetStatus>, AppError> {
    status
        .map(|s| s.parse::<AssetStatus>().map_err(AppError::bad_request))
        .transpose()
}

fn parse_date(value: &str) -> Result<chrono::DateTime<chrono::Utc>, AppError> {
    parse_issue_date(value).ok_or_else(|| AppError::bad_request("Valid issue date is required"))
}

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

impl CreateProductRequest {
    /// Converts a validated request into a store insert.
    pub fn into_new_asset(self) -> Result<NewAsset, AppError> {
        let staff_id = self
            .staff_id
            .and_then(LenientInt::value)
            .ok_or_else(|| AppError::bad_request("Staff ID must be a positive integer"))?;

        Ok(NewAsset {
            first_name: trimmed(self.first_name),
            last_name: trimmed(self.last_name),
            staff_id,
            designation: trimmed(self.designation),
            department: trimmed(self.department),
            location: trimmed(self.location),
            block: trimmed(self.block),
            room_number: trimmed(self.room_number),
            make: trimmed(self.make),
            model: trimmed(self.model),
            serial_number: trimmed(self.serial_number),
            capacity_va: trimmed(self.capacity_va),
            issue_date: parse_date(&self.issue_date)?,
            status: parse_status(self.status.as_deref())?.unwrap_or_default(),
        })
    }
}

/// Partial update; absent or `null` fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(custom(function = "not_blank", message = "First name cannot be empty"))]
    pub first_name: Option<String>,

    #[validate(custom(function = "not_blank", message = "Last name cannot be empty"))]
    pub last_name: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "positive_int", message = "Staff ID must be a positive integer"))]
    #[schema(value_type = Option<i64>)]
    pub staff_id: Option<LenientInt>,

    #[validate(custom(function = "not_blank", message = "Designation cannot be empty"))]
    pub designation: Option<String>,

    #[validate(custom(function = "not_blank", message = "Department cannot be empty"))]
    pub department: Option<String>,

    #[validate(custom(function = "not_blank", message = "Location cannot be empty"))]
    pub location: Option<String>,

    #[validate(custom(function = "not_blank", message = "Block cannot be empty"))]
    pub block: Option<String>,

    #[validate(custom(function = "not_blank", message = "Room number cannot be empty"))]
    pub room_number: Option<String>,

    #[validate(custom(function = "not_blank", message = "Make cannot be empty"))]
    pub make: Option<String>,

    #[validate(custom(function = "not_blank", message = "Model cannot be empty"))]
    pub model: Option<String>,

    #[validate(custom(function = "not_blank", message = "Serial number cannot be empty"))]
    pub serial_number: Option<String>,

    #[serde(rename = "capacityVA")]
    #[validate(custom(function = "not_blank", message = "Capacity VA cannot be empty"))]
    pub capacity_va: Option<String>,

    #[validate(custom(function = "iso8601_date", message = "Valid issue date is required"))]
    pub issue_date: Option<String>,

    #[validate(custom(
        function = "valid_status",
        message = "Status must be functional or non-functional"
    ))]
    pub status: Option<String>,
}

impl UpdateProductRequest {
    pub fn into_changes(self) -> Result<AssetChanges, AppError> {
        Ok(AssetChanges {
            first_name: self.first_name.map(trimmed),
            last_name: self.last_name.map(trimmed),
            staff_id: self.staff_id.and_then(LenientInt::value),
            designation: self.designation.map(trimmed),
            department: self.department.map(trimmed),
            location: self.location.map(trimmed),
            block: self.block.map(trimmed),
            room_number: self.room_number.map(trimmed),
            make: self.make.map(trimmed),
            model: self.model.map(trimmed),
            serial_number: self.serial_number.map(trimmed),
            capacity_va: self.capacity_va.map(trimmed),
            issue_date: self.issue_date.as_deref().map(parse_date).transpose()?,
            status: parse_status(self.status.as_deref())?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductsResponse {
    pub products: Vec<Asset>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub product: Asset,
}

/// Returned by create and update.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductMutationResponse {
    pub message: String,
    pub product: Asset,
}
