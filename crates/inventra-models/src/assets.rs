//! Inventory assets.
//!
//! An asset is a piece of equipment (typically a UPS) assigned to a staff
//! member at a location. Clients know these as "products".

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::ids::AssetId;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "asset_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum AssetStatus {
    #[default]
    Functional,
    NonFunctional,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Functional => "functional",
            AssetStatus::NonFunctional => "non-functional",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "functional" => Ok(AssetStatus::Functional),
            "non-functional" => Ok(AssetStatus::NonFunctional),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: AssetId,
    pub first_name: String,
    pub last_name: String,
    pub staff_id: i64,
    pub designation: String,
    pub department: String,
    pub location: String,
    pub block: String,
    pub room_number: String,
    pub make: String,
    pub model: String,
    pub serial_number: String,
    #[serde(rename = "capacityVA")]
    pub capacity_va: String,
    pub issue_date: DateTime<Utc>,
    pub status: AssetStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Asset {
    /// Case-insensitive substring match over the searchable text fields.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_query(&self, needle: &str) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.department,
            &self.make,
            &self.model,
            &self.serial_number,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone)]
pub struct NewAsset {
    pub first_name: String,
    pub last_name: String,
    pub staff_id: i64,
    pub designation: String,
    pub department: String,
    pub location: String,
    pub block: String,
    pub room_number: String,
    pub make: String,
    pub model: String,
    pub serial_number: String,
    pub capacity_va: String,
    pub issue_date: DateTime<Utc>,
    pub status: AssetStatus,
}

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct AssetChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub staff_id: Option<i64>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub block: Option<String>,
    pub room_number: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub capacity_va: Option<String>,
    pub issue_date: Option<DateTime<Utc>>,
    pub status: Option<AssetStatus>,
}

impl AssetChanges {
    /// Applies the present fields onto `asset`. Does not touch `updated_at`.
    pub fn apply_to(self, asset: &mut Asset) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        set(&mut asset.first_name, self.first_name);
        set(&mut asset.last_name, self.last_name);
        set(&mut asset.staff_id, self.staff_id);
        set(&mut asset.designation, self.designation);
        set(&mut asset.department, self.department);
        set(&mut asset.location, self.location);
        set(&mut asset.block, self.block);
        set(&mut asset.room_number, self.room_number);
        set(&mut asset.make, self.make);
        set(&mut asset.model, self.model);
        set(&mut asset.serial_number, self.serial_number);
        set(&mut asset.capacity_va, self.capacity_va);
        set(&mut asset.issue_date, self.issue_date);
        set(&mut asset.status, self.status);
    }
}

/// Parses an ISO-8601 date or date-time.
///
/// Accepts RFC 3339 timestamps, naive date-times (read as UTC) and plain
/// `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_issue_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn sample_asset() -> Asset {
        Asset {
            id: AssetId::new(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            staff_id: 1001,
            designation: "Engineer".to_string(),
            department: "IT".to_string(),
            location: "HQ".to_string(),
            block: "A".to_string(),
            room_number: "101".to_string(),
            make: "APC".to_string(),
            model: "Smart-UPS".to_string(),
            serial_number: "SN-0001".to_string(),
            capacity_va: "1500".to_string(),
            issue_date: Utc::now(),
            status: AssetStatus::Functional,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&AssetStatus::NonFunctional).unwrap(),
            "\"non-functional\""
        );
        assert_eq!(
            "non-functional".parse::<AssetStatus>().unwrap(),
            AssetStatus::NonFunctional
        );
        assert!("broken".parse::<AssetStatus>().is_err());
    }

    #[test]
    fn test_asset_serializes_camel_case_with_capacity_va() {
        let json = serde_json::to_value(sample_asset()).unwrap();

        assert_eq!(json["firstName"], "John");
        assert_eq!(json["staffId"], 1001);
        assert_eq!(json["serialNumber"], "SN-0001");
        assert_eq!(json["capacityVA"], "1500");
        assert_eq!(json["status"], "functional");
        assert!(json.get("capacity_va").is_none());
    }

    #[test]
    fn test_matches_query_is_case_insensitive() {
        let asset = sample_asset();

        assert!(asset.matches_query("apc"));
        assert!(asset.matches_query("doe"));
        assert!(asset.matches_query("sn-00"));
        assert!(asset.matches_query("it"));
        assert!(!asset.matches_query("dell"));
    }

    #[test]
    fn test_matches_query_ignores_non_searchable_fields() {
        let asset = sample_asset();

        // location and designation are not searched
        assert!(!asset.matches_query("hq"));
        assert!(!asset.matches_query("engineer"));
    }

    #[test]
    fn test_apply_changes_keeps_absent_fields() {
        let mut asset = sample_asset();
        let changes = AssetChanges {
            make: Some("Eaton".to_string()),
            status: Some(AssetStatus::NonFunctional),
            ..Default::default()
        };

        changes.apply_to(&mut asset);

        assert_eq!(asset.make, "Eaton");
        assert_eq!(asset.status, AssetStatus::NonFunctional);
        assert_eq!(asset.first_name, "John");
        assert_eq!(asset.serial_number, "SN-0001");
    }

    #[test]
    fn test_parse_issue_date_formats() {
        let date = parse_issue_date("2024-01-15").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 1, 15));
        assert_eq!(date.hour(), 0);

        let rfc = parse_issue_date("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(rfc.hour(), 10);

        let offset = parse_issue_date("2024-01-15T10:30:00+02:00").unwrap();
        assert_eq!(offset.hour(), 8);

        let millis = parse_issue_date("2024-01-15T10:30:00.000Z").unwrap();
        assert_eq!(millis.minute(), 30);

        assert!(parse_issue_date("2024-01-15T10:30:00").is_some());
    }

    #[test]
    fn test_parse_issue_date_rejects_garbage() {
        assert!(parse_issue_date("").is_none());
        assert!(parse_issue_date("yesterday").is_none());
        assert!(parse_issue_date("2024-13-45").is_none());
        assert!(parse_issue_date("15/01/2024").is_none());
    }
}
