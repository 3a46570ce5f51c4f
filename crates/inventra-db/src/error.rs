use inventra_core::AppError;

/// The unique constraints the schema declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueConstraint {
    Username,
    Email,
    StaffId,
    SerialNumber,
}

impl UniqueConstraint {
    /// Maps a Postgres constraint name (as declared in the migrations).
    pub fn from_constraint_name(name: &str) -> Option<Self> {
        match name {
            "users_username_key" => Some(Self::Username),
            "users_email_key" => Some(Self::Email),
            "assets_staff_id_key" => Some(Self::StaffId),
            "assets_serial_number_key" => Some(Self::SerialNumber),
            _ => None,
        }
    }

    pub fn constraint_name(&self) -> &'static str {
        match self {
            Self::Username => "users_username_key",
            Self::Email => "users_email_key",
            Self::StaffId => "assets_staff_id_key",
            Self::SerialNumber => "assets_serial_number_key",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated: {}", .0.constraint_name())]
    Conflict(UniqueConstraint),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e
            && db_err.is_unique_violation()
            && let Some(constraint) = db_err
                .constraint()
                .and_then(UniqueConstraint::from_constraint_name)
        {
            return StoreError::Conflict(constraint);
        }
        StoreError::Database(e)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict(UniqueConstraint::Username | UniqueConstraint::Email) => {
                AppError::duplicate_credential("Username or email already exists")
            }
            StoreError::Conflict(UniqueConstraint::StaffId) => AppError::DuplicateField {
                field: "staffId",
                message: "Staff ID already exists",
            },
            StoreError::Conflict(UniqueConstraint::SerialNumber) => AppError::DuplicateField {
                field: "serialNumber",
                message: "Serial number already exists",
            },
            StoreError::Database(err) => AppError::Internal(anyhow::Error::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_names_round_trip() {
        for constraint in [
            UniqueConstraint::Username,
            UniqueConstraint::Email,
            UniqueConstraint::StaffId,
            UniqueConstraint::SerialNumber,
        ] {
            assert_eq!(
                UniqueConstraint::from_constraint_name(constraint.constraint_name()),
                Some(constraint)
            );
        }
        assert_eq!(UniqueConstraint::from_constraint_name("users_pkey"), None);
    }

    #[test]
    fn test_field_conflicts_map_to_duplicate_field() {
        let err: AppError = StoreError::Conflict(UniqueConstraint::StaffId).into();
        assert!(matches!(
            err,
            AppError::DuplicateField {
                field: "staffId",
                message: "Staff ID already exists"
            }
        ));
        assert_eq!(err.status_code().as_u16(), 400);

        let err: AppError = StoreError::Conflict(UniqueConstraint::SerialNumber).into();
        assert_eq!(err.to_string(), "Serial number already exists");
    }

    #[test]
    fn test_credential_conflicts_map_to_duplicate_credential() {
        let err: AppError = StoreError::Conflict(UniqueConstraint::Email).into();
        assert_eq!(err.to_string(), "Username or email already exists");
    }

    #[test]
    fn test_database_errors_are_internal() {
        let err: AppError = StoreError::Database(sqlx::Error::RowNotFound).into();
        assert_eq!(err.status_code().as_u16(), 500);
    }

    #[test]
    fn test_non_database_sqlx_error_is_not_conflict() {
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::Database(_)
        ));
    }
}
