use common::EntityId;
use domain::DomainError;
use thiserror::Error;

/// Errors that can occur when interacting with a repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No entity with the given id is stored.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: EntityId },

    /// An entity with the given id is already stored.
    #[error("{entity} with id {id} already exists")]
    AlreadyExists { entity: &'static str, id: EntityId },

    /// Stored data does not form a valid entity.
    #[error("Invalid stored entity: {0}")]
    Domain(#[from] DomainError),

    /// A stored value is out of range for its domain type.
    #[error("Invalid stored value in {column}: {value}")]
    InvalidValue { column: &'static str, value: i64 },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = RepositoryError::NotFound {
            entity: "Order",
            id: EntityId::new("not-found"),
        };
        assert_eq!(err.to_string(), "Order with id not-found not found");
    }

    #[test]
    fn domain_errors_convert() {
        let err: RepositoryError = DomainError::NameRequired.into();
        assert_eq!(err.to_string(), "Invalid stored entity: Name is required");
    }
}
