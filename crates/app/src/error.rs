//! Application-level error type.

use domain::DomainError;
use persistence::RepositoryError;
use thiserror::Error;

/// Errors surfaced by the storefront service.
#[derive(Debug, Error)]
pub enum AppError {
    /// A domain rule was violated.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Storage failed or the entity was missing.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The database pool could not be opened.
    #[error("Failed to connect to database: {0}")]
    Connection(#[source] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use common::EntityId;

    use super::*;

    #[test]
    fn test_domain_errors_are_transparent() {
        let err = AppError::from(DomainError::NameRequired);
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn test_repository_errors_are_transparent() {
        let err = AppError::from(RepositoryError::NotFound {
            entity: "Customer",
            id: EntityId::new("c1"),
        });
        assert_eq!(err.to_string(), "Customer with id c1 not found");
    }
}
