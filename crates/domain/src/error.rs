//! Domain error types.

use common::EntityId;
use thiserror::Error;

/// Validation failures raised by entities, value objects, and domain services.
///
/// Every variant is a rule violation detected synchronously at the point of
/// the offending construction or mutation. The `Display` output is the
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Entity identifier is empty.
    #[error("Id is required")]
    IdRequired,

    /// Entity name is empty.
    #[error("Name is required")]
    NameRequired,

    /// Customer activation attempted without an address.
    #[error("Address is mandatory to activate a customer")]
    AddressRequiredForActivation,

    /// Address street is empty.
    #[error("Street is required")]
    StreetRequired,

    /// Address number is zero.
    #[error("Number is required")]
    NumberRequired,

    /// Address zip code is empty.
    #[error("Zip is required")]
    ZipRequired,

    /// Address city is empty.
    #[error("City is required")]
    CityRequired,

    /// Product price is zero, negative, or not a number.
    #[error("Price must be greater than zero")]
    InvalidPrice { price: f64 },

    /// Order customer reference is empty.
    #[error("CustomerId is required")]
    CustomerIdRequired,

    /// Order has no items.
    #[error("Items are required")]
    ItemsRequired,

    /// An order item has a zero quantity.
    #[error("Quantity must be greater than 0")]
    InvalidQuantity { item_id: EntityId },

    /// An order was placed with no items.
    #[error("Order must have at least one item")]
    OrderWithoutItems,

    /// Two items in one order share an id.
    #[error("Item already in order: {item_id}")]
    DuplicateItem { item_id: EntityId },

    /// Item not present in the order.
    #[error("Item not found: {item_id}")]
    ItemNotFound { item_id: EntityId },
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(DomainError::IdRequired.to_string(), "Id is required");
        assert_eq!(DomainError::NameRequired.to_string(), "Name is required");
        assert_eq!(
            DomainError::AddressRequiredForActivation.to_string(),
            "Address is mandatory to activate a customer"
        );
        assert_eq!(
            DomainError::InvalidQuantity {
                item_id: EntityId::new("i1")
            }
            .to_string(),
            "Quantity must be greater than 0"
        );
        assert_eq!(
            DomainError::ItemNotFound {
                item_id: EntityId::new("i9")
            }
            .to_string(),
            "Item not found: i9"
        );
        assert_eq!(
            DomainError::DuplicateItem {
                item_id: EntityId::new("i1")
            }
            .to_string(),
            "Item already in order: i1"
        );
    }
}
