//! Customer domain events.

use chrono::{DateTime, Utc};
use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::event::DomainEvent;

use super::Address;

/// Events raised by the customer entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CustomerEvent {
    /// Customer was created.
    CustomerCreated(CustomerCreatedData),

    /// Customer address was changed.
    CustomerAddressChanged(CustomerAddressChangedData),
}

impl CustomerEvent {
    /// Event type name of [`CustomerEvent::CustomerCreated`].
    pub const CREATED: &'static str = "CustomerCreatedEvent";

    /// Event type name of [`CustomerEvent::CustomerAddressChanged`].
    pub const ADDRESS_CHANGED: &'static str = "CustomerAddressChangedEvent";

    /// Creates a CustomerCreated event stamped with the current time.
    pub fn customer_created(id: EntityId, name: impl Into<String>) -> Self {
        CustomerEvent::CustomerCreated(CustomerCreatedData {
            occurred_at: Utc::now(),
            id,
            name: name.into(),
        })
    }

    /// Creates a CustomerAddressChanged event stamped with the current time.
    pub fn customer_address_changed(
        id: EntityId,
        name: impl Into<String>,
        address: Address,
    ) -> Self {
        CustomerEvent::CustomerAddressChanged(CustomerAddressChangedData {
            occurred_at: Utc::now(),
            id,
            name: name.into(),
            address,
        })
    }
}

impl DomainEvent for CustomerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CustomerEvent::CustomerCreated(_) => Self::CREATED,
            CustomerEvent::CustomerAddressChanged(_) => Self::ADDRESS_CHANGED,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CustomerEvent::CustomerCreated(data) => data.occurred_at,
            CustomerEvent::CustomerAddressChanged(data) => data.occurred_at,
        }
    }
}

/// Data for CustomerCreated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerCreatedData {
    /// When the customer was created.
    pub occurred_at: DateTime<Utc>,

    /// The new customer's id.
    pub id: EntityId,

    /// The new customer's name.
    pub name: String,
}

/// Data for CustomerAddressChanged event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerAddressChangedData {
    /// When the address was changed.
    pub occurred_at: DateTime<Utc>,

    /// The customer's id.
    pub id: EntityId,

    /// The customer's name at the time of the change.
    pub name: String,

    /// The new address.
    pub address: Address,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type() {
        let event = CustomerEvent::customer_created(EntityId::new("123"), "Customer 1");
        assert_eq!(event.event_type(), "CustomerCreatedEvent");

        let address = Address::new("Street 1", 123, "13330-250", "São Paulo").unwrap();
        let event =
            CustomerEvent::customer_address_changed(EntityId::new("123"), "Customer 1", address);
        assert_eq!(event.event_type(), "CustomerAddressChangedEvent");
    }

    #[test]
    fn test_occurred_at_is_set_on_construction() {
        let before = Utc::now();
        let event = CustomerEvent::customer_created(EntityId::new("123"), "Customer 1");
        let after = Utc::now();

        assert!(event.occurred_at() >= before);
        assert!(event.occurred_at() <= after);
    }

    #[test]
    fn test_event_serialization() {
        let address = Address::new("Street 1", 123, "13330-250", "São Paulo").unwrap();
        let event = CustomerEvent::customer_address_changed(
            EntityId::new("123"),
            "Customer 1",
            address.clone(),
        );

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("CustomerAddressChanged"));

        let deserialized: CustomerEvent = serde_json::from_str(&json).unwrap();
        if let CustomerEvent::CustomerAddressChanged(data) = deserialized {
            assert_eq!(data.id.as_str(), "123");
            assert_eq!(data.name, "Customer 1");
            assert_eq!(data.address, address);
        } else {
            panic!("Expected CustomerAddressChanged event");
        }
    }
}
