//! Customer entity.

use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};
use crate::event::EventDispatcher;

use super::{Address, CustomerEvent};

/// A customer of the store.
///
/// A customer always has a non-empty id and name. It starts inactive with no
/// address and zero reward points, and can only be activated once an address
/// has been set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CustomerData")]
pub struct Customer {
    id: EntityId,
    name: String,
    address: Option<Address>,
    active: bool,
    reward_points: f64,
}

/// Unchecked wire form of a [`Customer`].
#[derive(Deserialize)]
struct CustomerData {
    id: EntityId,
    name: String,
    address: Option<Address>,
    active: bool,
    reward_points: f64,
}

impl TryFrom<CustomerData> for Customer {
    type Error = DomainError;

    fn try_from(data: CustomerData) -> Result<Self> {
        Customer::restore(
            data.id,
            data.name,
            data.address,
            data.active,
            data.reward_points,
        )
    }
}

impl Customer {
    /// Creates a customer and notifies `events` with a CustomerCreated event.
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        events: &EventDispatcher<CustomerEvent>,
    ) -> Result<Self> {
        let customer = Self {
            id: id.into(),
            name: name.into(),
            address: None,
            active: false,
            reward_points: 0.0,
        };
        customer.validate()?;

        events.notify(&CustomerEvent::customer_created(
            customer.id.clone(),
            customer.name.clone(),
        ));

        Ok(customer)
    }

    /// Rebuilds a customer from stored state without raising events.
    ///
    /// Fails if the stored state breaks an invariant (empty id or name, or
    /// active without an address).
    pub fn restore(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        address: Option<Address>,
        active: bool,
        reward_points: f64,
    ) -> Result<Self> {
        let customer = Self {
            id: id.into(),
            name: name.into(),
            address,
            active,
            reward_points,
        };
        customer.validate()?;
        if customer.active && customer.address.is_none() {
            return Err(DomainError::AddressRequiredForActivation);
        }
        Ok(customer)
    }

    fn validate(&self) -> Result<()> {
        Self::check(&self.id, &self.name)
    }

    fn check(id: &EntityId, name: &str) -> Result<()> {
        if id.is_empty() {
            return Err(DomainError::IdRequired);
        }
        if name.is_empty() {
            return Err(DomainError::NameRequired);
        }
        Ok(())
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current address, if one has been set.
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reward_points(&self) -> f64 {
        self.reward_points
    }

    /// Renames the customer.
    ///
    /// The new name is checked before it is applied; on failure the customer
    /// keeps its previous name.
    pub fn change_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        Self::check(&self.id, &name)?;
        self.name = name;
        Ok(())
    }

    /// Replaces the address and notifies `events` with a
    /// CustomerAddressChanged event.
    pub fn change_address(&mut self, address: Address, events: &EventDispatcher<CustomerEvent>) {
        self.address = Some(address.clone());
        events.notify(&CustomerEvent::customer_address_changed(
            self.id.clone(),
            self.name.clone(),
            address,
        ));
    }

    /// Replaces the address without raising an event.
    pub fn set_address(&mut self, address: Address) {
        self.address = Some(address);
    }

    /// Activates the customer. Requires an address.
    pub fn activate(&mut self) -> Result<()> {
        if self.address.is_none() {
            return Err(DomainError::AddressRequiredForActivation);
        }
        self.active = true;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Adds `points` to the running total. No bounds or sign checks.
    pub fn add_reward_points(&mut self, points: f64) {
        self.reward_points += points;
    }
}
