//! Handlers that log customer events.

use crate::event::EventHandler;

use super::CustomerEvent;

/// First of two loggers for CustomerCreated.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstCustomerCreatedLogHandler;

impl FirstCustomerCreatedLogHandler {
    /// Returns the line logged for `event`, or `None` if it is not a
    /// CustomerCreated event.
    pub fn message(&self, event: &CustomerEvent) -> Option<String> {
        match event {
            CustomerEvent::CustomerCreated(_) => {
                Some("This is the first log of the event: CustomerCreated".to_string())
            }
            _ => None,
        }
    }
}

impl EventHandler<CustomerEvent> for FirstCustomerCreatedLogHandler {
    fn handle(&self, event: &CustomerEvent) {
        if let Some(message) = self.message(event) {
            tracing::info!(handler = "first_customer_created", "{message}");
        }
    }
}

/// Second of two loggers for CustomerCreated.
#[derive(Debug, Default, Clone, Copy)]
pub struct SecondCustomerCreatedLogHandler;

impl SecondCustomerCreatedLogHandler {
    pub fn message(&self, event: &CustomerEvent) -> Option<String> {
        match event {
            CustomerEvent::CustomerCreated(_) => {
                Some("This is the second log of the event: CustomerCreated".to_string())
            }
            _ => None,
        }
    }
}

impl EventHandler<CustomerEvent> for SecondCustomerCreatedLogHandler {
    fn handle(&self, event: &CustomerEvent) {
        if let Some(message) = self.message(event) {
            tracing::info!(handler = "second_customer_created", "{message}");
        }
    }
}

/// Logs the new address carried by CustomerAddressChanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct CustomerAddressChangedLogHandler;

impl CustomerAddressChangedLogHandler {
    pub fn message(&self, event: &CustomerEvent) -> Option<String> {
        match event {
            CustomerEvent::CustomerAddressChanged(data) => Some(format!(
                "Customer address: {}, {} changed to: {}",
                data.id, data.name, data.address
            )),
            _ => None,
        }
    }
}

impl EventHandler<CustomerEvent> for CustomerAddressChangedLogHandler {
    fn handle(&self, event: &CustomerEvent) {
        if let Some(message) = self.message(event) {
            tracing::info!(handler = "customer_address_changed", "{message}");
        }
    }
}
