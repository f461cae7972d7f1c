//! Domain layer for the storefront.
//!
//! This crate provides:
//! - Customer entity with its Address value object and domain events
//! - Product entity
//! - Order and OrderItem entities plus the stateless OrderService
//! - A synchronous EventDispatcher with pluggable EventHandlers

pub mod checkout;
pub mod customer;
pub mod error;
pub mod event;
pub mod product;

pub use checkout::{Order, OrderItem, OrderService};
pub use common::EntityId;
pub use customer::{
    Address, Customer, CustomerAddressChangedData, CustomerAddressChangedLogHandler,
    CustomerCreatedData, CustomerEvent, FirstCustomerCreatedLogHandler,
    SecondCustomerCreatedLogHandler,
};
pub use error::{DomainError, Result};
pub use event::{DomainEvent, EventDispatcher, EventHandler};
pub use product::Product;
