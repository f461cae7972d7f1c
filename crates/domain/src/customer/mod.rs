//! Customer entity, its address value object, events, and log handlers.

mod address;
mod entity;
mod events;
mod handlers;

pub use address::Address;
pub use entity::Customer;
pub use events::{CustomerAddressChangedData, CustomerCreatedData, CustomerEvent};
pub use handlers::{
    CustomerAddressChangedLogHandler, FirstCustomerCreatedLogHandler,
    SecondCustomerCreatedLogHandler,
};
