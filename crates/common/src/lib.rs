//! Shared types used across the storefront crates.

mod types;

pub use types::EntityId;
