//! Storefront application layer.
//!
//! Wires the domain's customer event dispatcher and log handlers to the
//! repositories chosen by [`config::Config`], and hosts the checkout
//! walkthrough run by the `storefront` binary.

pub mod config;
pub mod demo;
pub mod error;
pub mod logging;
mod storefront;

pub use config::{Config, LogFormat};
pub use error::{AppError, Result};
pub use storefront::Storefront;
