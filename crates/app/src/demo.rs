//! Checkout walkthrough: register a customer, give them an address,
//! stock two products, and place an order.

use common::EntityId;
use domain::{Address, Customer, Order};

use crate::error::Result;
use crate::storefront::Storefront;

/// What the walkthrough produced.
#[derive(Debug, Clone)]
pub struct CheckoutSummary {
    pub customer: Customer,
    pub order: Order,
    pub orders_total: f64,
}

/// Runs the walkthrough against `storefront`.
///
/// Ids are generated so the scenario can run repeatedly against the same
/// database.
pub async fn run_checkout(storefront: &Storefront) -> Result<CheckoutSummary> {
    let customer = storefront
        .register_customer(EntityId::generate(), "Customer 1")
        .await?;

    let address = Address::new("Street 1", 123, "13330-250", "São Paulo")?;
    storefront
        .change_customer_address(customer.id(), address)
        .await?;
    storefront.activate_customer(customer.id()).await?;

    let product1 = storefront
        .add_product(EntityId::generate(), "Product 1", 10.0)
        .await?;
    let product2 = storefront
        .add_product(EntityId::generate(), "Product 2", 20.0)
        .await?;

    let order = storefront
        .place_order(
            customer.id(),
            &[(product1.id().clone(), 2), (product2.id().clone(), 3)],
        )
        .await?;

    let customer = storefront.customer(customer.id()).await?;
    let orders_total = storefront.orders_total().await?;

    tracing::info!(
        customer_id = %customer.id(),
        order_id = %order.id(),
        order_total = order.total(),
        reward_points = customer.reward_points(),
        orders_total,
        "checkout complete"
    );

    Ok(CheckoutSummary {
        customer,
        order,
        orders_total,
    })
}
