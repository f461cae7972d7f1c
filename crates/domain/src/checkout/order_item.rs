//! Order item entity.

use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::product::Product;

/// A line of an order: a product snapshot (name and unit price) and a
/// quantity.
///
/// Quantities are checked by the owning [`Order`](super::Order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    id: EntityId,
    name: String,
    price: f64,
    product_id: EntityId,
    quantity: u32,
}

impl OrderItem {
    /// Creates an order item.
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        price: f64,
        product_id: impl Into<EntityId>,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            product_id: product_id.into(),
            quantity,
        }
    }

    /// Creates an item for `quantity` units of `product` at its current price.
    pub fn for_product(id: impl Into<EntityId>, product: &Product, quantity: u32) -> Self {
        Self::new(
            id,
            product.name(),
            product.price(),
            product.id().clone(),
            quantity,
        )
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price.
    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn product_id(&self) -> &EntityId {
        &self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns price × quantity.
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtotal() {
        let item = OrderItem::new("i1", "Item 1", 100.0, "p1", 2);
        assert_eq!(item.subtotal(), 200.0);
    }

    #[test]
    fn test_for_product_copies_name_and_price() {
        let product = Product::new("p1", "Product 1", 10.0).unwrap();
        let item = OrderItem::for_product("oi1", &product, 3);

        assert_eq!(item.name(), "Product 1");
        assert_eq!(item.price(), 10.0);
        assert_eq!(item.product_id().as_str(), "p1");
        assert_eq!(item.quantity(), 3);
        assert_eq!(item.subtotal(), 30.0);
    }
}
