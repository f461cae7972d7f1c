//! Stateless domain service over orders.

use common::EntityId;

use crate::customer::Customer;
use crate::error::{DomainError, Result};

use super::{Order, OrderItem};

/// Domain operations that span orders and customers.
///
/// The service performs no persistence; callers save the returned order and
/// the updated customer themselves.
pub struct OrderService;

impl OrderService {
    /// Places an order for `customer` and awards half the order total as
    /// reward points.
    #[tracing::instrument(skip(customer, items), fields(customer_id = %customer.id(), items = items.len()))]
    pub fn place_order(customer: &mut Customer, items: Vec<OrderItem>) -> Result<Order> {
        if items.is_empty() {
            return Err(DomainError::OrderWithoutItems);
        }

        let order = Order::new(EntityId::generate(), customer.id().clone(), items)?;
        let total = order.total();
        customer.add_reward_points(total / 2.0);

        tracing::info!(order_id = %order.id(), total, "order placed");
        Ok(order)
    }

    /// Returns the sum of the totals of `orders`.
    pub fn total(orders: &[Order]) -> f64 {
        orders.iter().map(Order::total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventDispatcher;

    fn customer() -> Customer {
        Customer::new("c1", "Customer 1", &EventDispatcher::new()).unwrap()
    }

    #[test]
    fn test_place_order() {
        let mut customer = customer();
        let items = vec![
            OrderItem::new("oi1", "Product 1", 10.0, "p1", 2),
            OrderItem::new("oi2", "Product 2", 20.0, "p2", 3),
        ];

        let order = OrderService::place_order(&mut customer, items).unwrap();

        assert_eq!(order.customer_id().as_str(), "c1");
        assert!(!order.id().is_empty());
        assert_eq!(order.total(), 80.0);
        assert_eq!(customer.reward_points(), 40.0);
    }

    #[test]
    fn test_place_order_keeps_fractional_points() {
        let mut customer = customer();
        let items = vec![OrderItem::new("oi1", "Product 1", 5.0, "p1", 1)];

        OrderService::place_order(&mut customer, items).unwrap();

        assert_eq!(customer.reward_points(), 2.5);
    }

    #[test]
    fn test_place_order_without_items_fails() {
        let mut customer = customer();
        let result = OrderService::place_order(&mut customer, vec![]);
        assert_eq!(result.unwrap_err(), DomainError::OrderWithoutItems);
        assert_eq!(customer.reward_points(), 0.0);
    }

    #[test]
    fn test_place_order_with_invalid_item_awards_nothing() {
        let mut customer = customer();
        let items = vec![OrderItem::new("oi1", "Product 1", 10.0, "p1", 0)];

        assert!(OrderService::place_order(&mut customer, items).is_err());
        assert_eq!(customer.reward_points(), 0.0);
    }

    #[test]
    fn test_total_of_orders() {
        let order1 = Order::new(
            "o1",
            "c1",
            vec![OrderItem::new("oi1", "Product 1", 10.0, "p1", 2)],
        )
        .unwrap();
        let order2 = Order::new(
            "o2",
            "c1",
            vec![OrderItem::new("oi2", "Product 1", 10.0, "p1", 3)],
        )
        .unwrap();

        assert_eq!(OrderService::total(&[order1, order2]), 50.0);
        assert_eq!(OrderService::total(&[]), 0.0);
    }
}
