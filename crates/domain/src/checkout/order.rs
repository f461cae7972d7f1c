//! Order entity.

use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};

use super::OrderItem;

/// An order placed by a customer.
///
/// An order always holds at least one item and every item has a positive
/// quantity. The customer is referenced by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OrderData")]
pub struct Order {
    id: EntityId,
    customer_id: EntityId,
    items: Vec<OrderItem>,
}

/// Unchecked wire form of an [`Order`].
#[derive(Deserialize)]
struct OrderData {
    id: EntityId,
    customer_id: EntityId,
    items: Vec<OrderItem>,
}

impl TryFrom<OrderData> for Order {
    type Error = DomainError;

    fn try_from(data: OrderData) -> Result<Self> {
        Order::new(data.id, data.customer_id, data.items)
    }
}

impl Order {
    /// Creates an order.
    pub fn new(
        id: impl Into<EntityId>,
        customer_id: impl Into<EntityId>,
        items: Vec<OrderItem>,
    ) -> Result<Self> {
        let order = Self {
            id: id.into(),
            customer_id: customer_id.into(),
            items,
        };
        order.validate()?;
        Ok(order)
    }

    fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(DomainError::IdRequired);
        }
        if self.customer_id.is_empty() {
            return Err(DomainError::CustomerIdRequired);
        }
        Self::check_items(&self.items)
    }

    fn check_items(items: &[OrderItem]) -> Result<()> {
        if items.is_empty() {
            return Err(DomainError::ItemsRequired);
        }
        if let Some(item) = items.iter().find(|item| item.quantity() == 0) {
            return Err(DomainError::InvalidQuantity {
                item_id: item.id().clone(),
            });
        }
        for (index, item) in items.iter().enumerate() {
            if items[..index].iter().any(|seen| seen.id() == item.id()) {
                return Err(DomainError::DuplicateItem {
                    item_id: item.id().clone(),
                });
            }
        }
        Ok(())
    }
}

// Query methods
impl Order {
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn customer_id(&self) -> &EntityId {
        &self.customer_id
    }

    /// Returns the items in insertion order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns an item by id.
    pub fn get_item(&self, item_id: &EntityId) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.id() == item_id)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the sum of item subtotals, recomputed on every call.
    pub fn total(&self) -> f64 {
        self.items.iter().map(OrderItem::subtotal).sum()
    }
}

// Item mutations. Each one checks the resulting item list before applying it.
impl Order {
    /// Appends an item. Its id must not already be in the order.
    pub fn add_item(&mut self, item: OrderItem) -> Result<()> {
        if item.quantity() == 0 {
            return Err(DomainError::InvalidQuantity {
                item_id: item.id().clone(),
            });
        }
        if self.get_item(item.id()).is_some() {
            return Err(DomainError::DuplicateItem {
                item_id: item.id().clone(),
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Replaces the item with the same id, keeping its position.
    pub fn replace_item(&mut self, item: OrderItem) -> Result<()> {
        if item.quantity() == 0 {
            return Err(DomainError::InvalidQuantity {
                item_id: item.id().clone(),
            });
        }
        let slot = self
            .items
            .iter_mut()
            .find(|existing| existing.id() == item.id())
            .ok_or_else(|| DomainError::ItemNotFound {
                item_id: item.id().clone(),
            })?;
        *slot = item;
        Ok(())
    }

    /// Removes and returns an item. The last item cannot be removed.
    pub fn remove_item(&mut self, item_id: &EntityId) -> Result<OrderItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id() == item_id)
            .ok_or_else(|| DomainError::ItemNotFound {
                item_id: item_id.clone(),
            })?;
        if self.items.len() == 1 {
            return Err(DomainError::ItemsRequired);
        }
        Ok(self.items.remove(index))
    }

    /// Replaces every item at once.
    pub fn change_items(&mut self, items: Vec<OrderItem>) -> Result<()> {
        Self::check_items(&items)?;
        self.items = items;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: f64, quantity: u32) -> OrderItem {
        OrderItem::new(id, format!("Item {id}"), price, format!("p{id}"), quantity)
    }

    #[test]
    fn test_create_order() {
        let order = Order::new("o1", "c1", vec![item("i1", 100.0, 1)]).unwrap();
        assert_eq!(order.id().as_str(), "o1");
        assert_eq!(order.customer_id().as_str(), "c1");
        assert_eq!(order.item_count(), 1);
    }

    #[test]
    fn test_empty_id_fails() {
        let result = Order::new("", "c1", vec![item("i1", 100.0, 1)]);
        assert_eq!(result.unwrap_err(), DomainError::IdRequired);
    }

    #[test]
    fn test_empty_customer_id_fails() {
        let result = Order::new("o1", "", vec![item("i1", 100.0, 1)]);
        assert_eq!(result.unwrap_err(), DomainError::CustomerIdRequired);
    }

    #[test]
    fn test_no_items_fails() {
        let result = Order::new("o1", "c1", vec![]);
        assert_eq!(result.unwrap_err(), DomainError::ItemsRequired);
    }

    #[test]
    fn test_zero_quantity_fails() {
        let result = Order::new("o1", "c1", vec![item("i1", 100.0, 0)]);
        assert!(matches!(result, Err(DomainError::InvalidQuantity { .. })));
    }

    #[test]
    fn test_total_sums_subtotals() {
        let order = Order::new("o1", "c1", vec![item("i1", 100.0, 2), item("i2", 200.0, 2)])
            .unwrap();
        assert_eq!(order.total(), 600.0);
    }

    #[test]
    fn test_total_tracks_item_changes() {
        let mut order = Order::new("o1", "c1", vec![item("i1", 10.0, 2)]).unwrap();
        assert_eq!(order.total(), 20.0);

        order.replace_item(item("i1", 10.0, 1)).unwrap();
        order.add_item(item("i2", 20.0, 3)).unwrap();

        assert_eq!(order.item_count(), 2);
        assert_eq!(order.items()[0].quantity(), 1);
        assert_eq!(order.total(), 70.0);
    }

    #[test]
    fn test_add_item_with_zero_quantity_fails() {
        let mut order = Order::new("o1", "c1", vec![item("i1", 10.0, 1)]).unwrap();
        assert!(order.add_item(item("i2", 10.0, 0)).is_err());
        assert_eq!(order.item_count(), 1);
    }

    #[test]
    fn test_replace_missing_item_fails() {
        let mut order = Order::new("o1", "c1", vec![item("i1", 10.0, 1)]).unwrap();
        let result = order.replace_item(item("i9", 10.0, 1));
        assert!(matches!(result, Err(DomainError::ItemNotFound { .. })));
    }

    #[test]
    fn test_remove_item() {
        let mut order =
            Order::new("o1", "c1", vec![item("i1", 10.0, 1), item("i2", 5.0, 1)]).unwrap();
        let removed = order.remove_item(&EntityId::new("i1")).unwrap();

        assert_eq!(removed.id().as_str(), "i1");
        assert_eq!(order.item_count(), 1);
        assert_eq!(order.total(), 5.0);
    }

    #[test]
    fn test_remove_last_item_fails() {
        let mut order = Order::new("o1", "c1", vec![item("i1", 10.0, 1)]).unwrap();
        let result = order.remove_item(&EntityId::new("i1"));
        assert_eq!(result.unwrap_err(), DomainError::ItemsRequired);
        assert_eq!(order.item_count(), 1);
    }

    #[test]
    fn test_change_items_to_empty_keeps_items() {
        let mut order = Order::new("o1", "c1", vec![item("i1", 10.0, 1)]).unwrap();
        assert!(order.change_items(vec![]).is_err());
        assert_eq!(order.item_count(), 1);

        order
            .change_items(vec![item("i2", 1.0, 1), item("i3", 2.0, 1)])
            .unwrap();
        assert_eq!(order.total(), 3.0);
        assert!(order.get_item(&EntityId::new("i1")).is_none());
    }

    #[test]
    fn test_duplicate_item_ids_fail() {
        let result = Order::new("o1", "c1", vec![item("i1", 10.0, 1), item("i1", 20.0, 1)]);
        assert_eq!(
            result.unwrap_err(),
            DomainError::DuplicateItem {
                item_id: EntityId::new("i1")
            }
        );
    }

    #[test]
    fn test_add_item_with_existing_id_fails() {
        let mut order = Order::new("o1", "c1", vec![item("i1", 10.0, 1)]).unwrap();

        let result = order.add_item(item("i1", 20.0, 2));

        assert!(matches!(result, Err(DomainError::DuplicateItem { .. })));
        assert_eq!(order.item_count(), 1);
        assert_eq!(order.total(), 10.0);
    }

    #[test]
    fn test_change_items_with_duplicate_ids_keeps_items() {
        let mut order = Order::new("o1", "c1", vec![item("i1", 10.0, 1)]).unwrap();
        let result = order.change_items(vec![item("i2", 1.0, 1), item("i2", 2.0, 1)]);

        assert!(matches!(result, Err(DomainError::DuplicateItem { .. })));
        assert_eq!(order.items()[0].id().as_str(), "i1");
    }

    #[test]
    fn test_deserialize_rejects_invalid_order() {
        let no_items = serde_json::from_str::<Order>(r#"{"id":"o1","customer_id":"c1","items":[]}"#);
        assert!(no_items.unwrap_err().to_string().starts_with("Items are required"));

        let no_ids = serde_json::from_str::<Order>(r#"{"id":"","customer_id":"","items":[]}"#);
        assert!(no_ids.unwrap_err().to_string().starts_with("Id is required"));
    }

    #[test]
    fn test_serialization() {
        let order = Order::new("o1", "c1", vec![item("i1", 10.0, 2)]).unwrap();
        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, order);
        assert_eq!(deserialized.total(), 20.0);
    }
}
