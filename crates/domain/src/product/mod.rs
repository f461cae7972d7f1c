//! Product entity.

use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProductData")]
pub struct Product {
    id: EntityId,
    name: String,
    price: f64,
}

#[derive(Deserialize)]
struct ProductData {
    id: EntityId,
    name: String,
    price: f64,
}

impl TryFrom<ProductData> for Product {
    type Error = DomainError;

    fn try_from(data: ProductData) -> Result<Self> {
        Product::new(data.id, data.name, data.price)
    }
}

impl Product {
    /// Creates a product. The id and name must be non-empty and the price
    /// strictly positive.
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>, price: f64) -> Result<Self> {
        let product = Self {
            id: id.into(),
            name: name.into(),
            price,
        };
        Self::check(&product.id, &product.name, product.price)?;
        Ok(product)
    }

    fn check(id: &EntityId, name: &str, price: f64) -> Result<()> {
        if id.is_empty() {
            return Err(DomainError::IdRequired);
        }
        if name.is_empty() {
            return Err(DomainError::NameRequired);
        }
        if price.is_nan() || price <= 0.0 {
            return Err(DomainError::InvalidPrice { price });
        }
        Ok(())
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Renames the product, leaving it unchanged if the name is empty.
    pub fn change_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        Self::check(&self.id, &name, self.price)?;
        self.name = name;
        Ok(())
    }

    /// Reprices the product, leaving it unchanged if the price is invalid.
    pub fn change_price(&mut self, price: f64) -> Result<()> {
        Self::check(&self.id, &self.name, price)?;
        self.price = price;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_product() {
        let product = Product::new("p1", "Product 1", 10.0).unwrap();
        assert_eq!(product.id().as_str(), "p1");
        assert_eq!(product.name(), "Product 1");
        assert_eq!(product.price(), 10.0);
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            Product::new("", "Product 1", 10.0).unwrap_err(),
            DomainError::IdRequired
        );
        assert_eq!(
            Product::new("p1", "", 10.0).unwrap_err(),
            DomainError::NameRequired
        );
        assert!(matches!(
            Product::new("p1", "Product 1", -1.0),
            Err(DomainError::InvalidPrice { .. })
        ));
        assert!(matches!(
            Product::new("p1", "Product 1", f64::NAN),
            Err(DomainError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_change_name() {
        let mut product = Product::new("p1", "Product 1", 10.0).unwrap();
        product.change_name("Product 2").unwrap();
        assert_eq!(product.name(), "Product 2");

        assert!(product.change_name("").is_err());
        assert_eq!(product.name(), "Product 2");
    }

    #[test]
    fn test_change_price() {
        let mut product = Product::new("p1", "Product 1", 10.0).unwrap();
        product.change_price(150.0).unwrap();
        assert_eq!(product.price(), 150.0);

        assert!(product.change_price(0.0).is_err());
        assert_eq!(product.price(), 150.0);
    }

    #[test]
    fn test_deserialize_rejects_invalid_price() {
        let result = serde_json::from_str::<Product>(r#"{"id":"p1","name":"Product 1","price":0.0}"#);
        assert!(
            result
                .unwrap_err()
                .to_string()
                .starts_with("Price must be greater than zero")
        );
    }
}
