use std::collections::HashMap;

use async_trait::async_trait;
use common::EntityId;
use domain::{Address, Customer, Order, OrderItem, Product};
use sqlx::{PgPool, Postgres, Row, Transaction, postgres::PgRow};

use crate::repository::record_write;
use crate::{Entity, Repository, RepositoryError, Result};

/// Runs the database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

/// Maps an INSERT failure, turning a unique violation into `AlreadyExists`.
fn insert_error(entity: &'static str, id: &EntityId, e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::AlreadyExists {
            entity,
            id: id.clone(),
        };
    }
    RepositoryError::Database(e)
}

fn not_found(entity: &'static str, id: &EntityId) -> RepositoryError {
    RepositoryError::NotFound {
        entity,
        id: id.clone(),
    }
}

fn to_u32(column: &'static str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| RepositoryError::InvalidValue { column, value })
}

/// PostgreSQL-backed customer repository.
#[derive(Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn row_to_customer(row: &PgRow) -> Result<Customer> {
        let street: Option<String> = row.try_get("street")?;
        let number: Option<i64> = row.try_get("number")?;
        let zip: Option<String> = row.try_get("zipcode")?;
        let city: Option<String> = row.try_get("city")?;

        let address = match (street, number, zip, city) {
            (Some(street), Some(number), Some(zip), Some(city)) => Some(Address::new(
                street,
                to_u32("customers.number", number)?,
                zip,
                city,
            )?),
            _ => None,
        };

        let customer = Customer::restore(
            row.try_get::<String, _>("id")?,
            row.try_get::<String, _>("name")?,
            address,
            row.try_get("active")?,
            row.try_get("reward_points")?,
        )?;
        Ok(customer)
    }
}

#[async_trait]
impl Repository<Customer> for PostgresCustomerRepository {
    #[tracing::instrument(skip(self, customer), fields(id = %customer.id()))]
    async fn create(&self, customer: &Customer) -> Result<()> {
        let address = customer.address();

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, street, number, zipcode, city, active, reward_points)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(customer.id().as_str())
        .bind(customer.name())
        .bind(address.map(Address::street))
        .bind(address.map(|a| i64::from(a.number())))
        .bind(address.map(Address::zip))
        .bind(address.map(Address::city))
        .bind(customer.is_active())
        .bind(customer.reward_points())
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(Customer::NAME, customer.id(), e))?;

        record_write(Customer::NAME, "create");
        Ok(())
    }

    #[tracing::instrument(skip(self, customer), fields(id = %customer.id()))]
    async fn update(&self, customer: &Customer) -> Result<()> {
        let address = customer.address();

        let result = sqlx::query(
            r#"
            UPDATE customers
            SET name = $2, street = $3, number = $4, zipcode = $5, city = $6,
                active = $7, reward_points = $8
            WHERE id = $1
            "#,
        )
        .bind(customer.id().as_str())
        .bind(customer.name())
        .bind(address.map(Address::street))
        .bind(address.map(|a| i64::from(a.number())))
        .bind(address.map(Address::zip))
        .bind(address.map(Address::city))
        .bind(customer.is_active())
        .bind(customer.reward_points())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(Customer::NAME, customer.id()));
        }

        record_write(Customer::NAME, "update");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: &EntityId) -> Result<Customer> {
        let row = sqlx::query(
            r#"
            SELECT id, name, street, number, zipcode, city, active, reward_points
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(Customer::NAME, id))?;

        Self::row_to_customer(&row)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Customer>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, street, number, zipcode, city, active, reward_points
            FROM customers
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_customer).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: &EntityId) -> Result<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(Customer::NAME, id));
        }

        record_write(Customer::NAME, "delete");
        Ok(())
    }
}

/// PostgreSQL-backed product repository.
#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: &PgRow) -> Result<Product> {
        let product = Product::new(
            row.try_get::<String, _>("id")?,
            row.try_get::<String, _>("name")?,
            row.try_get("price")?,
        )?;
        Ok(product)
    }
}

#[async_trait]
impl Repository<Product> for PostgresProductRepository {
    #[tracing::instrument(skip(self, product), fields(id = %product.id()))]
    async fn create(&self, product: &Product) -> Result<()> {
        sqlx::query("INSERT INTO products (id, name, price) VALUES ($1, $2, $3)")
            .bind(product.id().as_str())
            .bind(product.name())
            .bind(product.price())
            .execute(&self.pool)
            .await
            .map_err(|e| insert_error(Product::NAME, product.id(), e))?;

        record_write(Product::NAME, "create");
        Ok(())
    }

    #[tracing::instrument(skip(self, product), fields(id = %product.id()))]
    async fn update(&self, product: &Product) -> Result<()> {
        let result = sqlx::query("UPDATE products SET name = $2, price = $3 WHERE id = $1")
            .bind(product.id().as_str())
            .bind(product.name())
            .bind(product.price())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(Product::NAME, product.id()));
        }

        record_write(Product::NAME, "update");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: &EntityId) -> Result<Product> {
        let row = sqlx::query("SELECT id, name, price FROM products WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(Product::NAME, id))?;

        Self::row_to_product(&row)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query("SELECT id, name, price FROM products ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_product).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: &EntityId) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(Product::NAME, id));
        }

        record_write(Product::NAME, "delete");
        Ok(())
    }
}

/// PostgreSQL-backed order repository.
///
/// Orders live in `orders`; their items live in `order_items` with a
/// `position` column that preserves item order. Writes touching both tables
/// run in one transaction.
#[derive(Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_items(tx: &mut Transaction<'_, Postgres>, order: &Order) -> Result<()> {
        for (position, item) in order.items().iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, id, position, product_id, name, price, quantity)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(order.id().as_str())
            .bind(item.id().as_str())
            .bind(position as i64)
            .bind(item.product_id().as_str())
            .bind(item.name())
            .bind(item.price())
            .bind(i64::from(item.quantity()))
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    fn row_to_item(row: &PgRow) -> Result<OrderItem> {
        Ok(OrderItem::new(
            row.try_get::<String, _>("id")?,
            row.try_get::<String, _>("name")?,
            row.try_get("price")?,
            row.try_get::<String, _>("product_id")?,
            to_u32("order_items.quantity", row.try_get("quantity")?)?,
        ))
    }

    fn row_to_order(row: &PgRow, items: Vec<OrderItem>) -> Result<Order> {
        let order = Order::new(
            row.try_get::<String, _>("id")?,
            row.try_get::<String, _>("customer_id")?,
            items,
        )?;
        Ok(order)
    }
}

#[async_trait]
impl Repository<Order> for PostgresOrderRepository {
    #[tracing::instrument(skip(self, order), fields(id = %order.id(), items = order.item_count()))]
    async fn create(&self, order: &Order) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO orders (id, customer_id, total) VALUES ($1, $2, $3)")
            .bind(order.id().as_str())
            .bind(order.customer_id().as_str())
            .bind(order.total())
            .execute(&mut *tx)
            .await
            .map_err(|e| insert_error(Order::NAME, order.id(), e))?;

        Self::insert_items(&mut tx, order).await?;

        tx.commit().await?;
        record_write(Order::NAME, "create");
        Ok(())
    }

    #[tracing::instrument(skip(self, order), fields(id = %order.id(), items = order.item_count()))]
    async fn update(&self, order: &Order) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE orders SET customer_id = $2, total = $3 WHERE id = $1")
            .bind(order.id().as_str())
            .bind(order.customer_id().as_str())
            .bind(order.total())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(Order::NAME, order.id()));
        }

        // Items are replaced wholesale.
        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(order.id().as_str())
            .execute(&mut *tx)
            .await?;

        Self::insert_items(&mut tx, order).await?;

        tx.commit().await?;
        record_write(Order::NAME, "update");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: &EntityId) -> Result<Order> {
        let row = sqlx::query("SELECT id, customer_id FROM orders WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(Order::NAME, id))?;

        let item_rows = sqlx::query(
            r#"
            SELECT id, product_id, name, price, quantity
            FROM order_items
            WHERE order_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(id.as_str())
        .fetch_all(&self.pool)
        .await?;

        let items = item_rows
            .iter()
            .map(Self::row_to_item)
            .collect::<Result<Vec<_>>>()?;

        Self::row_to_order(&row, items)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Order>> {
        let order_rows = sqlx::query("SELECT id, customer_id FROM orders ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        let item_rows = sqlx::query(
            r#"
            SELECT order_id, id, product_id, name, price, quantity
            FROM order_items
            ORDER BY order_id ASC, position ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut items_by_order: HashMap<String, Vec<OrderItem>> = HashMap::new();
        for row in &item_rows {
            let order_id: String = row.try_get("order_id")?;
            items_by_order
                .entry(order_id)
                .or_default()
                .push(Self::row_to_item(row)?);
        }

        order_rows
            .iter()
            .map(|row| -> Result<Order> {
                let id: String = row.try_get("id")?;
                let items = items_by_order.remove(&id).unwrap_or_default();
                Self::row_to_order(row, items)
            })
            .collect()
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: &EntityId) -> Result<()> {
        // order_items rows go with the order (ON DELETE CASCADE).
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(Order::NAME, id));
        }

        record_write(Order::NAME, "delete");
        Ok(())
    }
}
