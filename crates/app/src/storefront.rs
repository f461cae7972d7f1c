use std::sync::Arc;

use common::EntityId;
use domain::{
    Address, Customer, CustomerAddressChangedLogHandler, CustomerEvent, EventDispatcher,
    FirstCustomerCreatedLogHandler, Order, OrderItem, OrderService, Product,
    SecondCustomerCreatedLogHandler,
};
use persistence::{
    CustomerRepository, Entity, InMemoryCustomerRepository, InMemoryOrderRepository,
    InMemoryProductRepository, OrderRepository, PostgresCustomerRepository,
    PostgresOrderRepository, PostgresProductRepository, ProductRepository, RepositoryError,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::error::{AppError, Result};

/// Application service wiring the customer event dispatcher to the
/// customer, product and order repositories.
pub struct Storefront {
    events: Arc<EventDispatcher<CustomerEvent>>,
    customers: Arc<dyn CustomerRepository>,
    products: Arc<dyn ProductRepository>,
    orders: Arc<dyn OrderRepository>,
}

impl Storefront {
    pub fn new(
        events: Arc<EventDispatcher<CustomerEvent>>,
        customers: Arc<dyn CustomerRepository>,
        products: Arc<dyn ProductRepository>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            events,
            customers,
            products,
            orders,
        }
    }

    /// Creates a storefront backed by in-memory repositories.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(EventDispatcher::new()),
            Arc::new(InMemoryCustomerRepository::new()),
            Arc::new(InMemoryProductRepository::new()),
            Arc::new(InMemoryOrderRepository::new()),
        )
    }

    /// Creates a storefront backed by PostgreSQL repositories sharing `pool`.
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(EventDispatcher::new()),
            Arc::new(PostgresCustomerRepository::new(pool.clone())),
            Arc::new(PostgresProductRepository::new(pool.clone())),
            Arc::new(PostgresOrderRepository::new(pool)),
        )
    }

    /// Builds the storefront selected by `config`.
    ///
    /// With a database URL this connects, runs migrations, and uses the
    /// PostgreSQL repositories; otherwise everything stays in memory.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let Some(url) = config.database_url.as_deref() else {
            tracing::info!("using in-memory repositories");
            return Ok(Self::in_memory());
        };

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(url)
            .await
            .map_err(AppError::Connection)?;
        persistence::run_migrations(&pool).await?;

        tracing::info!(
            max_connections = config.max_connections,
            "using PostgreSQL repositories"
        );
        Ok(Self::postgres(pool))
    }

    /// Registers the log handlers for customer events.
    pub fn register_default_handlers(&self) {
        self.events.register(
            CustomerEvent::CREATED,
            Arc::new(FirstCustomerCreatedLogHandler),
        );
        self.events.register(
            CustomerEvent::CREATED,
            Arc::new(SecondCustomerCreatedLogHandler),
        );
        self.events.register(
            CustomerEvent::ADDRESS_CHANGED,
            Arc::new(CustomerAddressChangedLogHandler),
        );
    }

    /// The dispatcher customer events are published to.
    pub fn events(&self) -> &EventDispatcher<CustomerEvent> {
        &self.events
    }

    /// Creates and stores a customer, publishing CustomerCreated.
    ///
    /// An id that is already stored fails with `AlreadyExists` before any
    /// event is published.
    #[tracing::instrument(skip(self, id, name), fields(id = tracing::field::Empty))]
    pub async fn register_customer(
        &self,
        id: impl Into<EntityId>,
        name: impl Into<String>,
    ) -> Result<Customer> {
        let id = id.into();
        tracing::Span::current().record("id", tracing::field::display(&id));

        match self.customers.find(&id).await {
            Ok(_) => {
                return Err(RepositoryError::AlreadyExists {
                    entity: Customer::NAME,
                    id,
                }
                .into());
            }
            Err(RepositoryError::NotFound { .. }) => {}
            Err(err) => return Err(err.into()),
        }

        let customer = Customer::new(id, name, &self.events)?;
        self.customers.create(&customer).await?;
        Ok(customer)
    }

    /// Moves a stored customer to `address`, publishing CustomerAddressChanged.
    #[tracing::instrument(skip(self, address), fields(id = %id))]
    pub async fn change_customer_address(
        &self,
        id: &EntityId,
        address: Address,
    ) -> Result<Customer> {
        let mut customer = self.customers.find(id).await?;
        customer.change_address(address, &self.events);
        self.customers.update(&customer).await?;
        Ok(customer)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    pub async fn activate_customer(&self, id: &EntityId) -> Result<Customer> {
        let mut customer = self.customers.find(id).await?;
        customer.activate()?;
        self.customers.update(&customer).await?;
        Ok(customer)
    }

    pub async fn customer(&self, id: &EntityId) -> Result<Customer> {
        Ok(self.customers.find(id).await?)
    }

    #[tracing::instrument(skip(self, id, name))]
    pub async fn add_product(
        &self,
        id: impl Into<EntityId>,
        name: impl Into<String>,
        price: f64,
    ) -> Result<Product> {
        let product = Product::new(id, name, price)?;
        self.products.create(&product).await?;
        Ok(product)
    }

    /// Places an order for `customer_id` with one item per `(product_id,
    /// quantity)` line, priced from the stored products.
    ///
    /// Stores the order and the customer's new reward points balance.
    #[tracing::instrument(skip(self, lines), fields(customer_id = %customer_id, lines = lines.len()))]
    pub async fn place_order(
        &self,
        customer_id: &EntityId,
        lines: &[(EntityId, u32)],
    ) -> Result<Order> {
        let mut customer = self.customers.find(customer_id).await?;

        let mut items = Vec::with_capacity(lines.len());
        for (product_id, quantity) in lines {
            let product = self.products.find(product_id).await?;
            items.push(OrderItem::for_product(
                EntityId::generate(),
                &product,
                *quantity,
            ));
        }

        let order = OrderService::place_order(&mut customer, items)?;
        self.orders.create(&order).await?;
        self.customers.update(&customer).await?;

        Ok(order)
    }

    pub async fn orders(&self) -> Result<Vec<Order>> {
        Ok(self.orders.find_all().await?)
    }

    /// Sum of the totals of every stored order.
    pub async fn orders_total(&self) -> Result<f64> {
        let orders = self.orders.find_all().await?;
        Ok(OrderService::total(&orders))
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
