//! Storefront entry point: runs the checkout walkthrough.

use app::{Config, Storefront, demo, logging};

#[tokio::main]
async fn main() -> app::Result<()> {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env();
    logging::init(&config);

    // 2. Build repositories and register the customer event log handlers
    let storefront = Storefront::from_config(&config).await?;
    storefront.register_default_handlers();

    // 3. Run the scenario
    let summary = demo::run_checkout(&storefront).await.inspect_err(|err| {
        tracing::error!(error = %err, "checkout failed");
    })?;

    tracing::info!(
        order_total = summary.order.total(),
        reward_points = summary.customer.reward_points(),
        "storefront finished"
    );
    Ok(())
}
