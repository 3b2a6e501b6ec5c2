mod actors;
mod app_system;
mod clients;
mod domain;
mod error;
mod messages;
mod store;

#[cfg(test)]
mod mock_framework;

use tracing::{error, info, Instrument};

use crate::app_system::{setup_tracing, PayLinkSystem};
use crate::domain::OrderCreate;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting pay link service");

    let system = PayLinkSystem::new();

    let span = tracing::info_span!("order_creation");
    let order = async {
        info!("Creating pay link order");
        let payload = OrderCreate {
            amount: Some(21.9),
            description: Some("代付外卖".to_string()),
        };
        system
            .order_client
            .create_order(payload)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(
        order_id = %order.id,
        amount = %order.amount,
        seconds_remaining = order.seconds_remaining,
        "Pay link created"
    );

    let span = tracing::info_span!("payment");
    let pay_result = async {
        info!("Paying order");
        system.order_client.pay_order(order.id.clone()).await
    }
    .instrument(span)
    .await;

    match pay_result {
        Ok(snapshot) => info!(order_id = %snapshot.id, status = %snapshot.status, "Order paid"),
        Err(e) => error!(error = %e, "Payment failed"),
    }

    // Once the order is final, repeat triggers are no-ops
    let again = system
        .order_client
        .pay_order(order.id.clone())
        .await
        .map_err(|e| e.to_string())?;
    info!(status = %again.status, "Repeat pay is idempotent");

    let after_cancel = system
        .order_client
        .cancel_order(order.id)
        .await
        .map_err(|e| e.to_string())?;
    info!(status = %after_cancel.status, "Cancel after payment leaves order unchanged");

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
