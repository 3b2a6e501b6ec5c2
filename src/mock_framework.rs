//! # Mock Framework
//!
//! Utilities for testing the client in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_pay`] to assert behavior.

use tokio::sync::{mpsc, oneshot};

use crate::clients::OrderClient;
use crate::domain::{OrderCreate, OrderSnapshot};
use crate::error::OrderError;
use crate::messages::OrderRequest;

/// Responder half for snapshot-returning requests.
pub type SnapshotResponder = oneshot::Sender<Result<OrderSnapshot, OrderError>>;

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// Instead of spinning up a full `OrderService`, the mock client sends
/// messages to a channel the test controls. The test inspects the messages
/// arriving on that channel and plays the actor's side deterministically
/// (success, failure, delays).
pub fn create_mock_client(buffer_size: usize) -> (OrderClient, mpsc::Receiver<OrderRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (OrderClient::new(sender), receiver)
}

/// Helper to verify that the next message is a CreateOrder request
pub async fn expect_create(
    receiver: &mut mpsc::Receiver<OrderRequest>,
) -> Option<(OrderCreate, SnapshotResponder)> {
    match receiver.recv().await {
        Some(OrderRequest::CreateOrder { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a PayOrder request
pub async fn expect_pay(
    receiver: &mut mpsc::Receiver<OrderRequest>,
) -> Option<(String, SnapshotResponder)> {
    match receiver.recv().await {
        Some(OrderRequest::PayOrder { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a CancelOrder request
pub async fn expect_cancel(
    receiver: &mut mpsc::Receiver<OrderRequest>,
) -> Option<(String, SnapshotResponder)> {
    match receiver.recv().await {
        Some(OrderRequest::CancelOrder { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Order, OrderStatus};

    #[tokio::test]
    async fn test_mock_client_create() {
        let (client, mut receiver) = create_mock_client(10);

        let create_task = tokio::spawn(async move {
            let payload = OrderCreate {
                amount: Some(12.5),
                description: Some("奶茶".to_string()),
            };
            client.create_order(payload).await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected CreateOrder request");
        assert_eq!(payload.amount, Some(12.5));

        let order = Order::new("order_1", 12.5, "奶茶", 0);
        responder.send(Ok(order.snapshot(0))).unwrap();

        let result = create_task.await.unwrap().unwrap();
        assert_eq!(result.id, "order_1");
        assert_eq!(result.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_mock_client_error_passthrough() {
        let (client, mut receiver) = create_mock_client(10);

        let pay_task = tokio::spawn(async move { client.pay_order("order_9".to_string()).await });

        let (id, responder) = expect_pay(&mut receiver)
            .await
            .expect("Expected PayOrder request");
        assert_eq!(id, "order_9");
        responder.send(Err(OrderError::AlreadyFinal(id))).unwrap();

        let result = pay_task.await.unwrap();
        assert_eq!(result, Err(OrderError::AlreadyFinal("order_9".to_string())));
    }

    #[tokio::test]
    async fn test_mock_client_cancel_wiring() {
        let (client, mut receiver) = create_mock_client(10);

        let cancel_task =
            tokio::spawn(async move { client.cancel_order("order_3".to_string()).await });

        let (id, responder) = expect_cancel(&mut receiver)
            .await
            .expect("Expected CancelOrder request");
        assert_eq!(id, "order_3");

        let mut order = Order::new(id, 21.9, "代付外卖", 0);
        order.status = OrderStatus::Cancelled;
        responder.send(Ok(order.snapshot(0))).unwrap();

        let result = cancel_task.await.unwrap().unwrap();
        assert_eq!(result.status, OrderStatus::Cancelled);
    }
}
