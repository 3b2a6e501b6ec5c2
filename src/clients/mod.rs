use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::domain::{OrderCreate, OrderSnapshot};
use crate::error::OrderError;
use crate::messages::OrderRequest;

// =============================================================================
// CLIENT METHOD MACRO
// =============================================================================

/// Generate client methods with oneshot channel boilerplate and automatic tracing.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| <$error_type>::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| <$error_type>::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}

// =============================================================================
// ORDER CLIENT
// =============================================================================

/// Client for the order lifecycle actor. Thin wrapper around the message
/// channel; all transition rules live on the service side.
#[derive(Clone)]
pub struct OrderClient {
    sender: mpsc::Sender<OrderRequest>,
}

impl OrderClient {
    pub fn new(sender: mpsc::Sender<OrderRequest>) -> Self {
        Self { sender }
    }

    /// Manual method for the fire-and-forget shutdown request
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), String> {
        debug!("Sending shutdown request");
        self.sender
            .send(OrderRequest::Shutdown)
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}

// Generate client methods with automatic tracing
client_method!(OrderClient => fn create_order(payload: OrderCreate) -> OrderSnapshot as OrderRequest::CreateOrder, Error = OrderError);
client_method!(OrderClient => fn get_order(id: String) -> OrderSnapshot as OrderRequest::GetOrder, Error = OrderError);
client_method!(OrderClient => fn pay_order(id: String) -> OrderSnapshot as OrderRequest::PayOrder, Error = OrderError);
client_method!(OrderClient => fn cancel_order(id: String) -> OrderSnapshot as OrderRequest::CancelOrder, Error = OrderError);

// Test-only method for internal state inspection
#[cfg(test)]
client_method!(OrderClient => fn order_count() -> usize as OrderRequest::GetOrderCount, Error = OrderError);
