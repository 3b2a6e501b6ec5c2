use tokio::sync::oneshot;

use crate::domain::{OrderCreate, OrderSnapshot};
use crate::error::OrderError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed messages for the order actor. Each variant includes parameters and a
/// oneshot channel for the response.
#[derive(Debug)]
pub enum OrderRequest {
    CreateOrder {
        payload: OrderCreate,
        respond_to: ServiceResponse<OrderSnapshot, OrderError>,
    },
    GetOrder {
        id: String,
        respond_to: ServiceResponse<OrderSnapshot, OrderError>,
    },
    PayOrder {
        id: String,
        respond_to: ServiceResponse<OrderSnapshot, OrderError>,
    },
    CancelOrder {
        id: String,
        respond_to: ServiceResponse<OrderSnapshot, OrderError>,
    },
    Shutdown,
    #[cfg(test)]
    GetOrderCount {
        respond_to: ServiceResponse<usize, OrderError>,
    },
}
