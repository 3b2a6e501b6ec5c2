use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::clients::OrderClient;
use crate::domain::{Order, OrderCreate, OrderSnapshot, OrderStatus, DEFAULT_AMOUNT, DEFAULT_DESCRIPTION};
use crate::error::OrderError;
use crate::messages::{OrderRequest, ServiceResponse};
use crate::store::OrderStore;

/// Time source returning unix epoch milliseconds. Injected so tests can drive
/// the clock past the validity window.
pub type Clock = Box<dyn Fn() -> u64 + Send + Sync>;

/// Current unix time in milliseconds.
fn system_now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

// =============================================================================
// ORDER SERVICE
// =============================================================================

/// Order lifecycle actor. Exclusively owns the [`OrderStore`] and applies all
/// transition rules; callers only ever see cloned snapshots.
///
/// The message loop is the mutual-exclusion scope required by the lifecycle
/// invariants: each request is processed to completion before the next, so
/// observe-then-write expiry checks cannot race with a concurrent pay.
pub struct OrderService {
    receiver: mpsc::Receiver<OrderRequest>,
    store: OrderStore,
    next_id: u64,
    clock: Clock,
}

impl OrderService {
    /// Creates a service backed by the system clock.
    pub fn new(buffer_size: usize) -> (Self, OrderClient) {
        Self::with_clock(buffer_size, system_now_ms)
    }

    /// Creates a service with an injected clock, for driving time in tests.
    pub fn with_clock(
        buffer_size: usize,
        clock: impl Fn() -> u64 + Send + Sync + 'static,
    ) -> (Self, OrderClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            store: OrderStore::new(),
            next_id: 1,
            clock: Box::new(clock),
        };
        let client = OrderClient::new(sender);
        (service, client)
    }

    #[instrument(name = "order_service", skip(self))]
    pub async fn run(mut self) {
        info!("OrderService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                OrderRequest::CreateOrder { payload, respond_to } => {
                    self.handle_create_order(payload, respond_to);
                }
                OrderRequest::GetOrder { id, respond_to } => {
                    self.handle_get_order(id, respond_to);
                }
                OrderRequest::PayOrder { id, respond_to } => {
                    self.handle_pay_order(id, respond_to);
                }
                OrderRequest::CancelOrder { id, respond_to } => {
                    self.handle_cancel_order(id, respond_to);
                }
                OrderRequest::Shutdown => {
                    info!("OrderService shutting down");
                    break;
                }
                #[cfg(test)]
                OrderRequest::GetOrderCount { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.len()));
                }
            }
        }

        info!("OrderService stopped");
    }

    /// Applies the implicit expiry transition before any read observes the
    /// order: a pending order past its deadline is written back as cancelled,
    /// making the computed fact durable and repeat reads idempotent.
    fn refresh(&mut self, id: &str, now: u64) -> Option<Order> {
        let mut order = self.store.get(id)?;
        if order.status == OrderStatus::Pending && order.is_expired(now) {
            order.status = OrderStatus::Cancelled;
            info!(order_id = %id, "Order expired, cancelled by timeout");
            self.store.put(order.clone());
        }
        Some(order)
    }

    #[instrument(fields(amount = ?payload.amount), skip(self, payload, respond_to))]
    fn handle_create_order(
        &mut self,
        payload: OrderCreate,
        respond_to: ServiceResponse<OrderSnapshot, OrderError>,
    ) {
        debug!("Processing create_order request");

        if let Some(amount) = payload.amount {
            if !amount.is_finite() || amount <= 0.0 {
                error!(amount, "Validation failed: non-positive amount");
                let _ = respond_to.send(Err(OrderError::InvalidAmount(amount)));
                return;
            }
        }

        let now = (self.clock)();
        let id = format!("order_{}", self.next_id);
        self.next_id += 1;

        let order = Order::new(
            id.clone(),
            payload.amount.unwrap_or(DEFAULT_AMOUNT),
            payload
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            now,
        );
        let snapshot = order.snapshot(now);
        self.store.put(order);

        info!(order_id = %id, "Order created successfully");
        let _ = respond_to.send(Ok(snapshot));
    }

    #[instrument(fields(order_id = %id), skip(self, respond_to))]
    fn handle_get_order(
        &mut self,
        id: String,
        respond_to: ServiceResponse<OrderSnapshot, OrderError>,
    ) {
        debug!("Processing get_order request");

        let now = (self.clock)();
        let result = match self.refresh(&id, now) {
            Some(order) => {
                info!(status = %order.status, "Order found");
                Ok(order.snapshot(now))
            }
            None => {
                debug!("Order not found");
                Err(OrderError::NotFound(id))
            }
        };

        let _ = respond_to.send(result);
    }

    #[instrument(fields(order_id = %id), skip(self, respond_to))]
    fn handle_pay_order(
        &mut self,
        id: String,
        respond_to: ServiceResponse<OrderSnapshot, OrderError>,
    ) {
        debug!("Processing pay_order request");

        let now = (self.clock)();
        let result = match self.refresh(&id, now) {
            Some(mut order) => match order.status {
                OrderStatus::Pending => {
                    order.status = OrderStatus::Paid;
                    self.store.put(order.clone());
                    info!(amount = %order.amount, "Order paid successfully");
                    Ok(order.snapshot(now))
                }
                OrderStatus::Paid => {
                    debug!("Order already paid, repeat pay ignored");
                    Ok(order.snapshot(now))
                }
                OrderStatus::Cancelled => {
                    error!("Pay rejected: order cancelled or expired");
                    Err(OrderError::AlreadyFinal(id))
                }
            },
            None => {
                debug!("Order not found");
                Err(OrderError::NotFound(id))
            }
        };

        let _ = respond_to.send(result);
    }

    #[instrument(fields(order_id = %id), skip(self, respond_to))]
    fn handle_cancel_order(
        &mut self,
        id: String,
        respond_to: ServiceResponse<OrderSnapshot, OrderError>,
    ) {
        debug!("Processing cancel_order request");

        let now = (self.clock)();
        let result = match self.refresh(&id, now) {
            Some(mut order) => {
                if order.status.is_terminal() {
                    debug!(status = %order.status, "Order already final, cancel ignored");
                } else {
                    order.status = OrderStatus::Cancelled;
                    self.store.put(order.clone());
                    info!("Order cancelled");
                }
                Ok(order.snapshot(now))
            }
            None => {
                debug!("Order not found");
                Err(OrderError::NotFound(id))
            }
        };

        let _ = respond_to.send(result);
    }
}
