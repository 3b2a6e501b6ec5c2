use tracing::{error, info, instrument};

use crate::actors::OrderService;
use crate::clients::OrderClient;

/// The main application system.
///
/// Responsible for starting the order actor, handing out its client, and
/// handling shutdown.
pub struct PayLinkSystem {
    pub order_client: OrderClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Default for PayLinkSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl PayLinkSystem {
    #[instrument(name = "paylink_system")]
    pub fn new() -> Self {
        info!("Starting pay link system");

        let (order_service, order_client) = OrderService::new(100);
        let order_handle = tokio::spawn(order_service.run());

        info!("Pay link system started successfully");

        Self {
            order_client,
            handles: vec![order_handle],
        }
    }

    /// Gracefully shuts down the system and waits for the actor to stop.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down pay link system");

        let _ = self.order_client.shutdown().await;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
                return Err(format!("Service task failed: {:?}", e));
            }
        }

        info!("Pay link system shutdown complete");
        Ok(())
    }
}
