//! System orchestration, startup, and shutdown logic.

pub mod order_system;
pub mod tracing;

pub use self::order_system::*;
pub use self::tracing::*;
