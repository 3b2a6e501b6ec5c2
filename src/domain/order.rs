use std::fmt;

/// Fixed validity window for a pay link, in milliseconds (15 minutes).
pub const VALIDITY_WINDOW_MS: u64 = 15 * 60 * 1000;

/// Amount applied when the requester omits one.
pub const DEFAULT_AMOUNT: f64 = 21.9;

/// Description applied when the requester omits one.
pub const DEFAULT_DESCRIPTION: &str = "代付外卖";

/// Lifecycle status of an order.
///
/// `Pending` is the only non-terminal state. There is no stored "expired"
/// status: a pending order past its deadline is recorded as `Cancelled` the
/// first time a read observes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Paid,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states ignore all further transition requests.
    pub fn is_terminal(self) -> bool {
        !matches!(self, OrderStatus::Pending)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Paid => write!(f, "paid"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Represents a single pay-for-me request.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub amount: f64,
    pub description: String,
    pub status: OrderStatus,
    /// Unix epoch milliseconds.
    pub created_at: u64,
    /// Always exactly `created_at + VALIDITY_WINDOW_MS`.
    pub expires_at: u64,
}

/// Payload for creating a new order. Absent fields fall back to the defaults.
#[derive(Debug, Clone, Default)]
pub struct OrderCreate {
    pub amount: Option<f64>,
    pub description: Option<String>,
}

/// Read-only view of an order handed to callers for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSnapshot {
    pub id: String,
    pub amount: f64,
    pub description: String,
    pub status: OrderStatus,
    pub created_at: u64,
    pub expires_at: u64,
    /// Whole seconds left before expiry, clamped to zero.
    pub seconds_remaining: u64,
}

impl Order {
    /// Creates a new pending order.
    ///
    /// # Arguments
    /// * `id` - Unique identifier assigned by the service
    /// * `amount` - Positive amount the payer is asked to cover
    /// * `description` - Free-text label shown to the payer
    /// * `created_at` - Creation time in unix epoch milliseconds
    pub fn new(
        id: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
        created_at: u64,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            description: description.into(),
            status: OrderStatus::Pending,
            created_at,
            expires_at: created_at + VALIDITY_WINDOW_MS,
        }
    }

    /// Whether the validity window has elapsed at `now_ms`.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms > self.expires_at
    }

    /// Builds the caller-facing view with the derived countdown.
    pub fn snapshot(&self, now_ms: u64) -> OrderSnapshot {
        OrderSnapshot {
            id: self.id.clone(),
            amount: self.amount,
            description: self.description.clone(),
            status: self.status,
            created_at: self.created_at,
            expires_at: self.expires_at,
            seconds_remaining: self.expires_at.saturating_sub(now_ms) / 1000,
        }
    }
}
