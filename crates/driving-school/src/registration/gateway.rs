use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use super::catalog::CourseKey;
use super::domain::CardDetails;

/// Order handed to the gateway once a registration passes validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub course: CourseKey,
    pub course_name: String,
    /// Whole dollars; `None` for "contact us" inquiries.
    pub amount: Option<u32>,
    pub payer_name: String,
    pub email: String,
    pub phone: String,
    pub comments: String,
    pub card: Option<CardDetails>,
}

/// Acknowledgement returned by a successful charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChargeReceipt {
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("payment declined: {0}")]
    Declined(String),
    #[error("payment gateway unavailable: {0}")]
    Unavailable(String),
}

/// Outbound "submit order" capability so the processor can be exercised without a processor
/// account.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, order: &Order) -> Result<ChargeReceipt, GatewayError>;
}

static ORDER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_reference() -> String {
    let id = ORDER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("reg-{id:06}")
}

/// Stand-in gateway that waits out a fixed delay before answering.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
    decline_all: bool,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            decline_all: false,
        }
    }

    pub fn declining(delay: Duration) -> Self {
        Self {
            delay,
            decline_all: true,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, order: &Order) -> Result<ChargeReceipt, GatewayError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.decline_all {
            tracing::warn!(course = order.course.code(), "simulated gateway declined charge");
            return Err(GatewayError::Declined("simulated decline".to_string()));
        }

        let reference = next_reference();
        tracing::debug!(
            course = order.course.code(),
            amount = ?order.amount,
            %reference,
            "simulated gateway accepted order"
        );
        Ok(ChargeReceipt { reference })
    }
}
