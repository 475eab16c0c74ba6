//! Order submission port and a simulated processor.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use plantpal_auth::User;
use plantpal_cart::CartLine;
use plantpal_core::UserId;

use crate::error::CheckoutError;
use crate::flow::{PaymentInfo, ShippingInfo};
use crate::pricing::OrderSummary;

/// Everything needed to place an order. Built by [`crate::CheckoutFlow`].
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub user: User,
    pub lines: Vec<CartLine>,
    pub shipping: ShippingInfo,
    pub summary: OrderSummary,
    pub payment: PaymentInfo,
}

/// Receipt for a placed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderConfirmation {
    pub order_id: Uuid,
    pub user_id: UserId,
    pub lines: Vec<CartLine>,
    pub shipping: ShippingInfo,
    pub summary: OrderSummary,
    pub card_last_four: String,
    pub placed_at: DateTime<Utc>,
}

/// Takes payment and records the order.
#[async_trait]
pub trait OrderProcessor: Send + Sync {
    async fn submit(&self, request: &OrderRequest) -> Result<OrderConfirmation, CheckoutError>;
}

/// Accepts every order after a fixed pause. No payment is taken.
#[derive(Debug, Clone)]
pub struct SimulatedOrderProcessor {
    delay: Duration,
}

impl SimulatedOrderProcessor {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedOrderProcessor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl OrderProcessor for SimulatedOrderProcessor {
    async fn submit(&self, request: &OrderRequest) -> Result<OrderConfirmation, CheckoutError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let confirmation = OrderConfirmation {
            order_id: Uuid::now_v7(),
            user_id: request.user.id.clone(),
            lines: request.lines.clone(),
            shipping: request.shipping.clone(),
            summary: request.summary,
            card_last_four: request.payment.card_last_four(),
            placed_at: Utc::now(),
        };
        tracing::info!(
            order_id = %confirmation.order_id,
            user_id = %confirmation.user_id,
            total = %confirmation.summary.total,
            "order placed"
        );
        Ok(confirmation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::test_support::{payment, shipping};
    use plantpal_core::Money;

    fn request() -> OrderRequest {
        OrderRequest {
            user: User::new(UserId::new("7"), "ivy", "ivy@example.com"),
            lines: vec![],
            shipping: shipping(),
            summary: OrderSummary::from_subtotal(Money::new(60, 0)),
            payment: payment(),
        }
    }

    #[tokio::test]
    async fn simulated_processor_confirms_with_fresh_ids() {
        let processor = SimulatedOrderProcessor::new(Duration::ZERO);
        let first = processor.submit(&request()).await.unwrap();
        let second = processor.submit(&request()).await.unwrap();

        assert_ne!(first.order_id, second.order_id);
        assert_eq!(first.user_id.as_str(), "7");
        assert_eq!(first.summary.total, Money::new(64, 80));
    }

    #[tokio::test]
    async fn processor_is_usable_as_trait_object() {
        let processor: Box<dyn OrderProcessor> = Box::new(SimulatedOrderProcessor::new(Duration::ZERO));
        let confirmation = processor.submit(&request()).await.unwrap();
        assert_eq!(confirmation.card_last_four, "1234");
    }
}
