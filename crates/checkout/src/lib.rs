//! Checkout: order pricing, the two-step checkout flow and order submission.

pub mod error;
pub mod flow;
pub mod order;
pub mod pricing;

pub use error::CheckoutError;
pub use flow::{CheckoutFlow, CheckoutStep, PaymentInfo, ShippingInfo};
pub use order::{OrderConfirmation, OrderProcessor, OrderRequest, SimulatedOrderProcessor};
pub use pricing::{FLAT_SHIPPING, FREE_SHIPPING_THRESHOLD, OrderSummary, TAX_RATE_BPS};
