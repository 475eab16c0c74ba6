//! Shipping, tax and totals derived from a cart subtotal.
//!
//! Pure functions; recompute whenever the subtotal changes.

use serde::{Deserialize, Serialize};

use plantpal_core::Money;

/// Orders at or above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::new(50, 0);

/// Shipping charged below the threshold.
pub const FLAT_SHIPPING: Money = Money::new(9, 99);

/// Sales tax in basis points (8%).
pub const TAX_RATE_BPS: u32 = 800;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

impl OrderSummary {
    pub fn from_subtotal(subtotal: Money) -> Self {
        let shipping = shipping_for(subtotal);
        let tax = subtotal.apply_rate_bps(TAX_RATE_BPS);
        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }

    /// How much more to spend for free shipping, if any.
    pub fn remaining_for_free_shipping(&self) -> Option<Money> {
        (self.subtotal < FREE_SHIPPING_THRESHOLD)
            .then(|| FREE_SHIPPING_THRESHOLD - self.subtotal)
    }

    /// Subtotal plus shipping, as shown on the cart page before tax is known.
    pub fn total_before_tax(&self) -> Money {
        self.subtotal + self.shipping
    }
}

pub fn shipping_for(subtotal: Money) -> Money {
    if subtotal >= FREE_SHIPPING_THRESHOLD {
        Money::ZERO
    } else {
        FLAT_SHIPPING
    }
}
