//! Two-step checkout: shipping details, then payment.

use serde::{Deserialize, Serialize};

use plantpal_auth::User;
use plantpal_cart::Cart;
use plantpal_core::{DomainError, DomainResult};

use crate::error::CheckoutError;
use crate::order::{OrderConfirmation, OrderProcessor, OrderRequest};
use crate::pricing::OrderSummary;

pub const DEFAULT_COUNTRY: &str = "United States";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutStep {
    Shipping,
    Payment,
    Complete,
}

fn require(field: &'static str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl Default for ShippingInfo {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl ShippingInfo {
    pub fn validate(&self) -> DomainResult<()> {
        require("first name", &self.first_name)?;
        require("last name", &self.last_name)?;
        require("email", &self.email)?;
        require("phone", &self.phone)?;
        require("address", &self.address)?;
        require("city", &self.city)?;
        require("state", &self.state)?;
        require("ZIP code", &self.zip_code)?;
        require("country", &self.country)
    }
}

/// Card details. Only the last four digits ever leave the checkout flow.
#[derive(Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub name_on_card: String,
}

impl core::fmt::Debug for PaymentInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PaymentInfo")
            .field("card_last_four", &self.card_last_four())
            .field("name_on_card", &self.name_on_card)
            .finish_non_exhaustive()
    }
}

impl PaymentInfo {
    pub fn validate(&self) -> DomainResult<()> {
        require("card number", &self.card_number)?;
        require("expiry date", &self.expiry_date)?;
        require("CVV", &self.cvv)?;
        require("name on card", &self.name_on_card)
    }

    pub fn card_last_four(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().filter(char::is_ascii_digit).collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }
}

/// Checkout state for one signed-in user. Entered shipping data survives
/// going back from the payment step.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    shipping: ShippingInfo,
}

impl CheckoutFlow {
    /// Checkout needs a signed-in user and something in the cart.
    pub fn start(user: Option<&User>, cart: &Cart) -> Result<Self, CheckoutError> {
        if user.is_none() {
            return Err(CheckoutError::NotSignedIn);
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(Self {
            step: CheckoutStep::Shipping,
            shipping: ShippingInfo::default(),
        })
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn shipping(&self) -> &ShippingInfo {
        &self.shipping
    }

    /// Live totals for the order-summary panel.
    pub fn summary(&self, cart: &Cart) -> OrderSummary {
        OrderSummary::from_subtotal(cart.subtotal())
    }

    pub fn submit_shipping(&mut self, shipping: ShippingInfo) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Shipping)?;
        shipping.validate()?;
        self.shipping = shipping;
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// Return to the shipping step; a no-op anywhere but the payment step.
    pub fn back(&mut self) {
        if self.step == CheckoutStep::Payment {
            self.step = CheckoutStep::Shipping;
        }
    }

    /// Submit payment and wait for the processor. On success the flow is
    /// complete; the caller is responsible for clearing the cart.
    pub async fn place_order<P>(
        &mut self,
        payment: PaymentInfo,
        user: &User,
        cart: &Cart,
        processor: &P,
    ) -> Result<OrderConfirmation, CheckoutError>
    where
        P: OrderProcessor + ?Sized,
    {
        self.expect_step(CheckoutStep::Payment)?;
        payment.validate()?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let request = OrderRequest {
            user: user.clone(),
            lines: cart.lines().to_vec(),
            shipping: self.shipping.clone(),
            summary: self.summary(cart),
            payment,
        };
        let confirmation = processor.submit(&request).await?;
        self.step = CheckoutStep::Complete;
        Ok(confirmation)
    }

    fn expect_step(&self, expected: CheckoutStep) -> Result<(), CheckoutError> {
        if self.step != expected {
            return Err(CheckoutError::WrongStep {
                expected,
                actual: self.step,
            });
        }
        Ok(())
    }
}
