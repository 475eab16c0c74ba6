use thiserror::Error;

use plantpal_core::DomainError;

use crate::flow::CheckoutStep;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("sign in to check out")]
    NotSignedIn,

    #[error("your cart is empty")]
    EmptyCart,

    #[error("checkout is at the {actual:?} step, expected {expected:?}")]
    WrongStep {
        expected: CheckoutStep,
        actual: CheckoutStep,
    },

    /// A required field was missing or malformed.
    #[error(transparent)]
    Invalid(#[from] DomainError),
}
