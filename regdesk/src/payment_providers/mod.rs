//! Payment provider abstraction layer
//!
//! This module defines the `PaymentProvider` trait which abstracts checkout
//! session creation across different payment providers.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::PaymentConfig;

pub mod stripe;

/// Create a payment provider from configuration, if one is configured.
///
/// This is the single point where config is converted into a provider
/// instance. Adding a new provider means adding a match arm here.
pub fn create_provider(config: &PaymentConfig) -> Option<Arc<dyn PaymentProvider>> {
    config
        .stripe
        .as_ref()
        .map(|stripe_config| Arc::new(stripe::StripeProvider::from(stripe_config.clone())) as Arc<dyn PaymentProvider>)
}

/// Result type for payment provider operations
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Errors that can occur during payment processing
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment provider API error: {0}")]
    ProviderApi(String),
}

impl From<PaymentError> for crate::errors::Error {
    fn from(err: PaymentError) -> Self {
        crate::errors::Error::Internal {
            operation: format!("create checkout session: {err}"),
        }
    }
}

/// Abstract payment provider interface
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a new checkout session and return its provider-assigned id.
    ///
    /// The frontend redirects the customer to the provider's hosted page
    /// using this id.
    async fn create_checkout_session(&self) -> Result<String>;
}
