//! Stripe payment provider implementation

use async_trait::async_trait;
use stripe::{
    CheckoutSession, CheckoutSessionMode, Client, CreateCheckoutSession, CreateCheckoutSessionLineItems,
    CreateCheckoutSessionLineItemsPriceData, CreateCheckoutSessionLineItemsPriceDataProductData,
    CreateCheckoutSessionPaymentMethodTypes, Currency,
};

use crate::{
    config::StripeConfig,
    payment_providers::{PaymentError, PaymentProvider, Result},
};

/// Price of the fixed service-payment line item, in kobo (NGN minor units)
const SERVICE_PAYMENT_AMOUNT: i64 = 70000;

/// Stripe payment provider
pub struct StripeProvider {
    secret_key: String,
    success_url: String,
    cancel_url: String,
}

impl From<StripeConfig> for StripeProvider {
    fn from(config: StripeConfig) -> Self {
        Self {
            secret_key: config.secret_key,
            success_url: config.success_url,
            cancel_url: config.cancel_url,
        }
    }
}

impl StripeProvider {
    /// Get a Stripe client
    fn client(&self) -> Client {
        Client::new(&self.secret_key)
    }
}

#[async_trait]
impl PaymentProvider for StripeProvider {
    async fn create_checkout_session(&self) -> Result<String> {
        let client = self.client();

        let checkout_params = CreateCheckoutSession {
            cancel_url: Some(self.cancel_url.as_str()),
            success_url: Some(self.success_url.as_str()),
            mode: Some(CheckoutSessionMode::Payment),
            payment_method_types: Some(vec![CreateCheckoutSessionPaymentMethodTypes::Card]),
            line_items: Some(vec![CreateCheckoutSessionLineItems {
                price_data: Some(CreateCheckoutSessionLineItemsPriceData {
                    currency: Currency::NGN,
                    product_data: Some(CreateCheckoutSessionLineItemsPriceDataProductData {
                        name: "Service Payment".to_string(),
                        ..Default::default()
                    }),
                    unit_amount: Some(SERVICE_PAYMENT_AMOUNT),
                    ..Default::default()
                }),
                quantity: Some(1),
                ..Default::default()
            }]),
            ..Default::default()
        };

        let checkout_session = CheckoutSession::create(&client, checkout_params).await.map_err(|e| {
            tracing::error!("Failed to create Stripe checkout session: {:?}", e);
            PaymentError::ProviderApi(e.to_string())
        })?;

        tracing::info!("Created checkout session {}", checkout_session.id);

        Ok(checkout_session.id.to_string())
    }
}
