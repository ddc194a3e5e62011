//! API models for the payment endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A freshly created checkout session
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckoutSessionResponse {
    /// Provider-assigned session id the frontend redirects with
    pub id: String,
}

/// PayPal client configuration handed to the frontend SDK
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaypalConfigResponse {
    pub client_id: Option<String>,
}
