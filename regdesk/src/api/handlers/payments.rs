use crate::api::models::payments::{CheckoutSessionResponse, PaypalConfigResponse};
use crate::errors::{Error, Result};
use crate::AppState;
use axum::{extract::State, Json};

#[utoipa::path(
    post,
    path = "/create-checkout-session",
    tag = "payments",
    summary = "Create a checkout session",
    description = "Creates a hosted checkout session for the fixed service payment and returns its id.",
    responses(
        (status = 200, description = "Session created", body = CheckoutSessionResponse),
        (status = 500, description = "Provider error or payments not configured")
    )
)]
pub async fn create_checkout_session(State(state): State<AppState>) -> Result<Json<CheckoutSessionResponse>> {
    let provider = state.payments.as_ref().ok_or_else(|| Error::Internal {
        operation: "create checkout session: no payment provider configured".to_string(),
    })?;

    let id = provider.create_checkout_session().await?;

    Ok(Json(CheckoutSessionResponse { id }))
}

#[utoipa::path(
    get,
    path = "/api/config/paypal",
    tag = "payments",
    summary = "PayPal client configuration",
    responses(
        (status = 200, description = "Client id for the frontend SDK", body = PaypalConfigResponse)
    )
)]
pub async fn paypal_config(State(state): State<AppState>) -> Json<PaypalConfigResponse> {
    Json(PaypalConfigResponse {
        client_id: state.config.payment.paypal.client_id.clone(),
    })
}
