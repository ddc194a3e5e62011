use crate::api::models::contact::{ContactForm, ContactResponse};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};

#[utoipa::path(
    post,
    path = "/send-email",
    tag = "contact",
    summary = "Send a contact-form message",
    description = "Forwards the submission to the configured receiver addresses and acknowledges the sender. \
                   Unlike registration notifications, a transport failure here is reported to the client.",
    request_body = ContactForm,
    responses(
        (status = 200, description = "Both emails dispatched", body = ContactResponse),
        (status = 500, description = "Email dispatch failed", body = ContactResponse)
    )
)]
pub async fn send_email(State(state): State<AppState>, Json(form): Json<ContactForm>) -> Response {
    let result = async {
        state
            .email
            .send_contact_notification(&state.config.receiver_emails, &form.name, &form.email, &form.message)
            .await?;
        state.email.send_contact_ack(&form.email, &form.name).await
    }
    .await;

    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(ContactResponse {
                success: true,
                message: "Emails sent successfully!".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Error sending contact-form email");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ContactResponse {
                    success: false,
                    message: "Failed to send email".to_string(),
                }),
            )
                .into_response()
        }
    }
}
