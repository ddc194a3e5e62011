//! OpenAPI documentation assembly.
//!
//! Collects the `utoipa` path and schema annotations from the API layer into
//! a single document, rendered at `/docs` by the scalar UI.

use utoipa::OpenApi;

use crate::api::{handlers, models};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "regdesk",
        description = "Registration intake service: multipart document intake, review workflow, and notification emails."
    ),
    paths(
        handlers::registrations::register,
        handlers::registrations::list_users,
        handlers::registrations::update_status,
        handlers::registrations::delete_user,
        handlers::contact::send_email,
        handlers::payments::create_checkout_session,
        handlers::payments::paypal_config,
    ),
    components(schemas(
        models::registrations::RegistrationResponse,
        models::registrations::RegisterResponse,
        models::registrations::StatusUpdateRequest,
        models::registrations::MessageResponse,
        models::contact::ContactForm,
        models::contact::ContactResponse,
        models::payments::CheckoutSessionResponse,
        models::payments::PaypalConfigResponse,
    )),
    tags(
        (name = "registrations", description = "Registration intake and review workflow"),
        (name = "contact", description = "Contact-form emailer"),
        (name = "payments", description = "Checkout sessions and frontend payment configuration")
    )
)]
pub struct ApiDoc;
