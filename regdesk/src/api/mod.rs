//! API layer for HTTP request handling and data models.
//!
//! This module contains the REST API implementation, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for all endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! The surface is small: registration intake (`/register`), the review
//! workflow (`/users`, `/users/update-status`, `/users/{id}`), the stored
//! document files (`/uploads/{filename}`), the contact-form emailer
//! (`/send-email`), and the payment endpoints (`/create-checkout-session`,
//! `/api/config/paypal`). All endpoints are documented with OpenAPI
//! annotations using `utoipa`; the rendered documentation is served at
//! `/docs`.

pub mod handlers;
pub mod models;
