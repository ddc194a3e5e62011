//! API models for the contact-form emailer.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Contact-form submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Contact-form result, success and failure alike
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}
