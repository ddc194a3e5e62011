//! API request/response models for registrations.

use crate::db::models::registrations::{RegistrationCreateDBRequest, RegistrationDBResponse, RegistrationStatus};
use crate::errors::Error;
use crate::types::RegistrationId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A registration record as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    #[schema(value_type = uuid::Uuid)]
    pub id: RegistrationId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub phone: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub address: String,
    pub id_type: String,
    pub id_file_url: String,
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RegistrationDBResponse> for RegistrationResponse {
    fn from(db: RegistrationDBResponse) -> Self {
        Self {
            id: db.id,
            first_name: db.first_name,
            last_name: db.last_name,
            email: db.email,
            gender: db.gender,
            phone: db.phone,
            country: db.country,
            state: db.state,
            city: db.city,
            address: db.address,
            id_type: db.id_type,
            id_file_url: db.id_file_url,
            status: db.status,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// Response to a successful registration
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub data: RegistrationResponse,
}

/// Request body for the status-update operation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    #[schema(value_type = uuid::Uuid)]
    pub user_id: RegistrationId,
    pub status: RegistrationStatus,
}

/// Simple message-only response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Text fields of the registration multipart form, collected while draining
/// the request. Unknown field names are ignored for forward compatibility.
#[derive(Debug, Default)]
pub struct RegistrationForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub id_type: Option<String>,
}

impl RegistrationForm {
    pub fn set(&mut self, name: &str, value: String) {
        match name {
            "firstName" => self.first_name = Some(value),
            "lastName" => self.last_name = Some(value),
            "email" => self.email = Some(value),
            "gender" => self.gender = Some(value),
            "phone" => self.phone = Some(value),
            "country" => self.country = Some(value),
            "state" => self.state = Some(value),
            "city" => self.city = Some(value),
            "address" => self.address = Some(value),
            "idType" => self.id_type = Some(value),
            _ => {}
        }
    }

    /// Intake validation: every field must be present and non-empty, and the
    /// caller must have received an attachment. One blanket message covers
    /// all of it, matching what clients already display.
    pub fn validate(self, has_file: bool) -> Result<ValidatedRegistration, Error> {
        fn required(value: Option<String>) -> Result<String, Error> {
            match value {
                Some(v) if !v.is_empty() => Ok(v),
                _ => Err(Error::Validation {
                    message: "All fields and file upload are required!".to_string(),
                }),
            }
        }

        if !has_file {
            return Err(Error::Validation {
                message: "All fields and file upload are required!".to_string(),
            });
        }

        Ok(ValidatedRegistration {
            first_name: required(self.first_name)?,
            last_name: required(self.last_name)?,
            email: required(self.email)?,
            gender: required(self.gender)?,
            phone: required(self.phone)?,
            country: required(self.country)?,
            state: required(self.state)?,
            city: required(self.city)?,
            address: required(self.address)?,
            id_type: required(self.id_type)?,
        })
    }
}

/// A registration form that passed intake validation
#[derive(Debug, Clone)]
pub struct ValidatedRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub phone: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub address: String,
    pub id_type: String,
}

impl ValidatedRegistration {
    pub fn into_db_request(self, id_file_url: String) -> RegistrationCreateDBRequest {
        RegistrationCreateDBRequest {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            gender: self.gender,
            phone: self.phone,
            country: self.country,
            state: self.state,
            city: self.city,
            address: self.address,
            id_type: self.id_type,
            id_file_url,
        }
    }
}
