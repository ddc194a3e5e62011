//! Database models for registration records.

use crate::types::RegistrationId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Review state of a registration record.
///
/// Every record starts as `Pending`. Status changes are unrestricted: an
/// administrator may move a record between any two states, including
/// re-approving a previously rejected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "registration_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationStatus::Pending => write!(f, "pending"),
            RegistrationStatus::Approved => write!(f, "approved"),
            RegistrationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Database request for creating a new registration record
#[derive(Debug, Clone)]
pub struct RegistrationCreateDBRequest {
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
    /// Relative access path of the stored identity document, e.g. `/uploads/idFile-....png`
    pub id_file_url: String,
}

/// Database response for a registration record
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RegistrationDBResponse {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RegistrationStatus::Approved).unwrap(), "\"approved\"");
        assert_eq!(
            serde_json::from_str::<RegistrationStatus>("\"rejected\"").unwrap(),
            RegistrationStatus::Rejected
        );
    }

    #[test]
    fn status_display_matches_wire_form() {
        assert_eq!(RegistrationStatus::Pending.to_string(), "pending");
        assert_eq!(RegistrationStatus::Approved.to_string(), "approved");
        assert_eq!(RegistrationStatus::Rejected.to_string(), "rejected");
    }
}
