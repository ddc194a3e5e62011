//! Test utilities: configuration pointed at temporary directories plus
//! in-memory fakes for the injected collaborators.

use crate::config::{Config, EmailConfig, EmailTransportConfig, PaypalConfig, UploadConfig};
use crate::db::errors::{DbError, Result};
use crate::db::handlers::RegistrationStore;
use crate::db::models::registrations::{RegistrationCreateDBRequest, RegistrationDBResponse, RegistrationStatus};
use crate::payment_providers::{PaymentProvider, Result as PaymentResult};
use crate::types::RegistrationId;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Mutex;
use uuid::Uuid;

/// Config with file-based email transport and uploads under `base`, so tests
/// can inspect everything that hits disk.
pub fn create_test_config(base: &Path) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        dashboard_url: "http://localhost:3000".to_string(),
        upload: UploadConfig {
            dir: base.join("uploads"),
            ..Default::default()
        },
        email: EmailConfig {
            transport: EmailTransportConfig::File {
                path: base.join("emails").to_string_lossy().to_string(),
            },
            from_email: "noreply@test.example".to_string(),
            from_name: "Registration Desk".to_string(),
            reply_to: None,
        },
        admin_email: "admin@test.example".to_string(),
        receiver_emails: vec!["desk@test.example".to_string()],
        payment: crate::config::PaymentConfig {
            stripe: None,
            paypal: PaypalConfig {
                client_id: Some("test-paypal-client".to_string()),
            },
        },
        ..Default::default()
    }
}

/// In-memory registration store with the same duplicate-email semantics as
/// the PostgreSQL implementation.
#[derive(Default)]
pub struct InMemoryRegistrationStore {
    records: Mutex<Vec<RegistrationDBResponse>>,
}

impl InMemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RegistrationStore for InMemoryRegistrationStore {
    async fn create(&self, request: &RegistrationCreateDBRequest) -> Result<RegistrationDBResponse> {
        let mut records = self.records.lock().expect("store mutex poisoned");

        if records.iter().any(|r| r.email == request.email) {
            return Err(DbError::UniqueViolation {
                constraint: Some("registrations_email_unique".to_string()),
                table: Some("registrations".to_string()),
                message: format!("duplicate key value: {}", request.email),
            });
        }

        let now = chrono::Utc::now();
        let record = RegistrationDBResponse {
            id: Uuid::new_v4(),
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            email: request.email.clone(),
            gender: request.gender.clone(),
            phone: request.phone.clone(),
            country: request.country.clone(),
            state: request.state.clone(),
            city: request.city.clone(),
            address: request.address.clone(),
            id_type: request.id_type.clone(),
            id_file_url: request.id_file_url.clone(),
            status: RegistrationStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        records.push(record.clone());
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<RegistrationDBResponse>> {
        let records = self.records.lock().expect("store mutex poisoned");
        Ok(records.iter().find(|r| r.email == email).cloned())
    }

    async fn find_by_id(&self, id: RegistrationId) -> Result<Option<RegistrationDBResponse>> {
        let records = self.records.lock().expect("store mutex poisoned");
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn update_status(&self, id: RegistrationId, status: RegistrationStatus) -> Result<RegistrationDBResponse> {
        let mut records = self.records.lock().expect("store mutex poisoned");
        let record = records.iter_mut().find(|r| r.id == id).ok_or(DbError::NotFound)?;
        record.status = status;
        record.updated_at = chrono::Utc::now();
        Ok(record.clone())
    }

    async fn list_all(&self) -> Result<Vec<RegistrationDBResponse>> {
        let records = self.records.lock().expect("store mutex poisoned");
        // Newest first, matching the SQL ordering
        Ok(records.iter().rev().cloned().collect())
    }

    async fn delete(&self, id: RegistrationId) -> Result<RegistrationDBResponse> {
        let mut records = self.records.lock().expect("store mutex poisoned");
        let index = records.iter().position(|r| r.id == id).ok_or(DbError::NotFound)?;
        Ok(records.remove(index))
    }
}

/// Payment provider fake returning a fixed session id.
pub struct FakePaymentProvider;

#[async_trait]
impl PaymentProvider for FakePaymentProvider {
    async fn create_checkout_session(&self) -> PaymentResult<String> {
        Ok("cs_test_a1b2c3".to_string())
    }
}
