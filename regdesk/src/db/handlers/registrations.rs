//! Registration record store.
//!
//! The store is a trait so request handlers can be exercised against an
//! in-memory fake in tests; [`PgRegistrationStore`] is the production
//! implementation backed by PostgreSQL.

use crate::db::{
    errors::Result,
    models::registrations::{RegistrationCreateDBRequest, RegistrationDBResponse, RegistrationStatus},
};
use crate::types::{abbrev_uuid, RegistrationId};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

/// Persistence operations for registration records.
///
/// `create` surfaces a `DbError::UniqueViolation` when the email already
/// exists; the unique index on `email` is the authoritative duplicate guard
/// regardless of any lookup the caller performed beforehand.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Persist a new record with status `pending` and server timestamps
    async fn create(&self, request: &RegistrationCreateDBRequest) -> Result<RegistrationDBResponse>;

    /// Exact-match lookup by email
    async fn find_by_email(&self, email: &str) -> Result<Option<RegistrationDBResponse>>;

    async fn find_by_id(&self, id: RegistrationId) -> Result<Option<RegistrationDBResponse>>;

    /// Overwrite the status of an existing record; `DbError::NotFound` if the id does not resolve
    async fn update_status(&self, id: RegistrationId, status: RegistrationStatus) -> Result<RegistrationDBResponse>;

    /// Every record, newest first; no pagination
    async fn list_all(&self) -> Result<Vec<RegistrationDBResponse>>;

    /// Delete a record, returning it so the caller can clean up the stored document
    async fn delete(&self, id: RegistrationId) -> Result<RegistrationDBResponse>;
}

/// PostgreSQL-backed registration store
pub struct PgRegistrationStore {
    pool: PgPool,
}

impl PgRegistrationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationStore for PgRegistrationStore {
    #[instrument(skip(self, request), fields(email = %request.email), err)]
    async fn create(&self, request: &RegistrationCreateDBRequest) -> Result<RegistrationDBResponse> {
        let id = Uuid::new_v4();

        let record = sqlx::query_as::<_, RegistrationDBResponse>(
            r#"
            INSERT INTO registrations
                (id, first_name, last_name, email, gender, phone, country, state, city, address, id_type, id_file_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.gender)
        .bind(&request.phone)
        .bind(&request.country)
        .bind(&request.state)
        .bind(&request.city)
        .bind(&request.address)
        .bind(&request.id_type)
        .bind(&request.id_file_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    #[instrument(skip(self, email), err)]
    async fn find_by_email(&self, email: &str) -> Result<Option<RegistrationDBResponse>> {
        let record = sqlx::query_as::<_, RegistrationDBResponse>("SELECT * FROM registrations WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    #[instrument(skip(self), fields(registration_id = %abbrev_uuid(&id)), err)]
    async fn find_by_id(&self, id: RegistrationId) -> Result<Option<RegistrationDBResponse>> {
        let record = sqlx::query_as::<_, RegistrationDBResponse>("SELECT * FROM registrations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    #[instrument(skip(self), fields(registration_id = %abbrev_uuid(&id), status = %status), err)]
    async fn update_status(&self, id: RegistrationId, status: RegistrationStatus) -> Result<RegistrationDBResponse> {
        let record = sqlx::query_as::<_, RegistrationDBResponse>(
            "UPDATE registrations SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(crate::db::errors::DbError::NotFound)?;

        Ok(record)
    }

    #[instrument(skip(self), err)]
    async fn list_all(&self) -> Result<Vec<RegistrationDBResponse>> {
        let records = sqlx::query_as::<_, RegistrationDBResponse>("SELECT * FROM registrations ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    #[instrument(skip(self), fields(registration_id = %abbrev_uuid(&id)), err)]
    async fn delete(&self, id: RegistrationId) -> Result<RegistrationDBResponse> {
        let record = sqlx::query_as::<_, RegistrationDBResponse>("DELETE FROM registrations WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(crate::db::errors::DbError::NotFound)?;

        Ok(record)
    }
}
