//! # regdesk: Registration Intake Service
//!
//! `regdesk` is a small backend for training/program registrations. It accepts
//! a multipart form carrying an applicant's personal details plus an identity
//! document, validates the submission, deduplicates applicants by email,
//! persists a registration record, serves the uploaded document back over
//! HTTP, and sends templated notification emails when a registration arrives
//! and when an administrator changes its review status. Two auxiliary
//! surfaces ride along: a generic contact-form emailer and payment endpoints
//! (a hosted checkout session plus PayPal client configuration for the
//! frontend).
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer and uses PostgreSQL via SQLx for persistence. Migrations
//! are embedded and run automatically at startup.
//!
//! ### Request Flow
//!
//! A registration request (`POST /register`) passes through four stages:
//! the upload acceptance policy screens the attached document (type and
//! size) while the multipart stream is drained; the intake validator checks
//! that every required text field is present; a duplicate-email lookup gives
//! a friendly early rejection (the unique index on `email` is the
//! authoritative guard under concurrency); and finally the document is
//! written to the upload directory and the record inserted. Two notification
//! emails are then dispatched best-effort; a failure to send never rolls
//! back or fails a registration that already succeeded.
//!
//! The review workflow (`GET /users`, `POST /users/update-status`,
//! `DELETE /users/{id}`) operates directly on the store; deletion also
//! removes the stored document, treating an already-missing file as fine.
//!
//! ### Core Components
//!
//! All collaborators are constructed once at startup and injected through
//! [`AppState`], so tests can substitute fakes:
//!
//! - [`db::handlers::RegistrationStore`]: record persistence (PostgreSQL
//!   implementation: [`db::handlers::PgRegistrationStore`])
//! - [`db::handlers::DocumentStorage`]: identity-document storage (local
//!   disk, served back at `/uploads`)
//! - [`email::EmailService`]: lettre-backed mail with SMTP and file
//!   transports and fixed HTML templates
//! - [`payment_providers::PaymentProvider`]: checkout-session creation
//!   (Stripe implementation)
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use regdesk::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = regdesk::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     regdesk::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod config;
pub mod db;
pub mod email;
pub mod errors;
mod openapi;
pub mod payment_providers;
pub mod telemetry;
pub mod types;
mod upload;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
#[cfg(test)]
mod test;

use crate::{
    db::handlers::{DocumentStorage, LocalDocumentStorage, PgRegistrationStore, RegistrationStore},
    email::EmailService,
    openapi::ApiDoc,
    payment_providers::PaymentProvider,
};
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use bon::Builder;
pub use config::Config;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::RegistrationId;

/// Application state shared across all request handlers.
///
/// Holds the injected collaborators: the registration store, the document
/// storage backend, the email service, the optional payment provider, and
/// the loaded configuration. Everything is constructed at startup (or by a
/// test harness) and cloned cheaply per request.
#[derive(Clone, Builder)]
pub struct AppState {
    pub store: Arc<dyn RegistrationStore>,
    pub documents: Arc<dyn DocumentStorage>,
    pub email: Arc<EmailService>,
    pub payments: Option<Arc<dyn PaymentProvider>>,
    pub config: Config,
}

/// Get the regdesk database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

async fn root() -> &'static str {
    "API is running...."
}

/// Build the application router with all endpoints and middleware.
///
/// - Registration intake and review workflow routes
/// - Stored documents served verbatim under `/uploads`
/// - Contact-form and payment routes
/// - OpenAPI documentation at `/docs`
/// - Permissive CORS (the service fronts a separately hosted SPA) and
///   request tracing
pub fn build_router(state: &AppState) -> Router {
    // Body limit leaves headroom above the document size cap so oversized
    // uploads are rejected by the acceptance policy (400) rather than cut off
    // mid-stream by the framework (413).
    let upload_body_limit = (state.config.upload.max_size_bytes as usize).saturating_mul(2);

    let register_routes = Router::new()
        .route("/register", post(api::handlers::registrations::register))
        .layer(DefaultBodyLimit::max(upload_body_limit));

    Router::new()
        .route("/", get(root))
        .merge(register_routes)
        .route("/users", get(api::handlers::registrations::list_users))
        .route("/users/update-status", post(api::handlers::registrations::update_status))
        .route("/users/{id}", delete(api::handlers::registrations::delete_user))
        .route("/send-email", post(api::handlers::contact::send_email))
        .route("/create-checkout-session", post(api::handlers::payments::create_checkout_session))
        .route("/api/config/paypal", get(api::handlers::payments::paypal_config))
        .nest_service("/uploads", ServeDir::new(&state.config.upload.dir))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone())
}

/// The assembled application: bound listener plus router.
pub struct Application {
    router: Router,
    listener: TcpListener,
}

impl Application {
    /// Connect to the database, run migrations, construct the collaborators,
    /// and bind the listener. Fails fast on unusable configuration.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect(&config.database.url)
            .await?;
        migrator().run(&pool).await?;

        tokio::fs::create_dir_all(&config.upload.dir).await?;

        let email = Arc::new(EmailService::new(&config)?);
        let payments = payment_providers::create_provider(&config.payment);
        if payments.is_none() {
            tracing::warn!("No payment provider configured; checkout-session requests will fail");
        }

        let state = AppState::builder()
            .store(Arc::new(PgRegistrationStore::new(pool)) as Arc<dyn RegistrationStore>)
            .documents(Arc::new(LocalDocumentStorage::new(config.upload.dir.clone())) as Arc<dyn DocumentStorage>)
            .email(email)
            .maybe_payments(payments)
            .config(config.clone())
            .build();

        let router = build_router(&state);

        let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
        info!("Server running on http://{}", listener.local_addr()?);

        Ok(Self { router, listener })
    }

    /// Address the server is bound to (useful when port 0 was requested).
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until the shutdown future resolves.
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router).with_graceful_shutdown(shutdown).await?;
        Ok(())
    }
}
