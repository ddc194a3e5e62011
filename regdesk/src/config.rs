//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The configuration
//! file path defaults to `config.yaml` but can be specified via `-f` flag or `REGDESK_CONFIG`
//! environment variable.
//!
//! ## Loading Priority
//!
//! Configuration sources are merged in the following order (later sources override earlier ones):
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `REGDESK_` override YAML values
//! 3. **DATABASE_URL** - Special case: overrides `database.url` if set
//!
//! For nested config values, use double underscores in environment variables. For example,
//! `REGDESK_EMAIL__FROM_EMAIL=noreply@example.com` sets the `email.from_email` field.
//!
//! ## Usage
//!
//! ```no_run
//! use clap::Parser;
//! use regdesk::config::{Args, Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let args = Args::parse();
//! let config = Config::load(&args)?;
//!
//! println!("Server will bind to {}:{}", config.host, config.port);
//! # Ok(())
//! # }
//! ```

use clap::Parser;
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "REGDESK_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    /// Useful for CI/CD pipelines to catch config errors before deployment.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
///
/// This is the root configuration structure loaded from YAML and environment variables.
/// All fields have defaults defined in the `Default` implementation; startup fails fast
/// when a required value (database URL, mail sender, admin address) is missing or unusable.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Base URL of the admin dashboard, used for the review link in alert emails
    pub dashboard_url: String,
    /// Deprecated: Use `database.url` instead. Kept so `DATABASE_URL` keeps working.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
    /// PostgreSQL connection settings
    pub database: DatabaseConfig,
    /// Identity-document upload settings
    pub upload: UploadConfig,
    /// Email transport and sender settings
    pub email: EmailConfig,
    /// Administrator address notified of every new registration
    pub admin_email: String,
    /// Addresses that receive contact-form submissions
    pub receiver_emails: Vec<String>,
    /// Payment provider configuration (Stripe checkout + PayPal client id exposure)
    pub payment: PaymentConfig,
}

/// PostgreSQL connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Connection string for the registrations database
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost:5432/regdesk".to_string(),
            max_connections: 10,
        }
    }
}

/// Identity-document upload settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct UploadConfig {
    /// Directory where accepted documents are stored (served back at /uploads)
    pub dir: PathBuf,
    /// Maximum accepted document size in bytes (default: 5 MiB)
    pub max_size_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
            max_size_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Email configuration for registration and contact-form mail.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
// Note: Cannot use deny_unknown_fields here due to #[serde(flatten)] on transport
pub struct EmailConfig {
    /// Email transport method
    #[serde(flatten)]
    pub transport: EmailTransportConfig,
    /// Sender email address
    pub from_email: String,
    /// Sender display name
    pub from_name: String,
    /// Who to set the reply to field from
    pub reply_to: Option<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            transport: EmailTransportConfig::default(),
            from_email: "noreply@example.com".to_string(),
            from_name: "Registration Desk".to_string(),
            reply_to: None,
        }
    }
}

/// Email transport configuration - either SMTP or file-based for testing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EmailTransportConfig {
    /// Send emails via SMTP server
    Smtp {
        /// SMTP server hostname
        host: String,
        /// SMTP server port
        port: u16,
        /// SMTP authentication username
        username: String,
        /// SMTP authentication password
        password: String,
        /// Use TLS encryption
        use_tls: bool,
    },
    /// Write emails to files (for development/testing)
    File {
        /// Directory path where email files will be written
        path: String,
    },
}

impl Default for EmailTransportConfig {
    fn default() -> Self {
        Self::File {
            path: "./emails".to_string(),
        }
    }
}

/// Payment provider configuration.
///
/// Stripe powers the checkout-session endpoint; the PayPal section is only
/// surfaced to the frontend via `/api/config/paypal`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaymentConfig {
    /// Stripe checkout settings. When absent, checkout-session requests fail with a server error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe: Option<StripeConfig>,
    /// PayPal client configuration exposed to the frontend
    pub paypal: PaypalConfig,
}

/// Stripe payment configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StripeConfig {
    /// Stripe API key (secret key starting with sk_)
    pub secret_key: String,
    /// URL to redirect to after a successful payment
    pub success_url: String,
    /// URL to redirect to when payment is cancelled
    pub cancel_url: String,
}

/// PayPal client configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaypalConfig {
    /// Public client id handed to the frontend SDK
    pub client_id: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            dashboard_url: "http://localhost:3000".to_string(),
            database_url: None,
            database: DatabaseConfig::default(),
            upload: UploadConfig::default(),
            email: EmailConfig::default(),
            admin_email: "admin@example.com".to_string(),
            receiver_emails: vec![],
            payment: PaymentConfig::default(),
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let mut config: Self = Figment::new()
            .merge(Yaml::file(&args.config))
            .merge(Env::prefixed("REGDESK_").split("__"))
            .merge(Env::raw().only(&["DATABASE_URL"]))
            .extract()?;

        // if database_url is set, use it
        if let Some(url) = config.database_url.take() {
            config.database.url = url;
        }

        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    /// Check for configuration that would make the service silently useless at runtime.
    /// Called at startup so misconfiguration fails fast instead of degrading.
    pub fn validate(&self) -> Result<(), String> {
        if self.database.url.is_empty() {
            return Err("database.url must be set".to_string());
        }
        if self.email.from_email.is_empty() {
            return Err("email.from_email must be set".to_string());
        }
        if self.admin_email.is_empty() {
            return Err("admin_email must be set".to_string());
        }
        if self.upload.max_size_bytes == 0 {
            return Err("upload.max_size_bytes must be greater than zero".to_string());
        }
        if let EmailTransportConfig::Smtp { host, .. } = &self.email.transport {
            if host.is_empty() {
                return Err("email.host must be set for the smtp transport".to_string());
            }
        }
        Ok(())
    }
}
